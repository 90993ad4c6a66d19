//! The `ctl` demonstration plugin: a single conditional node, `ctl/if`,
//! whose handler is the worked example of fold's short-circuit guarantee
//! (§4.5) — it yields its condition child first, then yields only the
//! branch actually taken.

use std::sync::Arc;

use async_trait::async_trait;

use dagforge_core::{build, Expr, IntoChild, Registry, RuntimeEntry, TypeKey};
use dagforge_fold::{Coroutine, Interpreter, Step, Value};

use crate::plugin::Plugin;

pub fn if_(cond: impl IntoChild, then: impl IntoChild, else_: impl IntoChild) -> Expr {
    build(
        "ctl/if",
        vec![cond.into_child(), then.into_child(), else_.into_child()],
        Some(TypeKey::new(TypeKey::ANY)),
    )
}

pub fn register(registry: &mut Registry) {
    registry.register_concrete(
        "ctl/if",
        vec![TypeKey::new("boolean"), TypeKey::new(TypeKey::ANY), TypeKey::new(TypeKey::ANY)],
        TypeKey::new(TypeKey::ANY),
    );
}

pub fn plugin() -> Plugin {
    Plugin::new("ctl", vec!["ctl/if".into()]).with_default_interpreter(default_interpreter)
}

fn default_interpreter() -> Interpreter {
    let mut interp = Interpreter::new();
    interp.insert(
        "ctl/if",
        Arc::new(|_entry: &RuntimeEntry| -> Box<dyn Coroutine> { Box::new(IfCoroutine { stage: 0 }) }),
    );
    interp
}

/// Stage 0 requests the condition (child 0); stage 1 requests only the
/// taken branch (child 1 if true, child 2 if false) — the untaken
/// branch's index is never yielded, so `fold`'s trampoline never pushes
/// a frame for it and its handler is never instantiated.
struct IfCoroutine {
    stage: u8,
}

#[async_trait]
impl Coroutine for IfCoroutine {
    async fn step(&mut self, resume: Option<Value>) -> Step {
        match self.stage {
            0 => {
                self.stage = 1;
                Step::Yield(0)
            }
            1 => match resume.and_then(|v| v.as_boolean()) {
                Some(true) => {
                    self.stage = 2;
                    Step::Yield(1)
                }
                Some(false) => {
                    self.stage = 2;
                    Step::Yield(2)
                }
                None => Step::Failed("ctl/if: condition did not evaluate to a boolean".into()),
            },
            _ => Step::Done(resume.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use dagforge_core::app;
    use dagforge_fold::HandlerFn;

    use crate::boolean;
    use crate::num;

    fn registry() -> Registry {
        let mut r = Registry::new();
        register(&mut r);
        boolean::register(&mut r);
        num::register(&mut r);
        crate::register_eq_trait(&mut r);
        r
    }

    /// A handler that counts its own invocations and immediately returns
    /// `value`, standing in for a then/else branch payload.
    fn counting_marker(hits: Arc<AtomicUsize>, value: f64) -> HandlerFn {
        Arc::new(move |_entry: &RuntimeEntry| -> Box<dyn Coroutine> {
            hits.fetch_add(1, Ordering::SeqCst);
            Box::new(dagforge_fold::Immediate(Value::Number(value)))
        })
    }

    #[tokio::test]
    async fn untaken_branch_handler_is_never_instantiated() {
        let then_hits = Arc::new(AtomicUsize::new(0));
        let else_hits = Arc::new(AtomicUsize::new(0));

        let mut adj = indexmap::IndexMap::new();
        adj.insert(
            "cond".to_string(),
            RuntimeEntry { kind: "bool/literal".into(), children: vec![], out: Some(dagforge_core::Scalar::Boolean(true)) },
        );
        adj.insert("then".to_string(), RuntimeEntry { kind: "then/marker".into(), children: vec![], out: None });
        adj.insert("else".to_string(), RuntimeEntry { kind: "else/marker".into(), children: vec![], out: None });
        adj.insert(
            "root".to_string(),
            RuntimeEntry {
                kind: "ctl/if".into(),
                children: vec!["cond".into(), "then".into(), "else".into()],
                out: None,
            },
        );
        let program = dagforge_core::Program { root: "root".to_string(), adj, counter: "z".to_string() };

        let mut interp = default_interpreter();
        interp.extend(boolean::plugin().default_interpreter.as_ref().unwrap()());
        interp.insert("then/marker", counting_marker(then_hits.clone(), 1.0));
        interp.insert("else/marker", counting_marker(else_hits.clone(), 0.0));

        let value = dagforge_fold::fold(&program, &interp).await.unwrap();

        assert_eq!(value.as_number(), Some(1.0));
        assert_eq!(then_hits.load(Ordering::SeqCst), 1);
        assert_eq!(else_hits.load(Ordering::SeqCst), 0, "the untaken else-branch handler must never run");
    }

    #[tokio::test]
    async fn if_over_eq_condition_resolves_through_the_trait() {
        let expr = if_(crate::eq(num::literal(3.0), num::literal(3.0)), num::literal(1.0), num::literal(0.0));
        let program = app(&expr, &registry()).unwrap();

        let mut interp = default_interpreter();
        interp.extend(num::plugin().default_interpreter.as_ref().unwrap()());
        interp.extend(boolean::plugin().default_interpreter.as_ref().unwrap()());

        let value = dagforge_fold::fold(&program, &interp).await.unwrap();
        assert_eq!(value.as_number(), Some(1.0));
    }
}
