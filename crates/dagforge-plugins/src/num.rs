//! The `num` demonstration plugin: `num/literal`, `num/add`, `num/mul`,
//! `num/sub`, and `num/eq` (the `eq` trait's number-dispatch target).

use std::sync::Arc;

use async_trait::async_trait;

use dagforge_core::{build, Expr, IntoChild, Registry, RuntimeEntry, Scalar, TypeKey};
use dagforge_fold::{Coroutine, Immediate, Interpreter, Step, Value};

use crate::plugin::Plugin;

pub fn literal(n: f64) -> Expr {
    dagforge_core::literal(Scalar::Number(n))
}

pub fn add(a: impl IntoChild, b: impl IntoChild) -> Expr {
    build("num/add", vec![a.into_child(), b.into_child()], Some(TypeKey::new("number")))
}

pub fn mul(a: impl IntoChild, b: impl IntoChild) -> Expr {
    build("num/mul", vec![a.into_child(), b.into_child()], Some(TypeKey::new("number")))
}

pub fn sub(a: impl IntoChild, b: impl IntoChild) -> Expr {
    build("num/sub", vec![a.into_child(), b.into_child()], Some(TypeKey::new("number")))
}

pub fn register(registry: &mut Registry) {
    registry.register_concrete("num/literal", vec![], TypeKey::new("number"));
    let number_pair = vec![TypeKey::new("number"), TypeKey::new("number")];
    registry.register_concrete("num/add", number_pair.clone(), TypeKey::new("number"));
    registry.register_concrete("num/mul", number_pair.clone(), TypeKey::new("number"));
    registry.register_concrete("num/sub", number_pair.clone(), TypeKey::new("number"));
    registry.register_concrete("num/eq", number_pair, TypeKey::new("boolean"));
}

pub fn plugin() -> Plugin {
    Plugin::new(
        "num",
        vec!["num/literal".into(), "num/add".into(), "num/mul".into(), "num/sub".into(), "num/eq".into()],
    )
    .with_default_interpreter(default_interpreter)
}

fn default_interpreter() -> Interpreter {
    let mut interp = Interpreter::new();
    interp.insert(
        "num/literal",
        Arc::new(|entry: &RuntimeEntry| -> Box<dyn Coroutine> {
            Box::new(Immediate(entry.out.as_ref().map(Value::from).unwrap_or(Value::Null)))
        }),
    );
    interp.insert("num/add", binary_handler(|a, b| a + b));
    interp.insert("num/mul", binary_handler(|a, b| a * b));
    interp.insert("num/sub", binary_handler(|a, b| a - b));
    interp.insert("num/eq", comparison_handler(|a, b| a == b));
    interp
}

/// Two-stage coroutine shared by `add`/`mul`/`sub`: yields its left child,
/// then its right, then applies `op` to the two resolved numbers.
struct NumBinOp {
    stage: u8,
    left: f64,
    op: fn(f64, f64) -> f64,
}

#[async_trait]
impl Coroutine for NumBinOp {
    async fn step(&mut self, resume: Option<Value>) -> Step {
        match self.stage {
            0 => {
                self.stage = 1;
                Step::Yield(0)
            }
            1 => match resume.and_then(|v| v.as_number()) {
                Some(n) => {
                    self.left = n;
                    self.stage = 2;
                    Step::Yield(1)
                }
                None => Step::Failed("num binary op: left child did not evaluate to a number".into()),
            },
            _ => match resume.and_then(|v| v.as_number()) {
                Some(right) => Step::Done(Value::Number((self.op)(self.left, right))),
                None => Step::Failed("num binary op: right child did not evaluate to a number".into()),
            },
        }
    }
}

struct NumComparison {
    stage: u8,
    left: f64,
    op: fn(f64, f64) -> bool,
}

#[async_trait]
impl Coroutine for NumComparison {
    async fn step(&mut self, resume: Option<Value>) -> Step {
        match self.stage {
            0 => {
                self.stage = 1;
                Step::Yield(0)
            }
            1 => match resume.and_then(|v| v.as_number()) {
                Some(n) => {
                    self.left = n;
                    self.stage = 2;
                    Step::Yield(1)
                }
                None => Step::Failed("num/eq: left child did not evaluate to a number".into()),
            },
            _ => match resume.and_then(|v| v.as_number()) {
                Some(right) => Step::Done(Value::Boolean((self.op)(self.left, right))),
                None => Step::Failed("num/eq: right child did not evaluate to a number".into()),
            },
        }
    }
}

fn binary_handler(op: fn(f64, f64) -> f64) -> dagforge_fold::HandlerFn {
    Arc::new(move |_entry: &RuntimeEntry| -> Box<dyn Coroutine> { Box::new(NumBinOp { stage: 0, left: 0.0, op }) })
}

fn comparison_handler(op: fn(f64, f64) -> bool) -> dagforge_fold::HandlerFn {
    Arc::new(move |_entry: &RuntimeEntry| -> Box<dyn Coroutine> {
        Box::new(NumComparison { stage: 0, left: 0.0, op })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagforge_core::app;

    fn registry() -> Registry {
        let mut r = Registry::new();
        register(&mut r);
        r
    }

    #[tokio::test]
    async fn mul_add_scenario_folds_to_thirty_five() {
        let expr = mul(add(literal(3.0), literal(4.0)), literal(5.0));
        let program = app(&expr, &registry()).unwrap();
        assert_eq!(program.root, "e");
        assert_eq!(program.counter, "f");

        let interp = default_interpreter();
        let value = dagforge_fold::fold(&program, &interp).await.unwrap();
        assert_eq!(value.as_number(), Some(35.0));
    }

    #[tokio::test]
    async fn mul_add_scenario_with_bare_scalar_args_matches_spec_ids() {
        // The public constructors accept raw scalars directly (`add(3, 4)`,
        // not `add(literal(3.0), literal(4.0))`); normalization must still
        // mint ids in the exact DFS order scenario 1 specifies.
        let expr = mul(add(3, 4), 5);
        let program = app(&expr, &registry()).unwrap();
        assert_eq!(program.adj.len(), 5);
        assert_eq!(program.root, "e");
        assert_eq!(program.counter, "f");

        let ids: Vec<&str> = program.adj.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(program.adj["a"].out, Some(Scalar::Number(3.0)));
        assert_eq!(program.adj["b"].out, Some(Scalar::Number(4.0)));
        assert_eq!(program.adj["c"].children, vec!["a", "b"]);
        assert_eq!(program.adj["d"].out, Some(Scalar::Number(5.0)));
        assert_eq!(program.adj["e"].children, vec!["c", "d"]);

        let interp = default_interpreter();
        let value = dagforge_fold::fold(&program, &interp).await.unwrap();
        assert_eq!(value.as_number(), Some(35.0));
    }
}
