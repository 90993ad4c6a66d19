//! The `bool` demonstration plugin: `bool/literal`, `bool/not`, and
//! `bool/eq` (the `eq` trait's boolean-dispatch target).

use std::sync::Arc;

use async_trait::async_trait;

use dagforge_core::{build, Expr, IntoChild, Registry, RuntimeEntry, Scalar, TypeKey};
use dagforge_fold::{Coroutine, Immediate, Interpreter, Step, Value};

use crate::plugin::Plugin;

pub fn literal(b: bool) -> Expr {
    dagforge_core::literal(Scalar::Boolean(b))
}

pub fn not(a: impl IntoChild) -> Expr {
    build("bool/not", vec![a.into_child()], Some(TypeKey::new("boolean")))
}

pub fn register(registry: &mut Registry) {
    registry.register_concrete("bool/literal", vec![], TypeKey::new("boolean"));
    registry.register_concrete("bool/not", vec![TypeKey::new("boolean")], TypeKey::new("boolean"));
    registry.register_concrete(
        "bool/eq",
        vec![TypeKey::new("boolean"), TypeKey::new("boolean")],
        TypeKey::new("boolean"),
    );
}

pub fn plugin() -> Plugin {
    Plugin::new("bool", vec!["bool/literal".into(), "bool/not".into(), "bool/eq".into()])
        .with_default_interpreter(default_interpreter)
}

fn default_interpreter() -> Interpreter {
    let mut interp = Interpreter::new();
    interp.insert(
        "bool/literal",
        Arc::new(|entry: &RuntimeEntry| -> Box<dyn Coroutine> {
            Box::new(Immediate(entry.out.as_ref().map(Value::from).unwrap_or(Value::Null)))
        }),
    );
    interp.insert(
        "bool/not",
        Arc::new(|_entry: &RuntimeEntry| -> Box<dyn Coroutine> { Box::new(BoolNot { yielded: false }) }),
    );
    interp.insert(
        "bool/eq",
        Arc::new(|_entry: &RuntimeEntry| -> Box<dyn Coroutine> { Box::new(BoolEq { stage: 0, left: false }) }),
    );
    interp
}

struct BoolNot {
    yielded: bool,
}

#[async_trait]
impl Coroutine for BoolNot {
    async fn step(&mut self, resume: Option<Value>) -> Step {
        if !self.yielded {
            self.yielded = true;
            return Step::Yield(0);
        }
        match resume.and_then(|v| v.as_boolean()) {
            Some(b) => Step::Done(Value::Boolean(!b)),
            None => Step::Failed("bool/not: child did not evaluate to a boolean".into()),
        }
    }
}

struct BoolEq {
    stage: u8,
    left: bool,
}

#[async_trait]
impl Coroutine for BoolEq {
    async fn step(&mut self, resume: Option<Value>) -> Step {
        match self.stage {
            0 => {
                self.stage = 1;
                Step::Yield(0)
            }
            1 => match resume.and_then(|v| v.as_boolean()) {
                Some(b) => {
                    self.left = b;
                    self.stage = 2;
                    Step::Yield(1)
                }
                None => Step::Failed("bool/eq: left child did not evaluate to a boolean".into()),
            },
            _ => match resume.and_then(|v| v.as_boolean()) {
                Some(right) => Step::Done(Value::Boolean(self.left == right)),
                None => Step::Failed("bool/eq: right child did not evaluate to a boolean".into()),
            },
        }
    }
}
