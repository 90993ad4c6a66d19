//! The `str` demonstration plugin: `str/literal`, `str/concat`, and
//! `str/eq` (the `eq` trait's string-dispatch target).

use std::sync::Arc;

use async_trait::async_trait;

use dagforge_core::{build, Expr, IntoChild, Registry, RuntimeEntry, Scalar, TypeKey};
use dagforge_fold::{Coroutine, Immediate, Interpreter, Step, Value};

use crate::plugin::Plugin;

pub fn literal(s: impl Into<String>) -> Expr {
    dagforge_core::literal(Scalar::String(s.into()))
}

pub fn concat(a: impl IntoChild, b: impl IntoChild) -> Expr {
    build("str/concat", vec![a.into_child(), b.into_child()], Some(TypeKey::new("string")))
}

pub fn register(registry: &mut Registry) {
    registry.register_concrete("str/literal", vec![], TypeKey::new("string"));
    let string_pair = vec![TypeKey::new("string"), TypeKey::new("string")];
    registry.register_concrete("str/concat", string_pair.clone(), TypeKey::new("string"));
    registry.register_concrete("str/eq", string_pair, TypeKey::new("boolean"));
}

pub fn plugin() -> Plugin {
    Plugin::new("str", vec!["str/literal".into(), "str/concat".into(), "str/eq".into()])
        .with_default_interpreter(default_interpreter)
}

fn default_interpreter() -> Interpreter {
    let mut interp = Interpreter::new();
    interp.insert(
        "str/literal",
        Arc::new(|entry: &RuntimeEntry| -> Box<dyn Coroutine> {
            Box::new(Immediate(entry.out.as_ref().map(Value::from).unwrap_or(Value::Null)))
        }),
    );
    interp.insert(
        "str/concat",
        Arc::new(|_entry: &RuntimeEntry| -> Box<dyn Coroutine> {
            Box::new(StrConcat { stage: 0, left: String::new() })
        }),
    );
    interp.insert(
        "str/eq",
        Arc::new(|_entry: &RuntimeEntry| -> Box<dyn Coroutine> {
            Box::new(StrEq { stage: 0, left: String::new() })
        }),
    );
    interp
}

struct StrConcat {
    stage: u8,
    left: String,
}

#[async_trait]
impl Coroutine for StrConcat {
    async fn step(&mut self, resume: Option<Value>) -> Step {
        match self.stage {
            0 => {
                self.stage = 1;
                Step::Yield(0)
            }
            1 => match resume.and_then(|v| v.as_text().map(str::to_owned)) {
                Some(s) => {
                    self.left = s;
                    self.stage = 2;
                    Step::Yield(1)
                }
                None => Step::Failed("str/concat: left child did not evaluate to a string".into()),
            },
            _ => match resume.and_then(|v| v.as_text().map(str::to_owned)) {
                Some(right) => Step::Done(Value::Text(format!("{}{}", self.left, right))),
                None => Step::Failed("str/concat: right child did not evaluate to a string".into()),
            },
        }
    }
}

struct StrEq {
    stage: u8,
    left: String,
}

#[async_trait]
impl Coroutine for StrEq {
    async fn step(&mut self, resume: Option<Value>) -> Step {
        match self.stage {
            0 => {
                self.stage = 1;
                Step::Yield(0)
            }
            1 => match resume.and_then(|v| v.as_text().map(str::to_owned)) {
                Some(s) => {
                    self.left = s;
                    self.stage = 2;
                    Step::Yield(1)
                }
                None => Step::Failed("str/eq: left child did not evaluate to a string".into()),
            },
            _ => match resume.and_then(|v| v.as_text().map(str::to_owned)) {
                Some(right) => Step::Done(Value::Boolean(self.left == right)),
                None => Step::Failed("str/eq: right child did not evaluate to a string".into()),
            },
        }
    }
}
