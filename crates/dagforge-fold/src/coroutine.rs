use async_trait::async_trait;

use crate::value::Value;

/// The result of stepping a handler coroutine once.
#[derive(Debug)]
pub enum Step {
    /// Requests the value of the current node's child at this position.
    Yield(usize),
    /// The node is fully evaluated.
    Done(Value),
    /// The handler encountered a condition it cannot continue past
    /// (e.g. a malformed `out` payload for its kind). Aborts the whole
    /// fold; the memo accumulated so far is discarded.
    Failed(String),
}

/// A cooperative, resumable computation over one node: a small state
/// machine the trampoline drives by alternately calling `step` and
/// handing back the value produced for whichever child index it last
/// yielded. The first call passes `None`; every later call passes
/// `Some(value)` for the previously requested child.
///
/// Modeled as an explicit state machine (rather than relying on
/// unstable native generators) so the trampoline in `fold` only ever
/// observes this step/yield/done shape; a handler's own internal
/// control flow (loops, conditionals) runs to completion between
/// suspension points without ever recursing back into `fold` itself.
#[async_trait]
pub trait Coroutine: Send {
    async fn step(&mut self, resume: Option<Value>) -> Step;
}

pub type BoxCoroutine = Box<dyn Coroutine>;

/// A coroutine that never yields: it completes with a precomputed value
/// on its first step. The common case for literal/leaf node handlers.
pub struct Immediate(pub Value);

#[async_trait]
impl Coroutine for Immediate {
    async fn step(&mut self, _resume: Option<Value>) -> Step {
        Step::Done(self.0.clone())
    }
}
