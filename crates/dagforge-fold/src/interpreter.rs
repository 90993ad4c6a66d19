use std::sync::Arc;

use indexmap::IndexMap;

use dagforge_core::{Kind, RuntimeEntry};

use crate::coroutine::BoxCoroutine;

/// A factory that, given a node's runtime entry, produces a fresh
/// coroutine to evaluate it. Instantiated at most once per node per
/// `fold` call (the trampoline only ever calls this when a node is
/// first reached and isn't already memoized).
pub type HandlerFn = Arc<dyn Fn(&RuntimeEntry) -> BoxCoroutine + Send + Sync>;

/// The flat kind -> handler dispatch table `fold` drives against,
/// produced by [`crate::defaults`].
#[derive(Clone, Default)]
pub struct Interpreter {
    handlers: IndexMap<Kind, HandlerFn>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::default()
    }

    pub fn insert(&mut self, kind: impl Into<Kind>, handler: HandlerFn) {
        self.handlers.insert(kind.into(), handler);
    }

    pub fn get(&self, kind: &Kind) -> Option<&HandlerFn> {
        self.handlers.get(kind)
    }

    pub fn extend(&mut self, other: Interpreter) {
        self.handlers.extend(other.handlers);
    }

    pub fn from_map(handlers: IndexMap<Kind, HandlerFn>) -> Self {
        Interpreter { handlers }
    }
}
