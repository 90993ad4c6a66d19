use std::sync::Arc;

use dagforge_core::Kind;
use dagforge_fold::Interpreter;

/// What a plugin contributes to a composed interpreter: the node kinds
/// it owns, and optionally a factory for its default handlers. A plugin
/// that declares kinds but offers neither a default nor an override at
/// composition time is a composition error, not a silent no-op — a
/// program referencing one of its kinds would otherwise fail late, deep
/// inside `fold`, instead of at startup.
#[derive(Clone)]
pub struct Plugin {
    pub name: String,
    pub node_kinds: Vec<Kind>,
    pub default_interpreter: Option<Arc<dyn Fn() -> Interpreter + Send + Sync>>,
}

impl Plugin {
    pub fn new(name: impl Into<String>, node_kinds: Vec<Kind>) -> Self {
        Plugin { name: name.into(), node_kinds, default_interpreter: None }
    }

    pub fn with_default_interpreter(mut self, factory: impl Fn() -> Interpreter + Send + Sync + 'static) -> Self {
        self.default_interpreter = Some(Arc::new(factory));
        self
    }
}
