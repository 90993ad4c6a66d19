use indexmap::IndexMap;

use crate::kind::{Kind, TypeKey};

/// A concrete node's expected input types and the type it produces.
#[derive(Clone, Debug)]
pub struct Signature {
    pub inputs: Vec<TypeKey>,
    pub output: TypeKey,
}

impl Signature {
    pub fn new(inputs: Vec<TypeKey>, output: TypeKey) -> Self {
        Signature { inputs, output }
    }
}

/// A polymorphic node whose concrete kind is resolved from the type-key
/// of its first (already-normalized) child.
#[derive(Clone, Debug)]
pub struct TraitDescriptor {
    pub output: TypeKey,
    pub dispatch: IndexMap<TypeKey, Kind>,
}

impl TraitDescriptor {
    pub fn new(output: TypeKey, dispatch: IndexMap<TypeKey, Kind>) -> Self {
        TraitDescriptor { output, dispatch }
    }

    pub fn resolve(&self, first_child_type: &TypeKey) -> Option<&Kind> {
        self.dispatch.get(first_child_type)
    }
}

#[derive(Clone, Debug)]
pub enum RegistryEntry {
    Concrete(Signature),
    Trait(TraitDescriptor),
}

impl RegistryEntry {
    pub fn output(&self) -> &TypeKey {
        match self {
            RegistryEntry::Concrete(sig) => &sig.output,
            RegistryEntry::Trait(t) => &t.output,
        }
    }

    pub fn is_trait(&self) -> bool {
        matches!(self, RegistryEntry::Trait(_))
    }
}

/// A process-wide table of node-kind signatures, built once at plugin
/// initialization and treated as read-only afterward. Threaded explicitly
/// by callers rather than kept as global state.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: IndexMap<Kind, RegistryEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn register_concrete(
        &mut self,
        kind: impl Into<Kind>,
        inputs: Vec<TypeKey>,
        output: TypeKey,
    ) {
        self.entries
            .insert(kind.into(), RegistryEntry::Concrete(Signature::new(inputs, output)));
    }

    pub fn register_trait(
        &mut self,
        kind: impl Into<Kind>,
        output: TypeKey,
        dispatch: IndexMap<TypeKey, Kind>,
    ) {
        self.entries.insert(
            kind.into(),
            RegistryEntry::Trait(TraitDescriptor::new(output, dispatch)),
        );
    }

    pub fn get(&self, kind: &Kind) -> Option<&RegistryEntry> {
        self.entries.get(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &Kind> {
        self.entries.keys()
    }

    pub fn merge(&mut self, other: Registry) {
        self.entries.extend(other.entries);
    }
}
