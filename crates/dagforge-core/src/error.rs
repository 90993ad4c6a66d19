use crate::kind::{Kind, TypeKey};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("unknown node kind {kind}")]
    UnknownKind { kind: Kind },

    #[error("trait {trait_kind} has no dispatch entry for first-child type {type_key}")]
    UnknownTraitDispatch { trait_kind: Kind, type_key: TypeKey },

    #[error("{kind} expects {expected} children, got {actual}")]
    ArityMismatch {
        kind: Kind,
        expected: usize,
        actual: usize,
    },

    #[error("{kind} child {index} has type {actual}, expected {expected}")]
    TypeMismatch {
        kind: Kind,
        index: usize,
        expected: TypeKey,
        actual: TypeKey,
    },
}
