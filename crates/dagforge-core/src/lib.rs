//! Expression construction, content-addressed sharing, and the `app()`
//! normalizer.
//!
//! Plugins build [`Expr`] values with [`build`]/[`literal`] and declare
//! their node kinds in a [`Registry`]; [`app`] turns an expression into
//! an immutable, validated [`Program`] ready for `dagforge-dagql`
//! rewrites and `dagforge-fold` evaluation.

mod error;
mod expr;
mod id_minter;
mod kind;
mod normalize;
mod program;
mod registry;
mod scalar;

pub use error::NormalizeError;
pub use expr::{build, literal, ChildRef, ChildRefWithAdj, Expr, IntoChild, RawEntry};
pub use id_minter::IdMinter;
pub use kind::{Kind, TypeKey};
pub use normalize::app;
pub use program::{Program, RuntimeEntry};
pub use registry::{Registry, RegistryEntry, Signature, TraitDescriptor};
pub use scalar::Scalar;
