//! Plugin descriptor schema, [`defaults`] composition, and the built-in
//! `num`/`str`/`bool`/`ctl` demonstration plugins.
//!
//! The demonstration plugins aren't part of the core's required public
//! surface (real plugins live outside this workspace and bind to
//! external services), but they're built with the same
//! constructor/registry/handler machinery any third-party plugin would
//! use, so they double as the worked example of "how to write a
//! plugin" and as the substrate for every concrete scenario this
//! workspace's tests exercise.

mod defaults;
mod error;
mod plugin;

pub mod boolean;
pub mod ctl;
pub mod num;
pub mod strings;

pub use defaults::defaults;
pub use error::CompositionError;
pub use plugin::Plugin;

use indexmap::IndexMap;

use dagforge_core::{build, Expr, IntoChild, Kind, Registry, TypeKey};

/// Registers every built-in demonstration plugin's kinds, plus the
/// cross-plugin `eq` trait, into one registry. The `eq` trait has no
/// plugin of its own: its dispatch targets (`num/eq`, `str/eq`,
/// `bool/eq`) are each owned by the plugin that also defines the
/// matching literal kind.
pub fn register_all(registry: &mut Registry) {
    num::register(registry);
    strings::register(registry);
    boolean::register(registry);
    ctl::register(registry);
    register_eq_trait(registry);
}

pub(crate) fn register_eq_trait(registry: &mut Registry) {
    let mut dispatch = IndexMap::new();
    dispatch.insert(TypeKey::new("number"), Kind::new("num/eq"));
    dispatch.insert(TypeKey::new("string"), Kind::new("str/eq"));
    dispatch.insert(TypeKey::new("boolean"), Kind::new("bool/eq"));
    registry.register_trait("eq", TypeKey::new("boolean"), dispatch);
}

/// The polymorphic equality constructor. Its kind is the trait name
/// `"eq"`; normalization resolves it to `num/eq`, `str/eq`, or
/// `bool/eq` based on the first child's output type.
pub fn eq(a: impl IntoChild, b: impl IntoChild) -> Expr {
    build("eq", vec![a.into_child(), b.into_child()], Some(TypeKey::new("boolean")))
}

/// Every built-in demonstration plugin, in an order suitable for
/// `defaults()`.
pub fn all_plugins() -> Vec<Plugin> {
    vec![num::plugin(), strings::plugin(), boolean::plugin(), ctl::plugin()]
}
