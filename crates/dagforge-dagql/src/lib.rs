//! Predicates, selectors, pure rewrites, and structural edits over
//! normalized [`dagforge_core::Program`]s.
//!
//! Query with [`predicate`] combinators and [`select_where`]; rewrite
//! with [`map_where`]/[`replace_where`]; edit structurally via
//! [`dirty`]/[`commit`] or the higher-level [`wrap_by_name`],
//! [`splice_where`], [`gc`], and [`name`].

mod dirty;
mod error;
mod predicate;
mod rewrite;
mod structural;

pub use dirty::{commit, dirty, Dirty};
pub use error::{CommitError, SpliceError};
pub use predicate::{and, by_kind, by_kind_glob, by_name, has_child_count, is_leaf, not, or, Predicate};
pub use rewrite::{map_where, replace_where, select_where};
pub use structural::{gc, gc_preserving_aliases, name, splice_where, wrap_by_name};
