//! An async, stack-safe, memoizing trampoline evaluator over cooperative
//! coroutine-style handlers.
//!
//! Implementations write [`Coroutine`]s, register them in an
//! [`Interpreter`] (built by `dagforge-plugins::defaults`), and call
//! [`fold`] to drive a [`dagforge_core::Program`] to a [`Value`].

mod coroutine;
mod error;
mod interpreter;
mod limits;
mod trampoline;
mod value;

pub use coroutine::{BoxCoroutine, Coroutine, Immediate, Step};
pub use error::FoldError;
pub use interpreter::{HandlerFn, Interpreter};
pub use limits::FoldLimits;
pub use trampoline::{fold, fold_from, fold_with_limits};
pub use value::Value;
