use dagforge_core::Kind;

#[derive(thiserror::Error, Debug, Clone)]
pub enum FoldError {
    #[error("node {id} is not present in the program's adjacency map")]
    MissingNode { id: String },

    #[error("no handler registered for kind {kind}")]
    NoHandler { kind: Kind },

    #[error("handler for node {id} yielded child index {index}, but it has {len} children")]
    ChildIndexOutOfRange { id: String, index: usize, len: usize },

    #[error("frame stack depth exceeded the configured limit of {limit}")]
    FrameLimitExceeded { limit: usize },

    #[error("handler for node {id} failed: {message}")]
    HandlerFailed { id: String, message: String },
}
