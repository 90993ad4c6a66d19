#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CommitError {
    #[error("root {root} is not present in adj")]
    MissingRoot { root: String },

    #[error("entry {parent} references child {child}, which is not present in adj")]
    DanglingChild { parent: String, child: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpliceError {
    #[error("splice_where matched the root node {root}, which has no children to promote")]
    SpliceRootLeaf { root: String },
}
