#[derive(thiserror::Error, Debug, Clone)]
pub enum CompositionError {
    #[error("plugin {name} declares node kinds but has neither a default interpreter nor an override")]
    NoInterpreter { name: String },
}
