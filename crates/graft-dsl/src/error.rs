use thiserror::Error;

/// Result type local to graft-dsl.
pub type Result<T> = std::result::Result<T, DslError>;

#[derive(Debug, Error)]
pub enum DslError {
    #[error("cannot parse rule document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("rule `{rule}` names unknown {role} `{name}`")]
    UnknownCallable {
        rule: String,
        role: &'static str,
        name: String,
    },

    #[error(transparent)]
    Rule(#[from] graft_core::Error),
}

impl From<DslError> for graft_core::Error {
    fn from(e: DslError) -> Self {
        match e {
            DslError::Rule(inner) => inner,
            other => graft_core::Error::Dsl(other.to_string()),
        }
    }
}
