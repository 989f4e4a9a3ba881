use thiserror::Error;

use crate::coerce::CoercionKind;

/// Canonical result for graft.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type user-supplied `filter`/`translate` callables may raise.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    /// Programmer error in a rule: malformed path, unregistered coercion,
    /// unknown named callable. Carries the offending rule as
    /// `origin -> destination`.
    #[error("invalid rule `{rule}`: {reason}")]
    Config { rule: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot coerce value to {kind}: {reason}")]
    Coerce { kind: CoercionKind, reason: String },

    // Faults raised by rule callables are handed back as-is.
    #[error(transparent)]
    Callable(BoxError),

    #[error("rule document error: {0}")]
    Dsl(String),
}

impl Error {
    pub fn config(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Config {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Dsl(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_dsl_errors() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, Error::Dsl(_)), "{err:?}");
    }
}
