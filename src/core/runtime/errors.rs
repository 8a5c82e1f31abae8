use crate::core::types::InstanceId;
use crate::core::values::ValueError;
use thiserror::Error;

/// Errors raised while invoking a member of an external type
#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    #[error("{member}: expected {expected} arguments, found {found}")]
    ArgumentCount {
        member: String,
        expected: usize,
        found: usize,
    },

    #[error("{member}: argument {index} expected {expected}, found {found}")]
    ArgumentType {
        member: String,
        index: usize,
        expected: String,
        found: &'static str,
    },

    #[error("{member}: instance member called without a receiver")]
    MissingReceiver { member: String },

    #[error("{member}: receiver of type {found} is not a {expected}")]
    WrongReceiver {
        member: String,
        expected: String,
        found: String,
    },

    #[error("{member} is read-only")]
    ReadOnly { member: String },

    #[error("{member}: returned {found}, expected {expected}")]
    ReturnType {
        member: String,
        expected: String,
        found: &'static str,
    },

    #[error("{owner} has no field '{field}'")]
    UnknownField { owner: String, field: String },

    #[error("{member} failed: {reason}")]
    Failed { member: String, reason: String },

    #[error("instance {0} is poisoned")]
    Poisoned(InstanceId),

    #[error("static storage of {0} is poisoned")]
    StaticPoisoned(String),

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl InvokeError {
    /// Convenience constructor for failures reported by member bodies
    pub fn failed(member: &str, reason: impl Into<String>) -> Self {
        InvokeError::Failed {
            member: member.to_string(),
            reason: reason.into(),
        }
    }
}
