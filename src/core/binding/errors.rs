use crate::core::types::MemberKind;
use thiserror::Error;

/// Why a binding could not be produced.
///
/// Either way the caller receives no callable and treats the capability as
/// unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The member (or the external API carrying it) is absent
    #[error("{kind} '{member}' not found on {owner}")]
    MemberNotFound {
        owner: String,
        kind: MemberKind,
        member: String,
    },

    /// The member exists but its shape is incompatible with the request
    #[error("{kind} '{member}' on {owner} has shape {found}, requested {requested}")]
    SignatureMismatch {
        owner: String,
        kind: MemberKind,
        member: String,
        requested: String,
        found: String,
    },
}

impl BindError {
    pub fn is_member_not_found(&self) -> bool {
        matches!(self, BindError::MemberNotFound { .. })
    }

    pub fn is_signature_mismatch(&self) -> bool {
        matches!(self, BindError::SignatureMismatch { .. })
    }

    /// Name of the member the binding targeted
    pub fn member(&self) -> &str {
        match self {
            BindError::MemberNotFound { member, .. } => member,
            BindError::SignatureMismatch { member, .. } => member,
        }
    }
}
