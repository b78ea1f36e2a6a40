//! Contract error types for the aroma explorer
//!
//! Transport-agnostic; the REST layer maps these onto Problem Details.

use thiserror::Error;

/// Domain errors surfaced by the service layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AromaError {
    /// Entity not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (ingredient, molecule, group, phase, match)
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// Write rejected at the validation boundary, before anything was issued
    /// to storage
    #[error("validation error: {message}")]
    Validation {
        /// What the caller got wrong
        message: String,
    },

    /// Conflict with existing data (duplicate phase name, duplicate link)
    #[error("conflict: {reason}")]
    Conflict {
        /// Conflict reason
        reason: String,
    },

    /// Write attempted without an admin role
    #[error("admin role required")]
    Forbidden,

    /// Storage or other backend failure
    #[error("internal error")]
    Internal,
}

impl AromaError {
    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }
}
