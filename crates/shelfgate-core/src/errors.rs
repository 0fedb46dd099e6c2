//! Unified error type for shelfgate operations.
//!
//! A single error enum keeps the crate boundaries simple: every fallible
//! seam (policy, storage, audit) speaks the same type, and the mediator
//! decides which variants are recoverable user-facing outcomes and which
//! abort the request.

use serde::{Deserialize, Serialize};

/// Unified error type for all shelfgate operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum GateError {
    /// The caller is not authenticated
    #[error("Authentication required: {message}")]
    AuthenticationRequired {
        /// What the caller must log in to do
        message: String,
    },

    /// The caller is authenticated but not permitted (hard denial)
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Why the action was refused
        message: String,
    },

    /// A record or collaborator resource does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// What was not found
        message: String,
    },

    /// Invalid input or request shape
    #[error("Invalid: {message}")]
    Invalid {
        /// What was malformed
        message: String,
    },

    /// A delete was refused by referential constraints
    #[error("Protected: {message}")]
    Protected {
        /// Which dependents block the delete
        message: String,
    },

    /// The audit store failed to append
    #[error("Audit error: {message}")]
    Audit {
        /// What went wrong while appending
        message: String,
    },

    /// Storage collaborator failure
    #[error("Storage error: {message}")]
    Storage {
        /// What the storage layer reported
        message: String,
    },

    /// Internal invariant violation
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the broken invariant
        message: String,
    },
}

impl GateError {
    /// Create an authentication-required error
    pub fn authentication_required(message: impl Into<String>) -> Self {
        Self::AuthenticationRequired {
            message: message.into(),
        }
    }

    /// Create a permission-denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an invalid-input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a referential-conflict error
    pub fn protected(message: impl Into<String>) -> Self {
        Self::Protected {
            message: message.into(),
        }
    }

    /// Create an audit error
    pub fn audit(message: impl Into<String>) -> Self {
        Self::Audit {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// True for the permission-denied (hard denial) variant
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// True for the not-found variant
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias used throughout the shelfgate crates
pub type GateResult<T> = Result<T, GateError>;
