use vpplink_api::ApiError;
use vpplink_compat::CompatError;

/// Errors returned by [`VppLink`](crate::VppLink) verbs.
///
/// Transport-class failures ([`VppError::Api`]) and engine-reported
/// failures ([`VppError::Engine`]) are kept apart; only the latter carry a
/// result code.
#[derive(Debug, thiserror::Error)]
pub enum VppError {
    /// The exchange did not produce a usable reply.
    #[error("{operation}: {source}")]
    Api {
        operation: &'static str,
        #[source]
        source: ApiError,
    },

    /// The engine decoded the request and refused it.
    #[error("{operation} failed with retval {retval} (attempted {attempted})")]
    Engine {
        operation: &'static str,
        retval: i32,
        /// Debug rendering of the domain value the call tried to apply.
        attempted: String,
    },

    /// The input cannot be expressed on the wire; nothing was sent.
    #[error("{operation}: invalid input: {reason}")]
    InvalidInput {
        operation: &'static str,
        reason: String,
    },

    /// The engine does not satisfy a module version requirement.
    #[error("{operation}: {source}")]
    Compat {
        operation: &'static str,
        #[source]
        source: CompatError,
    },
}

impl VppError {
    pub(crate) fn invalid(operation: &'static str, reason: impl std::fmt::Display) -> Self {
        VppError::InvalidInput {
            operation,
            reason: reason.to_string(),
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            VppError::Api { operation, .. }
            | VppError::Engine { operation, .. }
            | VppError::InvalidInput { operation, .. }
            | VppError::Compat { operation, .. } => operation,
        }
    }

    /// Engine result code, if the engine refused the request.
    pub fn retval(&self) -> Option<i32> {
        match self {
            VppError::Engine { retval, .. } => Some(*retval),
            _ => None,
        }
    }

    pub fn is_engine(&self) -> bool {
        matches!(self, VppError::Engine { .. })
    }
}

pub type Result<T> = std::result::Result<T, VppError>;
