//! Public error types for the application security group repository.

use cf_gateway::{GatewayError, ResourceError};
use thiserror::Error;

/// Errors that can be returned by `ApplicationSecurityGroupRepo`.
#[derive(Error, Debug)]
pub enum SecurityGroupError {
    /// No group with the requested name exists.
    #[error("Application Security Group {name} not found")]
    NotFound { name: String },

    /// More than one group matched a name that should be unique.
    #[error("Application Security Group {name} matched {count} groups")]
    AmbiguousMatch { name: String, count: usize },

    /// The request was rejected before anything was sent.
    #[error("Invalid application security group: {message}")]
    InvalidInput { message: String },

    /// The server returned a group in an unexpected shape.
    #[error("Invalid application security group payload: {message}")]
    Decode { message: String },

    /// Transport or server failure, as classified by the gateway.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl SecurityGroupError {
    /// Create an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Whether the group is absent (as opposed to the lookup having failed).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ResourceError> for SecurityGroupError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::ModelNotFound { key, .. } => Self::NotFound { name: key },
            ResourceError::AmbiguousMatch { key, count, .. } => {
                Self::AmbiguousMatch { name: key, count }
            }
            ResourceError::Decode { reason, .. } => Self::Decode { message: reason },
            ResourceError::Gateway(e) => Self::Gateway(e),
        }
    }
}
