//! Error types for the VinylDNS provider
//!
//! Every lifecycle hook, the change poller and the remote API collaborator
//! report failures through the single [`Error`] enum defined here.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the VinylDNS provider
#[derive(Error, Debug)]
pub enum Error {
    /// A composite record set identifier did not split into `zone_id:record_set_id`
    #[error("Unexpected ID format ({0:?}). Expected zone_id:record_set_id")]
    MalformedIdentifier(String),

    /// A request payload violates a domain rule; raised before any remote call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The remote API reported that the resource does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other remote API failure
    #[error("Remote API error (status {status:?}): {message}")]
    Remote {
        /// HTTP status code, when the failure came from a response
        status: Option<u16>,
        /// Error message reported by the remote API
        message: String,
    },

    /// An asynchronous change resolved to the failure sentinel
    #[error("{what} status Failed")]
    ChangeFailed {
        /// Human readable description of the change being awaited
        what: String,
    },

    /// An asynchronous change did not reach its target state in time
    #[error("timeout while waiting for {what} to become '{target}' (last state: '{last_status}', timeout: {timeout:?})")]
    Timeout {
        /// Human readable description of the change being awaited
        what: String,
        /// Terminal state that was expected
        target: String,
        /// Last state observed before giving up
        last_status: String,
        /// Configured overall timeout
        timeout: Duration,
    },

    /// A remote failure wrapped with the lifecycle operation that hit it
    #[error("error {operation} {resource} ({id}): {source}")]
    Operation {
        /// Operation verb ("creating", "reading", ...)
        operation: &'static str,
        /// Resource kind ("group", "zone", "recordset")
        resource: &'static str,
        /// Identifier the operation was addressing
        id: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A resource or data source name that is not registered
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// Stored state could not be upgraded to the current schema version
    #[error("State migration error: {0}")]
    StateMigration(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a remote API error
    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a state migration error
    pub fn state_migration(msg: impl Into<String>) -> Self {
        Self::StateMigration(msg.into())
    }

    /// Wrap this error with the lifecycle operation and resource it belongs to
    pub fn in_operation(
        self,
        operation: &'static str,
        resource: &'static str,
        id: impl Into<String>,
    ) -> Self {
        Self::Operation {
            operation,
            resource,
            id: id.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through operation context wrappers
    pub fn root(&self) -> &Error {
        match self {
            Self::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the remote API reported the resource as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound(_))
    }

    /// Whether an awaited change resolved to the failure sentinel
    pub fn is_change_failed(&self) -> bool {
        matches!(self.root(), Self::ChangeFailed { .. })
    }

    /// Whether an awaited change ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self.root(), Self::Timeout { .. })
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_seen_through_context() {
        let err = Error::not_found("zone z1").in_operation("reading", "zone", "z1");

        assert!(err.is_not_found());
        assert!(!err.is_change_failed());
        assert_eq!(
            err.to_string(),
            "error reading zone (z1): Not found: zone z1"
        );
    }

    #[test]
    fn test_timeout_distinct_from_change_failed() {
        let timeout = Error::Timeout {
            what: "zone z1".to_string(),
            target: "Synced".to_string(),
            last_status: "Pending".to_string(),
            timeout: Duration::from_secs(1),
        };
        let failed = Error::ChangeFailed {
            what: "zone z1".to_string(),
        };

        assert!(timeout.is_timeout());
        assert!(!timeout.is_change_failed());
        assert!(failed.is_change_failed());
        assert!(!failed.is_timeout());
    }
}
