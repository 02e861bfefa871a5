//! Error types for nameip.
//!
//! This module provides the workspace-wide error hierarchy using `thiserror`.
//! All errors include context and are designed to be actionable.

use thiserror::Error;

use crate::types::EntityKind;

/// Result type alias using `NameIpError`.
pub type Result<T> = std::result::Result<T, NameIpError>;

/// Main error type for all nameip operations.
#[derive(Debug, Error)]
pub enum NameIpError {
    // ═══════════════════════════════════════════════════════════════════════════
    // RESOLUTION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// No lookup variant could produce an address for the key.
    #[error("IP lookup failed for '{key}'")]
    IpLookupFailed {
        /// Composite cache key of the failed lookup.
        key: String,
    },

    /// The named entity does not exist in its collection.
    #[error("{kind} '{name}' not found")]
    EntityNotFound {
        /// Collection the entity was searched in.
        kind: EntityKind,
        /// Name that failed to resolve.
        name: String,
    },

    /// A lookup string carried an unrecognized kind prefix.
    #[error("Unknown entity kind: {0}")]
    InvalidEntityKind(String),

    /// A host's configured management address is not an IPv4 literal.
    #[error("Address '{address}' of host '{name}' is not an IPv4 literal")]
    InvalidHostAddress {
        /// Host whose address failed to parse.
        name: String,
        /// The configured management address.
        address: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // INJECTION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Neither the address parameter nor the name parameter was supplied.
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A MAC address string failed to parse.
    #[error("Invalid MAC address: {0}")]
    InvalidMacAddress(String),

    /// A cache reset pattern failed to compile.
    #[error("Invalid reset pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // ENGINE TRANSPORT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// The engine answered with a non-success status.
    #[error("Engine API error (HTTP {status}): {body}")]
    ApiError {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl NameIpError {
    /// Returns true if the error reports a missing entity.
    ///
    /// The multi-variant dispatcher uses this to keep trying other kinds.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NameIpError::EntityNotFound { .. })
    }

    /// Returns true if the error is a failed (but well-formed) resolution.
    ///
    /// Together with [`is_not_found`](Self::is_not_found) these are the
    /// non-fatal outcomes during multi-variant dispatch.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            NameIpError::IpLookupFailed { .. } | NameIpError::InvalidHostAddress { .. }
        )
    }

    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        match self {
            NameIpError::HttpError(_) => true,
            NameIpError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
