//! Error types for the store and configuration seams.
//!
//! Only [`SessionStore`](crate::store::SessionStore) implementations surface
//! [`StoreError`]; the facade logs failures and degrades them to boolean or
//! absent results.

use thiserror::Error;

/// Failure inside a session store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure.
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted record could not be encoded or decoded.
    #[error("session record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The identifier is not usable by this store.
    #[error("invalid session id {id:?}: {reason}")]
    InvalidId { id: String, reason: &'static str },

    /// Backend-specific failure.
    #[error("session store backend error: {0}")]
    Backend(String),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure while loading a configuration file.
#[cfg(feature = "toml-config")]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
}
