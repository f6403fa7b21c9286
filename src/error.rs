//! Error types for Mailinator operations
//!
//! Four fault kinds flow through the crate unmodified; only the two transport
//! adapters translate them (process exit codes for the CLI, JSON-RPC error
//! codes for the MCP server).

use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum Error {
    /// Bad input shape, detected before any network call
    #[error("{0}")]
    Validation(String),

    /// Mailinator API failure (HTTP error status or network fault)
    #[error("{message}")]
    Api {
        /// Human-readable description
        message: String,
        /// HTTP status code, absent for network-level faults
        status: Option<u16>,
        /// Raw error payload from the API, when one was returned
        body: Option<serde_json::Value>,
    },

    /// Missing or invalid local listing-cache state
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Token persistence problem, treated as a non-fatal warning by the CLI
    #[error("{0}")]
    Config(String),
}

/// Listing-cache failures
///
/// A cache miss (no listing recorded yet) is distinct from an out-of-range
/// listing number so callers get an actionable message either way.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("no cached inbox found, run the \"inbox\" command first to list emails")]
    Miss,

    #[error("no email found at position {n}, valid range: {min}-{max}")]
    OutOfRange { n: u64, min: u64, max: u64 },

    #[error("cache store failure: {0}")]
    Store(String),
}

/// Result type alias for Mailinator operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Process exit code for the CLI adapter
    ///
    /// Config faults exit 0: a broken token file is a warning, not a reason
    /// to fail the command.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) => 1,
            Error::Api { .. } => 2,
            Error::Cache(_) => 3,
            Error::Config(_) => 0,
        }
    }
}
