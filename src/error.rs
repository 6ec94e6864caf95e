// Error taxonomy. Every variant's `Display` output is the exact message
// the front-end shows to the user, so the controller can store
// `err.to_string()` in an error channel without further formatting.

use std::path::PathBuf;
use thiserror::Error;

/// Missing or invalid local input. Raised before any request is built,
/// so these never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("Please enter a URL")]
    MissingUrl,

    #[error("Please enter the correct link!")]
    InvalidUrl,

    #[error("Please enter an alias")]
    MissingAlias,

    #[error("Please enter both current and new alias")]
    MissingRenameAliases,
}

/// Business conditions the service reports through a specific status code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("This alias is already taken. Please choose another one.")]
    AliasTaken,

    #[error("New alias must be different")]
    SameAlias,

    #[error("Alias \"{0}\" not found")]
    NotFound(String),

    #[error("Alias \"{0}\" already exists")]
    Conflict(String),
}

/// Failure of a dispatched operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// The service understood the request and refused it.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Unknown or 5xx failure, or a response we could not use.
    #[error("{0}")]
    Service(String),

    /// No response was obtained.
    #[error("{0}")]
    Network(String),
}

impl OperationError {
    pub fn service(message: impl Into<String>) -> Self {
        OperationError::Service(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        OperationError::Network(message.into())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL: {0:?}")]
    InvalidBaseUrl(String),

    #[error("Invalid SHORTLINK_TIMEOUT_SECS value: {0:?}")]
    InvalidTimeout(String),

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Host capability failure (clipboard access).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Clipboard unavailable: {0}")]
pub struct HostError(pub String);
