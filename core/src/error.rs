//! Error types for the CRUD client.
//!
//! # Design
//! `ApiError` covers one round trip: transport failure, non-2xx status, or a
//! body that does not decode. `NotFound` keeps its own variant so callers can
//! tell a missing record apart from any other rejected status.
//!
//! `StoreError` wraps an `ApiError` with the stage that failed. A failed
//! mutation never triggers a refresh, so `Mutation` means the server state is
//! unknown, while `Refresh` means the mutation went through but the stored
//! list is stale.

use thiserror::Error;

/// Errors returned by the request builder, the response parser and transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Which mutating call a [`StoreError::Mutation`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationKind::Create => f.write_str("create"),
            MutationKind::Update => f.write_str("update"),
            MutationKind::Delete => f.write_str("delete"),
        }
    }
}

/// Errors returned by collection store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{op} {collection} failed: {source}")]
    Mutation {
        op: MutationKind,
        collection: &'static str,
        #[source]
        source: ApiError,
    },

    #[error("refreshing {collection}s failed: {source}")]
    Refresh {
        collection: &'static str,
        #[source]
        source: ApiError,
    },
}

impl StoreError {
    /// The underlying round-trip error.
    pub fn api_error(&self) -> &ApiError {
        match self {
            StoreError::Mutation { source, .. } | StoreError::Refresh { source, .. } => source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading a [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),

    #[error("invalid timeout '{0}': expected a whole number of seconds")]
    InvalidTimeout(String),
}
