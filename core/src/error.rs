//! Error types for the drug catalog client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because detail views render a distinct
//! "not found" state. All other non-2xx responses land in `Http` with the raw
//! status code and body for debugging. `Transport` covers round-trips that
//! never produced a response at all.

use thiserror::Error;

/// Errors returned by `CatalogClient` parse methods and `Gateway` lookups.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested entity does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors raised while resolving gateway configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL {0:?}: expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// A filter value that is not one of the recognized wire spellings.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct ParseFilterError {
    pub kind: &'static str,
    pub value: String,
}
