//! Error types for the catalog client.
//!
//! # Design
//! `FetchError` is the raw failure descriptor an operation produces before
//! classification: no response at all, a non-success status, or a payload
//! that could not be encoded or decoded. It carries no user-facing meaning;
//! that interpretation lives in [`crate::classify`].

use thiserror::Error;

/// Raw failure surfaced by a network operation, prior to classification.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// No response was received at all.
    #[error("no response received: {0}")]
    Network(String),

    /// The server responded with a non-success status for this operation.
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded into the expected type.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The request payload could not be encoded.
    #[error("could not encode request: {0}")]
    Encode(String),
}
