//! Error types for the warmline engine.
//!
//! Errors are split per domain. Transport and content errors are always
//! recovered locally (a failed cycle produces nothing); only startup
//! errors reach the process boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the messaging backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connect, timeout, body).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        /// Endpoint path the request was sent to.
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered but flagged the discovery call as unsuccessful.
    #[error("account discovery rejected by the backend")]
    Rejected,

    /// The backend answered with a non-success HTTP status.
    #[error("{endpoint} returned status {status}")]
    Status {
        /// Endpoint path the request was sent to.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The offending URL string.
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors from the on-disk content store.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A payload file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the payload file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A payload file is not a JSON array of strings.
    #[error("malformed payload file {path}: {source}")]
    Malformed {
        /// Path of the payload file.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the message journal.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The journal file could not be created or opened.
    #[error("failed to open journal at {path}: {source}")]
    Open {
        /// Path of the journal file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
