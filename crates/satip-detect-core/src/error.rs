//! Error types for SAT>IP detection.

use std::net::SocketAddr;

use thiserror::Error;

/// Core error type for a detection round.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Discovery socket errors. Only these abort a round.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to create discovery socket: {0}")]
    Socket(#[source] std::io::Error),

    #[error("Failed to set socket option {option}: {source}")]
    SocketOption {
        option: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to bind discovery socket to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to send discovery query to {addr}: {source}")]
    Send {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Description document fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client error: {0}")]
    Client(String),

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Description document parse errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Missing required element: {0}")]
    MissingField(&'static str),
}

/// Failure to turn one candidate URL into a device record.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to parse description from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
