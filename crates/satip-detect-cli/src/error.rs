//! Error types for the satip-detect CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use satip_detect_core::error::CoreError;
use thiserror::Error;

pub use satip_detect_core::error::{FetchError, ResolveError, TransportError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const DEVICE_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(e) => match e {
                CoreError::Transport(_) => exit_codes::NETWORK_ERROR,
                CoreError::Fetch(_) => exit_codes::GENERAL_ERROR,
            },
            CliError::Resolve(_) => exit_codes::DEVICE_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
        }
    }
}

impl From<TransportError> for CliError {
    fn from(e: TransportError) -> Self {
        CliError::Core(CoreError::Transport(e))
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Core(CoreError::Fetch(e))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
