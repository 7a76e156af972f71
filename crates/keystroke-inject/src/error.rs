//! Error types for keystroke-inject.

use thiserror::Error;

use crate::protocol::InjectKey;

/// The error type for key-synthesis and protocol operations.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The platform backend failed to initialize.
    #[error("failed to initialize keyboard synthesis backend: {0}")]
    BackendInit(String),

    /// The OS injection call itself failed or was only partially applied.
    #[error("OS keyboard injection failed: {0}")]
    Os(String),

    /// A key was requested that this platform's backend does not support.
    #[error("key {0:?} is not supported on this platform")]
    UnsupportedKey(InjectKey),

    /// A `^x` chord referenced a letter outside `a-z`.
    #[error("control chord '{0}' is out of the supported a-z range")]
    InvalidChord(char),
}

/// A specialized `Result` for keystroke-inject operations.
pub type Result<T> = std::result::Result<T, InjectError>;
