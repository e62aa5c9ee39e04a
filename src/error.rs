//! Errors raised by the terminal runner.
//!
//! Widget and layout operations are infallible; only talking to the real
//! terminal can fail.

use std::io;

/// Failures from terminal setup, input polling and frame output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading from or writing to the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The input thread could not be started.
    #[error("failed to spawn input thread: {0}")]
    SpawnInput(#[source] io::Error),

    /// The input thread went away while the application was still running.
    #[error("input channel disconnected")]
    InputDisconnected,
}

/// Result alias for runner operations.
pub type Result<T> = std::result::Result<T, Error>;
