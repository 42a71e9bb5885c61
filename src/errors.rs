/*!
 * Error types for the videobook application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while parsing timed-text input.
///
/// These are input errors in the pipeline's taxonomy: any of them aborts
/// the run before a document is written.
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The line preceding a timestamp line could not be parsed as a cue index
    #[error("Malformed cue index at line {line}: {content:?}")]
    MalformedCueIndex {
        /// 1-based line number of the offending line
        line: usize,
        /// The line content that failed to parse as an integer
        content: String,
    },

    /// A timestamp line appeared with no buffered line to serve as its index
    #[error("Timestamp line at line {line} has no preceding index line")]
    MissingCueIndex {
        /// 1-based line number of the timestamp line
        line: usize,
    },
}

/// Errors that can occur during frame capture.
///
/// Capture errors are recoverable at the pipeline level: they are reported
/// per chapter and never abort the conversion.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The capture tool could not be launched at all
    #[error("Failed to launch frame capture tool: {0}")]
    Launch(String),

    /// The capture tool ran but reported failure
    #[error("Frame capture tool failed: {0}")]
    Tool(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from timed-text parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from frame capture
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
