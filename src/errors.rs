/*!
 * Error types for the srtai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to a model provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while resolving a translation model for a language pair
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No catalog entry matched any naming pattern for the language pair
    #[error("no translation model found for {src} -> {tgt}")]
    ModelNotFound {
        /// Source language code
        src: String,
        /// Target language code
        tgt: String,
    },

    /// Catalog unreachable, or the matched model could not be loaded
    #[error("failed to load translation model {model}: {source}")]
    ModelLoad {
        /// The model being loaded, or "catalog" when the listing itself failed
        model: String,
        /// The underlying provider error
        source: ProviderError,
    },
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The input is not a well-formed SRT document
    #[error("invalid SRT at line {line}: {reason}")]
    Parse {
        /// 1-based line number where parsing failed
        line: usize,
        /// What was wrong with it
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error resolving the translation model
    #[error("Model resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Error parsing the subtitle document
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error reading the input file
    #[error("Read error: {0}")]
    Read(String),

    /// Error writing the output file
    #[error("Write error: {0}")]
    Write(String),

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
