/*!
 * Error types for the yaptai application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
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

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Classify an unsuccessful HTTP response into the provider error taxonomy
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            429 => Self::RateLimitExceeded(message),
            401 | 403 => Self::AuthenticationError(message),
            s if s >= 500 => Self::ConnectionError(format!("server error ({}): {}", s, message)),
            _ => Self::ApiError {
                status_code,
                message,
            },
        }
    }

    /// Whether a retry with backoff can reasonably succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded(_) | Self::ConnectionError(_) | Self::RequestFailed(_)
        )
    }
}

/// Errors that can occur while extracting text from the source PDF
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Requested page range falls outside the document
    #[error("invalid page range {start}..={end}: document has {page_count} page(s)")]
    InvalidRange {
        /// First requested page (1-indexed)
        start: u32,
        /// Last requested page (inclusive)
        end: u32,
        /// Number of pages in the document
        page_count: u32,
    },

    /// The file could not be parsed as a PDF
    #[error("unreadable PDF {path}: {reason}")]
    UnreadablePdf {
        /// Path to the offending file
        path: PathBuf,
        /// Underlying parser message
        reason: String,
    },
}

/// Errors related to application configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The active provider requires an API credential and none was found
    #[error(
        "missing API credential for provider '{provider}': set api_key in the config file or the {env_var} environment variable"
    )]
    MissingCredential {
        /// Provider display name
        provider: String,
        /// Environment variable consulted as fallback
        env_var: String,
    },

    /// Any other invalid configuration value
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider returned no usable text
    #[error("provider returned an empty response")]
    EmptyResponse,

    /// Terminal per-page failure, after retries were exhausted
    #[error("translation of page {page_number} failed after {attempts} attempt(s): {source}")]
    PageFailed {
        /// 1-indexed page that failed
        page_number: u32,
        /// Total attempts made
        attempts: u32,
        /// Last provider error seen
        #[source]
        source: ProviderError,
    },
}

impl TranslationError {
    /// Attach page context to a failure, marking it terminal
    pub fn into_page_failure(self, page_number: u32, attempts: u32) -> Self {
        match self {
            Self::Provider(source) => Self::PageFailed {
                page_number,
                attempts,
                source,
            },
            Self::EmptyResponse => Self::PageFailed {
                page_number,
                attempts,
                source: ProviderError::ParseError("empty response".to_string()),
            },
            terminal @ Self::PageFailed { .. } => terminal,
        }
    }

    /// The page carried by a terminal failure, if any
    pub fn page_number(&self) -> Option<u32> {
        match self {
            Self::PageFailed { page_number, .. } => Some(*page_number),
            _ => None,
        }
    }
}

/// Errors that can occur while writing output artifacts
#[derive(Error, Debug)]
pub enum OutputError {
    /// The output directory or a file in it could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The derived PDF could not be rendered
    #[error("failed to render output PDF: {0}")]
    Render(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration loading or validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from PDF text extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from output writing
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

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
