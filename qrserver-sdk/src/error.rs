// ABOUTME: Custom error types for the qrserver SDK with user-friendly messages
// ABOUTME: Covers invalid input text, HTTP failures and image download problems

use crate::options::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("Rate limit exceeded. Please wait before making more requests")]
    RateLimit,

    #[error("Rendering service error (HTTP {0})")]
    Server(u16),

    #[error("HTTP request failed with status {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: u64, max: u64 },

    #[error("Response is not an image (content-type: {0})")]
    NotAnImage(String),

    #[error("Downloaded data is not a valid {format} image ({size} bytes)")]
    FormatMismatch { format: Format, size: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QrError {
    pub fn invalid_input(input: impl Into<String>, reason: impl ToString) -> Self {
        QrError::InvalidInput {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            QrError::InvalidInput { .. } => {
                Some("Enter an absolute URL including the scheme, e.g. https://example.com")
            }
            QrError::Network(_) => Some("Check your internet connection and try again"),
            QrError::RateLimit => Some("Wait a moment before making another request"),
            QrError::Timeout => Some("Try again or check your network connection"),
            QrError::Server(_) => Some("The rendering service is having trouble, try again later"),
            QrError::ImageTooLarge { .. } => {
                Some("Raise the limit with QRGEN_MAX_IMAGE_SIZE (e.g. 50MB) or request a smaller size")
            }
            QrError::FormatMismatch { .. } => {
                Some("The service answered with something else, check api_url and the requested format")
            }
            QrError::Configuration(_) => Some("Check api_url in your qrgen config or QRGEN_API_URL"),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            QrError::Network(_) | QrError::Timeout | QrError::RateLimit | QrError::Server(_)
        )
    }

    /// Map a non-success HTTP status to an error
    pub fn from_status(status: u16, url: &str) -> Self {
        match status {
            429 => QrError::RateLimit,
            500..=599 => QrError::Server(status),
            _ => QrError::HttpStatus {
                status,
                url: url.to_string(),
            },
        }
    }

    pub fn too_large(size: u64, max: u64) -> Self {
        QrError::ImageTooLarge { size, max }
    }
}

impl From<reqwest::Error> for QrError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QrError::Timeout
        } else if err.is_builder() {
            QrError::Configuration(err.to_string())
        } else if let Some(status) = err.status() {
            let url = err.url().map(|u| u.to_string()).unwrap_or_default();
            QrError::from_status(status.as_u16(), &url)
        } else {
            QrError::Network(err.to_string())
        }
    }
}
