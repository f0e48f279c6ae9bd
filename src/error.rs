//! Error types for Pelican API operations.

use thiserror::Error;

/// Errors that can occur during Pelican API operations.
#[derive(Debug, Error)]
pub enum PelicanError {
    /// Configuration is missing or invalid.
    #[error("Pelican configuration error: {0}")]
    Config(String),

    /// The configured server is not a valid URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The panel answered with a non-2xx status.
    #[error("unexpected status code: {status}, body: {body}, url: {url}")]
    Status {
        status: u16,
        body: String,
        url: String,
    },

    /// HTTP transport error (connect failure, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 2xx response body did not match the expected shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The envelope carried an unexpected object discriminator.
    #[error("unexpected object type: expected '{expected}', found '{found}'")]
    Envelope {
        expected: &'static str,
        found: String,
    },

    /// Pagination metadata is inconsistent across pages.
    #[error("inconsistent pagination metadata: {0}")]
    Pagination(String),

    /// A record could not be mapped to or from declarative state.
    #[error("state mapping error: {0}")]
    Mapping(String),
}

/// Coarse classification of [`PelicanError`].
///
/// Tells the caller whether credentials, the remote service, or the schema
/// mapping is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid credentials or endpoint.
    Config,
    /// Network failure or non-2xx status.
    Transport,
    /// Malformed body, envelope, pagination metadata or mapping gap.
    Decode,
    /// 404 on a by-identifier fetch.
    NotFound,
}

impl PelicanError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Url(_) => ErrorKind::Config,
            Self::Status { .. } | Self::Http(_) => ErrorKind::Transport,
            Self::Decode { .. }
            | Self::Envelope { .. }
            | Self::Pagination(_)
            | Self::Mapping(_) => ErrorKind::Decode,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// HTTP status code associated with this error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

/// Result type alias for Pelican operations.
pub type Result<T> = core::result::Result<T, PelicanError>;
