use thiserror::Error;

/// Errors returned by [`crate::PostSourceClient`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or TLS failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body is not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body is JSON but not the expected newest-first post array.
    #[error("malformed post listing for {context}: {reason}")]
    MalformedPost { context: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Coarse classification used by the retry policy and run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transient: timeouts, connection failures, non-2xx responses.
    Network,
    /// Persistent: the response shape is wrong; retrying will not help.
    Data,
}

impl SourceError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::Http(_) | SourceError::UnexpectedStatus { .. } => ErrorKind::Network,
            SourceError::Deserialize { .. }
            | SourceError::MalformedPost { .. }
            | SourceError::InvalidBaseUrl { .. } => ErrorKind::Data,
        }
    }

    #[must_use]
    pub fn is_retriable(&self) -> bool {
        self.kind() == ErrorKind::Network
    }
}
