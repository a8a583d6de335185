use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// No webhook URL is configured; nothing was sent.
    #[error("webhook URL is not configured")]
    MissingWebhookUrl,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with anything other than 204.
    #[error("webhook returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}
