//! Webhook delivery.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::NotifyError;
use crate::payload::WebhookPayload;

/// Longest slice of an error response body kept for logs.
const MAX_LOGGED_BODY_CHARS: usize = 500;

/// Sends chat messages to a single webhook URL.
///
/// A notifier without a URL is valid: every call logs and returns failure
/// without touching the network.
pub struct WebhookNotifier {
    webhook_url: Option<String>,
    client: Client,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        webhook_url: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        if webhook_url.is_some() {
            tracing::debug!("webhook notifications enabled");
        } else {
            tracing::warn!("webhook URL not set; notifications will be logged only");
        }

        Ok(Self {
            webhook_url,
            client,
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Delivers `message`, returning `true` iff the webhook answered 204.
    /// Every failure is logged here; callers only count it.
    pub async fn notify(&self, message: &str, urgent: bool) -> bool {
        match self.try_notify(message, urgent).await {
            Ok(()) => {
                tracing::info!(urgent, "webhook message sent");
                true
            }
            Err(NotifyError::MissingWebhookUrl) => {
                tracing::error!(urgent, content = %message, "webhook URL not set; message not sent");
                false
            }
            Err(e) => {
                tracing::error!(urgent, error = %e, "failed to send webhook message");
                false
            }
        }
    }

    /// Like [`WebhookNotifier::notify`] but returns the reason for failure.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::MissingWebhookUrl`] without sending anything.
    /// - [`NotifyError::Http`] on network failure or timeout.
    /// - [`NotifyError::UnexpectedStatus`] for any status other than 204,
    ///   carrying the (truncated) response body.
    pub async fn try_notify(&self, message: &str, urgent: bool) -> Result<(), NotifyError> {
        let Some(url) = self.webhook_url.as_deref() else {
            return Err(NotifyError::MissingWebhookUrl);
        };

        let payload = WebhookPayload::new(message, urgent);
        let response = self.client.post(url).json(&payload).send().await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotifyError::UnexpectedStatus {
            status: status.as_u16(),
            body: body.chars().take(MAX_LOGGED_BODY_CHARS).collect(),
        })
    }
}
