//! Production wiring.

use std::time::Duration;

use postwatch_core::{AppConfig, Creator};
use postwatch_notify::WebhookNotifier;
use postwatch_source::{PostSourceClient, RetryPolicy};
use postwatch_store::JsonFileStore;

use crate::cycle::{CycleConfig, CycleRunner};
use crate::error::TrackerError;

/// A runner backed by the HTTP post source, the chat webhook and the JSON
/// state file.
pub type DefaultRunner = CycleRunner<PostSourceClient, WebhookNotifier, JsonFileStore>;

/// Builds a [`DefaultRunner`] from process configuration.
///
/// # Errors
///
/// Returns [`TrackerError`] if either HTTP client cannot be constructed or
/// the API base URL is invalid.
pub fn build_runner(
    config: &AppConfig,
    creators: Vec<Creator>,
) -> Result<DefaultRunner, TrackerError> {
    let retry = RetryPolicy::new(config.max_attempts, Duration::from_secs(config.retry_delay_secs));
    let source = PostSourceClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        retry,
    )?;
    let notifier = WebhookNotifier::new(
        config.webhook_url.clone(),
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let store = JsonFileStore::new(config.state_path.clone());

    tracing::info!(
        creators = creators.len(),
        api = %config.api_base_url,
        state = %config.state_path.display(),
        notifications = notifier.is_configured(),
        "tracker configured"
    );

    Ok(CycleRunner::new(
        CycleConfig::from_app_config(config, creators),
        source,
        notifier,
        store,
    ))
}
