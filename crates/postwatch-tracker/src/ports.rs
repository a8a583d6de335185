//! Seams between the cycle runner and the outside world.

use std::future::Future;

use postwatch_notify::WebhookNotifier;
use postwatch_source::{PostSourceClient, PostSummary, SourceError};
use postwatch_store::{JsonFileStore, SeenState};

/// Where the newest post for a creator comes from.
pub trait PostSource: Send + Sync {
    /// `Ok(None)` means the feed exists but is empty.
    fn fetch_latest(
        &self,
        service: &str,
        creator_id: &str,
    ) -> impl Future<Output = Result<Option<PostSummary>, SourceError>> + Send;
}

/// Outbound chat messages. Returns whether delivery was acknowledged.
pub trait Notify: Send + Sync {
    fn notify(&self, message: &str, urgent: bool) -> impl Future<Output = bool> + Send;
}

/// Durable seen-state. `load` fails open, `save` reports success.
pub trait StateStore: Send + Sync {
    fn load(&self) -> SeenState;
    fn save(&self, state: &SeenState) -> bool;
    /// Human-readable location used in alerts.
    fn location(&self) -> String;
}

impl PostSource for PostSourceClient {
    fn fetch_latest(
        &self,
        service: &str,
        creator_id: &str,
    ) -> impl Future<Output = Result<Option<PostSummary>, SourceError>> + Send {
        PostSourceClient::fetch_latest(self, service, creator_id)
    }
}

impl Notify for WebhookNotifier {
    fn notify(&self, message: &str, urgent: bool) -> impl Future<Output = bool> + Send {
        WebhookNotifier::notify(self, message, urgent)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> SeenState {
        JsonFileStore::load(self)
    }

    fn save(&self, state: &SeenState) -> bool {
        JsonFileStore::save(self, state)
    }

    fn location(&self) -> String {
        self.path().display().to_string()
    }
}
