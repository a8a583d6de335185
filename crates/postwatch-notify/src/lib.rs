//! Chat webhook notifier.
//!
//! Posts `{"content", "allowed_mentions"}` payloads and treats only
//! `204 No Content` as delivered.

pub mod error;
pub mod payload;
pub mod webhook;

pub use error::NotifyError;
pub use payload::{AllowedMentions, WebhookPayload, BROADCAST_MENTION, MAX_CONTENT_CHARS};
pub use webhook::WebhookNotifier;
