use serde::Serialize;

/// Title used when a post has no usable `title` field.
pub const DEFAULT_TITLE: &str = "No Title";

/// The newest post in a creator's feed. Only `id` outlives the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
}
