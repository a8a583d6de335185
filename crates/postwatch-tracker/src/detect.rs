//! Per-creator change detection.

use postwatch_source::PostSummary;

/// What one successful fetch means for a creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The feed has no posts. Nothing to record.
    EmptyFeed,
    /// No stored id yet: adopt the current post silently. Covers both a
    /// newly added creator and a lost state file.
    BaselineAdopted(PostSummary),
    /// The newest post differs from the stored one.
    NewPost(PostSummary),
    /// The newest post is the stored one.
    Unchanged,
}

impl Transition {
    /// The post id to store, if this transition changes the seen-state.
    #[must_use]
    pub fn recorded_id(&self) -> Option<&str> {
        match self {
            Transition::BaselineAdopted(post) | Transition::NewPost(post) => Some(&post.id),
            Transition::EmptyFeed | Transition::Unchanged => None,
        }
    }
}

/// Compares the stored id for a creator with the newest fetched post.
#[must_use]
pub fn detect(stored: Option<&str>, latest: Option<PostSummary>) -> Transition {
    match (stored, latest) {
        (_, None) => Transition::EmptyFeed,
        (None, Some(post)) => Transition::BaselineAdopted(post),
        (Some(seen), Some(post)) if seen == post.id => Transition::Unchanged,
        (Some(_), Some(post)) => Transition::NewPost(post),
    }
}
