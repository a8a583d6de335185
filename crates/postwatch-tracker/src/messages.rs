//! Chat message text.

use postwatch_core::Creator;
use postwatch_source::PostSummary;

/// Canonical site URL of a post.
#[must_use]
pub fn post_url(site_base_url: &str, service: &str, creator_id: &str, post_id: &str) -> String {
    format!(
        "{}/{service}/user/{creator_id}/post/{post_id}",
        site_base_url.trim_end_matches('/')
    )
}

#[must_use]
pub fn new_post(site_base_url: &str, creator: &Creator, post: &PostSummary) -> String {
    let url = post_url(site_base_url, &creator.service, &creator.id, &post.id);
    format!(
        "🆕 New post from **{}**!\n**{}**\n{url}",
        creator.display_name, post.title
    )
}

#[must_use]
pub fn heartbeat() -> String {
    "✅ postwatch ran successfully — no new posts found.".to_owned()
}

#[must_use]
pub fn failure_alert(errors: usize, total: usize) -> String {
    format!("⚠️ postwatch: {errors} of {total} creators failed this cycle.")
}

#[must_use]
pub fn save_failure(location: &str) -> String {
    format!("⚠️ postwatch: failed to persist seen-state to {location}.")
}

#[must_use]
pub fn cycle_aborted() -> String {
    "🚨 postwatch: polling cycle aborted by an unexpected error; check the logs.".to_owned()
}
