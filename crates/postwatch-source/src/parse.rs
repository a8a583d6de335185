//! Extraction of the newest post from a listing response body.

use serde_json::Value;

use crate::error::SourceError;
use crate::types::{PostSummary, DEFAULT_TITLE};

/// Returns the first (newest) post of a listing, or `None` for an empty array.
///
/// `id` may be a JSON string or number; anything else, or a missing `id`,
/// is a [`SourceError::MalformedPost`]. A missing, null, or non-string
/// `title` becomes [`DEFAULT_TITLE`].
///
/// # Errors
///
/// Returns [`SourceError::MalformedPost`] if the body is not an array of
/// objects or the first object has no usable `id`.
pub fn parse_latest_post(body: &Value, context: &str) -> Result<Option<PostSummary>, SourceError> {
    let malformed = |reason: &str| SourceError::MalformedPost {
        context: context.to_owned(),
        reason: reason.to_owned(),
    };

    let posts = body
        .as_array()
        .ok_or_else(|| malformed("expected a JSON array of posts"))?;

    let Some(first) = posts.first() else {
        return Ok(None);
    };

    let post = first
        .as_object()
        .ok_or_else(|| malformed("first post is not a JSON object"))?;

    let id = match post.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(_)) => return Err(malformed("post id is empty")),
        Some(_) => return Err(malformed("post id is neither a string nor a number")),
        None => return Err(malformed("post has no id field")),
    };

    let title = post
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TITLE)
        .to_owned();

    Ok(Some(PostSummary { id, title }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn returns_first_post_only() {
        let body = json!([
            {"id": "200", "title": "Newest"},
            {"id": "199", "title": "Older"}
        ]);
        let post = parse_latest_post(&body, "patreon/1").unwrap().unwrap();
        assert_eq!(post.id, "200");
        assert_eq!(post.title, "Newest");
    }

    #[test]
    fn empty_array_is_none() {
        assert_eq!(parse_latest_post(&json!([]), "patreon/1").unwrap(), None);
    }

    #[test]
    fn numeric_id_is_stringified() {
        let post = parse_latest_post(&json!([{"id": 12345, "title": "t"}]), "c")
            .unwrap()
            .unwrap();
        assert_eq!(post.id, "12345");
    }

    #[test]
    fn missing_title_defaults() {
        let post = parse_latest_post(&json!([{"id": "1"}]), "c").unwrap().unwrap();
        assert_eq!(post.title, DEFAULT_TITLE);
    }

    #[test]
    fn null_title_defaults() {
        let post = parse_latest_post(&json!([{"id": "1", "title": null}]), "c")
            .unwrap()
            .unwrap();
        assert_eq!(post.title, DEFAULT_TITLE);
    }

    #[test]
    fn missing_id_is_malformed() {
        let err = parse_latest_post(&json!([{"title": "no id"}]), "c").unwrap_err();
        assert!(matches!(err, SourceError::MalformedPost { ref reason, .. } if reason.contains("no id")));
    }

    #[test]
    fn object_id_is_malformed() {
        let err = parse_latest_post(&json!([{"id": {"x": 1}}]), "c").unwrap_err();
        assert!(matches!(err, SourceError::MalformedPost { .. }));
    }

    #[test]
    fn blank_string_id_is_malformed() {
        let err = parse_latest_post(&json!([{"id": "  "}]), "c").unwrap_err();
        assert!(matches!(err, SourceError::MalformedPost { .. }));
    }

    #[test]
    fn non_array_body_is_malformed() {
        let err = parse_latest_post(&json!({"error": "not found"}), "c").unwrap_err();
        assert!(matches!(err, SourceError::MalformedPost { .. }));
    }
}
