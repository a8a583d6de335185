use serde::Serialize;

/// Prefix that pings every member of the channel.
pub const BROADCAST_MENTION: &str = "@everyone";

/// The webhook backend rejects messages longer than this.
pub const MAX_CONTENT_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub content: String,
    pub allowed_mentions: AllowedMentions,
}

/// Mention types the backend may resolve. An empty list suppresses every
/// ping, including a literal `@everyone` in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowedMentions {
    pub parse: Vec<&'static str>,
}

impl WebhookPayload {
    /// Urgent messages get the broadcast prefix and the matching permission,
    /// otherwise the backend silently drops the ping.
    #[must_use]
    pub fn new(message: &str, urgent: bool) -> Self {
        let content = if urgent {
            format!("{BROADCAST_MENTION}\n{message}")
        } else {
            message.to_owned()
        };
        let parse = if urgent { vec!["everyone"] } else { Vec::new() };

        Self {
            content: truncate_chars(&content, MAX_CONTENT_CHARS),
            allowed_mentions: AllowedMentions { parse },
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
