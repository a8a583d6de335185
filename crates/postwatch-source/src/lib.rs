//! Client for a content site's per-creator post listing API.
//!
//! [`PostSourceClient::fetch_latest`] issues `GET {base}/{service}/user/{id}`,
//! retries network-class failures on a fixed delay, and returns the newest
//! post (or `None` for an empty feed).

pub mod client;
pub mod error;
pub mod parse;
pub mod retry;
pub mod types;

pub use client::PostSourceClient;
pub use error::{ErrorKind, SourceError};
pub use parse::parse_latest_post;
pub use retry::RetryPolicy;
pub use types::{PostSummary, DEFAULT_TITLE};
