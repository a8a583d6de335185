use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, read once at startup and passed down explicitly.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// `None` degrades every notification to a logged no-op.
    pub webhook_url: Option<String>,
    pub creators_path: PathBuf,
    pub state_path: PathBuf,
    pub api_base_url: String,
    pub site_base_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_attempts: u32,
    pub retry_delay_secs: u64,
    pub inter_request_delay_ms: u64,
    pub notify_delay_ms: u64,
    pub failure_alert_ratio: f64,
    pub persist_each_update: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "webhook_url",
                &self.webhook_url.as_ref().map(|_| "[redacted]"),
            )
            .field("creators_path", &self.creators_path)
            .field("state_path", &self.state_path)
            .field("api_base_url", &self.api_base_url)
            .field("site_base_url", &self.site_base_url)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay_secs", &self.retry_delay_secs)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("notify_delay_ms", &self.notify_delay_ms)
            .field("failure_alert_ratio", &self.failure_alert_ratio)
            .field("persist_each_update", &self.persist_each_update)
            .finish()
    }
}
