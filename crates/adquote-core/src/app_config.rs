use thiserror::Error;

/// Errors from loading the application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Application configuration, sourced from `ADQUOTE_*` env vars.
#[derive(Clone)]
pub struct AppConfig {
    /// YouTube Data API v3 key. Required: no key, no statistics.
    pub youtube_api_key: String,
    /// Gemini API key. Optional: absent means the brand-safety
    /// assessment is simply unavailable, never an error.
    pub gemini_api_key: Option<String>,
    pub log_level: String,
    /// Per-request timeout for statistics calls, seconds.
    pub youtube_timeout_secs: u64,
    /// Timeout for the single narrative-generation call, seconds.
    pub safety_timeout_secs: u64,
    /// CPM rate in currency units per 1,000 views.
    pub cpm_rate: u64,
    /// Size of the recent-video sample.
    pub max_videos: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("youtube_api_key", &"[redacted]")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("youtube_timeout_secs", &self.youtube_timeout_secs)
            .field("safety_timeout_secs", &self.safety_timeout_secs)
            .field("cpm_rate", &self.cpm_rate)
            .field("max_videos", &self.max_videos)
            .finish()
    }
}
