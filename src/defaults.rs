//! Default values shared by the client, the pages and the CLI.

/// HTTP defaults.
pub mod http {
    use std::time::Duration;

    /// Where the detection backend listens in the default deployment.
    pub const BASE_URL: &str = "http://localhost:8000";
    /// Request timeout. YouTube analysis scrapes comments server-side, so this is generous.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const USER_AGENT: &str = concat!("hatewatch/", env!("CARGO_PKG_VERSION"));
}

/// Environment variables read by `ClientConfig::from_env`.
pub mod env {
    pub const API_URL: &str = "HATEWATCH_API_URL";
    pub const TIMEOUT_SECS: &str = "HATEWATCH_TIMEOUT_SECS";
    pub const LOG_LEVEL: &str = "HATEWATCH_LOG_LEVEL";
    pub const LOG_FORMAT: &str = "HATEWATCH_LOG_FORMAT";
    pub const LOG_FILE: &str = "HATEWATCH_LOG_FILE";
}

/// Limits and defaults of the analysis pages.
pub mod analysis {
    /// Most texts the batch page sends in one request.
    pub const MAX_BATCH_SIZE: usize = 100;
    /// `max_comments` used by `analyze_youtube` when the caller does not pick one.
    pub const YOUTUBE_MAX_COMMENTS: u32 = 100;
    /// `max_comments` used by the analysis form for a video URL.
    pub const FORM_YOUTUBE_MAX_COMMENTS: u32 = 20;
    /// Number of hateful comments listed in the summary.
    pub const TOP_HATEFUL: usize = 5;
}

/// Monitoring page defaults.
pub mod monitoring {
    use std::time::Duration;

    pub const RECENT_LIMIT: u32 = 100;
    pub const RECENT_LIMIT_MIN: u32 = 50;
    pub const RECENT_LIMIT_MAX: u32 = 500;
    pub const RECENT_LIMIT_STEP: u32 = 50;
    /// Confidence drop (percent) above which the page flags an alert.
    pub const ALERT_THRESHOLD_PCT: f64 = 10.0;
    pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);
}
