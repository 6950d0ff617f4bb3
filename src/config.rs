use std::env;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_MAX_COUNT: u32 = 6;

/// Timeouts applied to requests against the hairstyle service, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutConfig {
    pub connect_secs: u64,
    pub single_secs: u64,
    pub stream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        TimeoutConfig {
            connect_secs: 10,
            single_secs: 300,
            stream_secs: 600,
        }
    }
}

impl TimeoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connect(mut self, secs: u64) -> Self {
        self.connect_secs = secs;
        self
    }

    pub fn with_single(mut self, secs: u64) -> Self {
        self.single_secs = secs;
        self
    }

    pub fn with_stream(mut self, secs: u64) -> Self {
        self.stream_secs = secs;
        self
    }
}

#[derive(Debug, Clone)]
pub struct StudioConfig {
    base_url: String,
    pub max_count: u32,
    pub timeouts: TimeoutConfig,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_count: DEFAULT_MAX_COUNT,
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("STUDIO_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let max_count = env::var("STUDIO_MAX_COUNT")
            .ok()
            .and_then(|count| count.parse().ok())
            .unwrap_or(DEFAULT_MAX_COUNT);

        StudioConfig {
            base_url: strip_trailing_slashes(&base_url),
            max_count,
            timeouts: TimeoutConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = strip_trailing_slashes(&base_url.into());
        self
    }

    pub fn with_max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the single-shot generation endpoint.
    pub fn single_url(&self) -> String {
        format!("{}/hairstyle", self.base_url)
    }

    /// URL of the streaming variants endpoint.
    pub fn stream_url(&self) -> String {
        format!("{}/hairstyles/stream", self.base_url)
    }
}

fn strip_trailing_slashes(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
