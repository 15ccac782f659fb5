// Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Backend used when `CONVERTER_API_URL` is not set
pub const DEFAULT_API_URL: &str = "https://meuappback.discloud.app";

/// Network configuration for the HTTP backend
#[derive(Debug, Clone, Default)]
pub struct NetworkConfig {
    /// Proxy URL (e.g., "socks5h://127.0.0.1:1080" or "http://127.0.0.1:8080")
    pub proxy: Option<String>,

    /// Request timeout in seconds, `None` leaves requests unbounded
    pub timeout: Option<u32>,
}

/// Timing of the synthetic progress indicator
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Interval between progress increments
    pub tick: Duration,
    /// Upper bound (exclusive) of a single random increment
    pub max_increment: f32,
    /// Value the indicator never reaches while a download is in flight
    pub cap: f32,
    /// Pause after a download ends before the indicator resets
    pub completion_delay: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(500),
            max_increment: 5.0,
            cap: 95.0,
            completion_delay: Duration::from_millis(500),
        }
    }
}

/// Top-level client configuration
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Base URL of the conversion service, without the `/api` suffix
    pub api_base_url: String,
    pub network: NetworkConfig,
    /// Where converted files are saved
    pub download_dir: PathBuf,
    pub progress: ProgressConfig,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            network: NetworkConfig::default(),
            download_dir: default_download_dir(),
            progress: ProgressConfig::default(),
        }
    }
}

impl ConverterConfig {
    /// Defaults overridden by `CONVERTER_API_URL`, `CONVERTER_PROXY` and
    /// `CONVERTER_DOWNLOAD_DIR`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(url) = non_empty("CONVERTER_API_URL") {
            config.api_base_url = url;
        }
        config.network.proxy = non_empty("CONVERTER_PROXY");
        if let Some(dir) = non_empty("CONVERTER_DOWNLOAD_DIR") {
            config.download_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.network.proxy = proxy;
        self
    }

    pub fn with_timeout(mut self, seconds: Option<u32>) -> Self {
        self.network.timeout = seconds;
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn with_progress(mut self, progress: ProgressConfig) -> Self {
        self.progress = progress;
        self
    }
}

fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
