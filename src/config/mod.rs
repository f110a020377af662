//! Configuration management.
//!
//! Settings come from built-in defaults, an optional TOML file and
//! `SCHOLAR_PROFILE_*` environment variables, in increasing precedence.
//!
//! ```toml
//! base_url = "https://scholar.google.com"
//! request_timeout_secs = 30
//! referer = "https://scholar.google.com/"
//!
//! [extra_headers]
//! accept-language = "en-US,en;q=0.9"
//!
//! [cookies]
//! GSP = "LM=1"
//!
//! [cache]
//! enabled = true
//! capacity = 256
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::DEFAULT_BASE_URL;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host serving the profile pages
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// User agents rotated across requests
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,

    /// Referer header value
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Additional headers sent with every request
    #[serde(default)]
    pub extra_headers: BTreeMap<String, String>,

    /// Cookies sent with the first request of every operation
    #[serde(default)]
    pub cookies: BTreeMap<String, String>,

    /// In-memory entity cache settings
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agents: default_user_agents(),
            referer: default_referer(),
            extra_headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Entity cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether lookups are cached at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum entries per entity kind
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_cache_capacity(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
        "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_referer() -> String {
    format!("{}/", DEFAULT_BASE_URL)
}

fn default_true() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    256
}

/// `SCHOLAR_PROFILE_BASE_URL`, `SCHOLAR_PROFILE_CACHE__CAPACITY`, ...
fn environment() -> config::Environment {
    config::Environment::with_prefix("SCHOLAR_PROFILE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Get the configuration from environment variables and defaults
pub fn get_config() -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Look for a config file in the working directory, then the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("scholar-profile.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("scholar-profile").join("config.toml"))
        .filter(|path| path.is_file())
}
