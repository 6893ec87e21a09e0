//! TOML Configuration File Support
//!
//! Centralized configuration loading for the client, supporting a TOML
//! file at `~/.config/sentiment-tui/config.toml`.
//!
//! # Configuration Priority
//!
//! Values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! url = "http://127.0.0.1:5000"
//! timeout_secs = 30
//!
//! [reveal]
//! word_delay_ms = 150
//! entrance_ms = 350
//! entrance_direction = "top"
//! granularity = "words"
//! scramble_interval_ms = 100
//! scramble_chars_per_tick = 1
//! scramble_order = "start"
//! preserve_whitespace = true
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reveal::{EntranceDirection, Granularity, ScrambleOrder, DEFAULT_ALPHABET};

/// Default service URL (the reference service's development address)
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[api]` section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiToml {
    /// Base URL of the sentiment service
    pub url: Option<String>,

    /// Transport timeout in seconds (0 = none)
    pub timeout_secs: Option<u64>,
}

/// `[reveal]` section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealToml {
    /// Delay between word stages in milliseconds
    pub word_delay_ms: Option<u64>,

    /// Per-token entrance duration in milliseconds
    pub entrance_ms: Option<u64>,

    /// Where tokens slide in from
    pub entrance_direction: Option<EntranceDirection>,

    /// Words or letters
    pub granularity: Option<Granularity>,

    /// Scramble tick interval in milliseconds
    pub scramble_interval_ms: Option<u64>,

    /// Positions finalized per scramble tick
    pub scramble_chars_per_tick: Option<usize>,

    /// Order in which positions finalize
    pub scramble_order: Option<ScrambleOrder>,

    /// Filler characters
    pub scramble_alphabet: Option<String>,

    /// Show whitespace immediately instead of scrambling it
    pub preserve_whitespace: Option<bool>,
}

/// Root TOML structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientToml {
    /// Service settings
    pub api: ApiToml,
    /// Animation settings
    pub reveal: RevealToml,
}

// =============================================================================
// Resolved Configuration
// =============================================================================

/// Remote service settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, `POST {url}/analyze` is called
    pub url: String,
    /// Transport timeout (none by default)
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

/// Reveal animation settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealConfig {
    /// Delay between word stages
    pub word_delay: Duration,
    /// Entrance animation length of each token
    pub entrance: Duration,
    /// Where tokens slide in from
    pub entrance_direction: EntranceDirection,
    /// Token granularity of the staged reveal
    pub granularity: Granularity,
    /// Scramble tick interval
    pub scramble_interval: Duration,
    /// Positions finalized per scramble tick
    pub scramble_chars_per_tick: usize,
    /// Order in which positions finalize
    pub scramble_order: ScrambleOrder,
    /// Filler characters
    pub scramble_alphabet: String,
    /// Show whitespace immediately instead of scrambling it
    pub preserve_whitespace: bool,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            word_delay: Duration::from_millis(150),
            entrance: Duration::from_millis(350),
            entrance_direction: EntranceDirection::Top,
            granularity: Granularity::Words,
            scramble_interval: Duration::from_millis(100),
            scramble_chars_per_tick: 1,
            scramble_order: ScrambleOrder::Start,
            scramble_alphabet: DEFAULT_ALPHABET.to_string(),
            preserve_whitespace: true,
        }
    }
}

/// Fully resolved client configuration
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Service settings
    pub api: ApiConfig,
    /// Animation settings
    pub reveal: RevealConfig,
    /// File the configuration was read from, if any
    pub config_file_path: Option<PathBuf>,
    /// Highest-priority source that contributed
    source: ConfigSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            reveal: RevealConfig::default(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Where this configuration came from
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values that would break the client
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api url must start with http:// or https://, got {url:?}"
            )));
        }
        if self.reveal.word_delay.is_zero() {
            return Err(ConfigError::ValidationError(
                "word_delay_ms must be greater than 0".to_string(),
            ));
        }
        if self.reveal.scramble_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "scramble_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.reveal.scramble_chars_per_tick == 0 {
            return Err(ConfigError::ValidationError(
                "scramble_chars_per_tick must be greater than 0".to_string(),
            ));
        }
        if self.reveal.scramble_alphabet.is_empty() {
            return Err(ConfigError::ValidationError(
                "scramble_alphabet must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Default configuration file path (`$XDG_CONFIG_HOME/sentiment-tui/config.toml`)
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sentiment-tui").join("config.toml"))
}

/// Load configuration from the default path and the process environment
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from `path` (if it exists) and the process environment
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration with an explicit environment lookup
pub fn load_config_with_env<F>(path: Option<PathBuf>, env: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults
    let mut config = ClientConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ClientToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Environment overrides file values
    apply_env_config(&mut config, env);

    config.validate()?;
    Ok(config)
}

/// Apply TOML values on top of the current configuration
fn apply_toml_config(config: &mut ClientConfig, toml: &ClientToml) {
    if let Some(ref url) = toml.api.url {
        config.api.url.clone_from(url);
    }
    if let Some(secs) = toml.api.timeout_secs {
        config.api.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }

    let reveal = &toml.reveal;
    if let Some(ms) = reveal.word_delay_ms {
        config.reveal.word_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = reveal.entrance_ms {
        config.reveal.entrance = Duration::from_millis(ms);
    }
    if let Some(direction) = reveal.entrance_direction {
        config.reveal.entrance_direction = direction;
    }
    if let Some(granularity) = reveal.granularity {
        config.reveal.granularity = granularity;
    }
    if let Some(ms) = reveal.scramble_interval_ms {
        config.reveal.scramble_interval = Duration::from_millis(ms);
    }
    if let Some(count) = reveal.scramble_chars_per_tick {
        config.reveal.scramble_chars_per_tick = count;
    }
    if let Some(order) = reveal.scramble_order {
        config.reveal.scramble_order = order;
    }
    if let Some(ref alphabet) = reveal.scramble_alphabet {
        config.reveal.scramble_alphabet.clone_from(alphabet);
    }
    if let Some(preserve) = reveal.preserve_whitespace {
        config.reveal.preserve_whitespace = preserve;
    }
}

/// Apply environment variables on top of the current configuration
fn apply_env_config<F>(config: &mut ClientConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let mut touched = false;

    if let Some(url) = env("SENTIMENT_API_URL").or_else(|| env("VITE_API_URL")) {
        config.api.url = url;
        touched = true;
    }

    if let Some(secs) = parse_env::<u64>(&env, "SENTIMENT_API_TIMEOUT_SECS") {
        config.api.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        touched = true;
    }

    if let Some(ms) = parse_env::<u64>(&env, "SENTIMENT_WORD_DELAY_MS") {
        config.reveal.word_delay = Duration::from_millis(ms);
        touched = true;
    }

    if let Some(ms) = parse_env::<u64>(&env, "SENTIMENT_SCRAMBLE_INTERVAL_MS") {
        config.reveal.scramble_interval = Duration::from_millis(ms);
        touched = true;
    }

    if touched {
        config.source = ConfigSource::Env;
    }
}

/// Read and parse one environment variable, ignoring unparsable values
fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key = key, value = %raw, "Ignoring unparsable environment value");
            None
        }
    }
}

// =============================================================================
// CLI Overrides
// =============================================================================

/// Values given on the command line, applied last
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Service base URL
    pub api_url: Option<String>,
    /// Transport timeout
    pub timeout: Option<Duration>,
}

impl ConfigOverrides {
    /// Create empty overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the service URL
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Override the transport timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.api_url.is_none() && self.timeout.is_none()
    }

    /// Apply the overrides and re-validate
    pub fn apply(&self, config: &mut ClientConfig) -> Result<(), ConfigError> {
        if let Some(ref url) = self.api_url {
            config.api.url.clone_from(url);
        }
        if let Some(timeout) = self.timeout {
            config.api.timeout = Some(timeout);
        }
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }
        config.validate()
    }
}
