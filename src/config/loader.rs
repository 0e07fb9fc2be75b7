//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching
//! config/dashboard.toml. Every section is optional; missing values fall back to
//! the defaults below. Secrets never live here (see `credentials`).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{Chain, FallbackPolicy, QualificationCriteria};
use crate::domain::qualification::{
    DEFAULT_MAX_AGE_HOURS, DEFAULT_MAX_PER_CHAIN, DEFAULT_MIN_DYOR_SCORE,
    DEFAULT_MIN_LIQUIDITY_USD, DEFAULT_MIN_SENTIMENT_SCORE, DEFAULT_MIN_VOLUME_1H_USD,
};

/// Main configuration structure matching config/dashboard.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dashboard: DashboardSection,
    pub filters: FiltersSection,
    pub sources: SourcesSection,
    pub birdeye: BirdeyeSection,
    pub etherscan: EtherscanSection,
    pub dexscreener: DexScreenerSection,
    pub logging: LoggingSection,
}

/// Dashboard output section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// Chains to poll, in evaluation order
    pub chains: Vec<Chain>,
    /// Page written on every run
    pub output_path: String,
    /// Separate page template. When unset the previous output is the template.
    pub template_path: Option<String>,
    /// What to render when nothing qualifies: "sample" or "none"
    pub fallback: FallbackPolicy,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            chains: Chain::ALL.to_vec(),
            output_path: "index.html".to_string(),
            template_path: None,
            fallback: FallbackPolicy::Sample,
        }
    }
}

impl DashboardSection {
    /// Output path with `~` expanded
    pub fn output_path(&self) -> PathBuf {
        expand_path(&self.output_path)
    }

    /// Template path with `~` expanded
    pub fn template_path(&self) -> Option<PathBuf> {
        self.template_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(expand_path)
    }
}

/// Qualification thresholds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FiltersSection {
    /// Tokens older than this are skipped
    pub max_age_hours: f64,
    pub min_liquidity_usd: f64,
    pub min_volume_1h_usd: f64,
    pub min_dyor_score: u8,
    pub min_sentiment_score: u8,
    /// Result cap per chain
    pub max_per_chain: usize,
}

impl Default for FiltersSection {
    fn default() -> Self {
        Self {
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
            min_liquidity_usd: DEFAULT_MIN_LIQUIDITY_USD,
            min_volume_1h_usd: DEFAULT_MIN_VOLUME_1H_USD,
            min_dyor_score: DEFAULT_MIN_DYOR_SCORE,
            min_sentiment_score: DEFAULT_MIN_SENTIMENT_SCORE,
            max_per_chain: DEFAULT_MAX_PER_CHAIN,
        }
    }
}

/// Upstream request behaviour shared by all adapters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesSection {
    /// Listings requested per chain
    pub page_size: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Detail requests in flight at once (1 = sequential)
    pub enrich_concurrency: usize,
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            page_size: 50,
            timeout_secs: 10,
            enrich_concurrency: 4,
        }
    }
}

/// Birdeye (Solana listings and details)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BirdeyeSection {
    pub token_list_url: String,
    pub token_info_url: String,
}

impl Default for BirdeyeSection {
    fn default() -> Self {
        Self {
            token_list_url: "https://public-api.birdeye.so/public/tokenlist".to_string(),
            token_info_url: "https://public-api.birdeye.so/public/token_list/info".to_string(),
        }
    }
}

/// Etherscan (Ethereum token transfers)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EtherscanSection {
    pub api_url: String,
    /// Restrict transfers to one account
    pub watch_address: Option<String>,
}

impl Default for EtherscanSection {
    fn default() -> Self {
        Self {
            api_url: "https://api.etherscan.io/api".to_string(),
            watch_address: None,
        }
    }
}

/// DexScreener (Ethereum liquidity and volume)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DexScreenerSection {
    pub api_url: String,
}

impl Default for DexScreenerSection {
    fn default() -> Self {
        Self {
            api_url: "https://api.dexscreener.com/latest/dex/tokens".to_string(),
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("{chain} is enabled but {var} is not set")]
    MissingCredential { chain: Chain, var: String },
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Config::from_toml_str(&content)
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

impl Config {
    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate dashboard section
        if self.dashboard.chains.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one chain must be enabled".to_string(),
            ));
        }

        for (i, chain) in self.dashboard.chains.iter().enumerate() {
            if self.dashboard.chains[..i].contains(chain) {
                return Err(ConfigError::ValidationError(format!(
                    "chain '{}' listed more than once",
                    chain.dexscreener_id()
                )));
            }
        }

        if self.dashboard.output_path.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output_path cannot be empty".to_string(),
            ));
        }

        // Validate filters
        if !self.filters.max_age_hours.is_finite() || self.filters.max_age_hours <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "max_age_hours must be > 0, got {}",
                self.filters.max_age_hours
            )));
        }

        if !(self.filters.min_liquidity_usd >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "min_liquidity_usd must be >= 0, got {}",
                self.filters.min_liquidity_usd
            )));
        }

        if !(self.filters.min_volume_1h_usd >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "min_volume_1h_usd must be >= 0, got {}",
                self.filters.min_volume_1h_usd
            )));
        }

        if self.filters.min_dyor_score > 100 || self.filters.min_sentiment_score > 100 {
            return Err(ConfigError::ValidationError(format!(
                "score thresholds must be 0-100, got dyor={} sentiment={}",
                self.filters.min_dyor_score, self.filters.min_sentiment_score
            )));
        }

        if self.filters.max_per_chain == 0 {
            return Err(ConfigError::ValidationError(
                "max_per_chain must be > 0".to_string(),
            ));
        }

        // Validate sources
        if self.sources.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "page_size must be > 0".to_string(),
            ));
        }

        if self.sources.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be > 0".to_string(),
            ));
        }

        if self.sources.enrich_concurrency == 0 {
            return Err(ConfigError::ValidationError(
                "enrich_concurrency must be > 0".to_string(),
            ));
        }

        // Validate endpoints
        let endpoints = [
            ("birdeye.token_list_url", &self.birdeye.token_list_url),
            ("birdeye.token_info_url", &self.birdeye.token_info_url),
            ("etherscan.api_url", &self.etherscan.api_url),
            ("dexscreener.api_url", &self.dexscreener.api_url),
        ];
        for (name, url) in endpoints {
            if url.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot be empty",
                    name
                )));
            }
        }

        Ok(())
    }
}

// Conversion from the filters section to the domain threshold set
impl From<&FiltersSection> for QualificationCriteria {
    fn from(filters: &FiltersSection) -> Self {
        QualificationCriteria {
            max_age_hours: filters.max_age_hours,
            min_liquidity_usd: filters.min_liquidity_usd,
            min_volume_1h_usd: filters.min_volume_1h_usd,
            min_dyor_score: filters.min_dyor_score,
            min_sentiment_score: filters.min_sentiment_score,
            max_per_chain: filters.max_per_chain,
        }
    }
}
