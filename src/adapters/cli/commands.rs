//! CLI Command Handler
//!
//! A single refresh per invocation; every flag is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use crate::adapters::render::{chains_label, format_timestamp, render_fragment};
use crate::application::{DashboardPublisher, RefreshPipeline};
use crate::config::{load_config, Config, Credentials};
use crate::domain::{Chain, FallbackPolicy};

/// Config file used when `--config` is not given and it exists
pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";

/// Meme Radar - fresh meme token dashboard for Solana and Ethereum
#[derive(Parser, Debug)]
#[command(
    name = "meme-radar",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Refresh the meme token dashboard page",
    long_about = "Meme Radar polls Birdeye (Solana) and Etherscan (Ethereum) for newly \
                  created tokens, filters them on age, liquidity, volume and scores, and \
                  splices the survivors into a static HTML page."
)]
pub struct CliApp {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the output page
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Override the page template
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Chains to poll, comma separated (solana,ethereum)
    #[arg(long, value_name = "CHAINS", value_delimiter = ',')]
    pub chains: Option<Vec<Chain>>,

    /// Leave the section empty instead of showing sample data
    #[arg(long)]
    pub no_fallback: bool,

    /// Print the card fragment and write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliApp {
    /// Apply command-line overrides on top of file values
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.dashboard.output_path = output.display().to_string();
        }
        if let Some(template) = &self.template {
            config.dashboard.template_path = Some(template.display().to_string());
        }
        if let Some(chains) = &self.chains {
            config.dashboard.chains = chains.clone();
        }
        if self.no_fallback {
            config.dashboard.fallback = FallbackPolicy::None;
        }
    }
}

/// Execute one refresh
pub async fn execute(app: CliApp) -> Result<()> {
    let config = resolve_config(&app)?;

    // Initialize logging based on flags
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    refresh_command(&app, config).await
}

/// Load the config file (explicit, default path, or built-in defaults) and apply overrides
pub fn resolve_config(app: &CliApp) -> Result<Config> {
    let mut config = match &app.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("Failed to load configuration from {}", DEFAULT_CONFIG_PATH))?,
        None => Config::default(),
    };

    app.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Initialize logging system.
///
/// `--debug` and `--verbose` win over `RUST_LOG`, which wins over `[logging] level`.
fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info,meme_radar=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}

async fn refresh_command(app: &CliApp, config: Config) -> Result<()> {
    let chains = &config.dashboard.chains;
    tracing::info!("Starting meme radar refresh for {}", chains_label(chains));

    let credentials = Credentials::from_env(chains).context("Missing API credentials")?;

    // Resolve the page before touching the network
    let publisher = if app.dry_run {
        tracing::info!("Dry run: output page will not be written");
        None
    } else {
        Some(DashboardPublisher::from_config(&config).context("Failed to load page template")?)
    };

    let pipeline = RefreshPipeline::from_config(&config, &credentials)
        .context("Failed to create upstream clients")?;

    let now = Local::now();
    let now_secs = now.timestamp_millis() as f64 / 1000.0;
    let outcome = pipeline.run(now_secs).await;

    match publisher {
        Some(publisher) => {
            let path = publisher
                .publish(&outcome, &now)
                .context("Failed to publish dashboard")?;
            println!(
                "Dashboard updated at {} ({} tokens, {}) -> {}",
                format_timestamp(&now),
                outcome.tokens.len(),
                outcome.feed.label(),
                path.display()
            );
        }
        None => print!("{}", render_fragment(&outcome.tokens)),
    }

    Ok(())
}
