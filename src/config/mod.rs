//! Configuration Module
//!
//! Loads and validates configuration from TOML files, and resolves API keys
//! from the environment.

pub mod credentials;
pub mod loader;

pub use credentials::{ApiKey, Credentials, ETHEREUM_API_KEY_ENV, SOLANA_API_KEY_ENV};
pub use loader::{load_config, Config, ConfigError};
