//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Birdeye: Solana listings and detail
//! - Etherscan: Ethereum listings from token transfers
//! - DexScreener: Ethereum liquidity and volume
//! - Scoring: placeholder DYOR / sentiment scores
//! - Render: token cards and page template
//! - CLI: Command-line interface

pub mod birdeye;
pub mod cli;
pub mod dexscreener;
pub mod etherscan;
pub mod render;
pub mod scoring;

pub use birdeye::BirdeyeClient;
pub use cli::CliApp;
pub use dexscreener::DexScreenerClient;
pub use etherscan::EtherscanClient;
pub use scoring::PlaceholderScoring;
