//! Etherscan Adapter
//!
//! Ethereum listings. Etherscan exposes transfers rather than listings, so
//! tokens are de-duplicated by contract address as transfers are scanned.

mod client;
mod types;

pub use client::{EtherscanClient, EtherscanConfig};
pub use types::{tokens_from_transfers, EtherscanResponse, TokenTransfer};
