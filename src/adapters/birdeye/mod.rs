//! Birdeye Adapter
//!
//! Solana side of the dashboard:
//! - `TokenSource`: newest listings from `/public/tokenlist`
//! - `DetailProvider`: liquidity and 1h volume from `/public/token_list/info`

mod client;
mod types;

pub use client::{BirdeyeClient, BirdeyeConfig};
pub use types::{ListedToken, TokenInfoResponse, TokenListResponse};
