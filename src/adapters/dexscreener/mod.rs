//! DexScreener Adapter
//!
//! Market detail for any chain DexScreener indexes. Pools are summed per
//! chain.

mod client;
mod types;

pub use client::{DexScreenerClient, DexScreenerConfig};
pub use types::{Pair, TokenPairsResponse};
