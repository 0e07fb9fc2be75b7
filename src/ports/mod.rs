//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract:
//! - Token listings per chain
//! - Per-token market detail (liquidity, 1h volume)
//! - DYOR and sentiment scoring

pub mod detail;
pub mod mocks;
pub mod scoring;
pub mod token_source;

// Re-export main traits and types
pub use detail::{DetailError, DetailProvider};
pub use scoring::{ScoringStrategy, MAX_SCORE};
pub use token_source::{SourceError, TokenSource};
