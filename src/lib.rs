//! Meme Radar - Fresh Meme Token Dashboard Library
//!
//! Polls Solana and Ethereum for newly created tokens, qualifies them on age,
//! liquidity, volume and scores, and splices the result into a static page.
//!
//! # Modules
//!
//! - `domain`: Core types and rules (Token, QualificationCriteria, ChainQuota)
//! - `ports`: Trait abstractions (TokenSource, DetailProvider, ScoringStrategy)
//! - `adapters`: External implementations (Birdeye, Etherscan, DexScreener, render, CLI)
//! - `config`: Configuration loading, validation and credentials
//! - `application`: Refresh pipeline and page publisher

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
