//! Refresh Pipeline
//!
//! One dashboard refresh:
//! 1. Fetch the newest listings of every enabled chain (concatenated in chain order)
//! 2. Age gate, then skip chains that already hit their cap
//! 3. Enrich survivors with liquidity / 1h volume in bounded, order-preserving batches
//! 4. Market, DYOR and sentiment gates
//! 5. Fall back to the sample set when nothing qualifies (policy permitting)
//!
//! Upstream failures never abort a run. A failed listing contributes no
//! candidates and a failed detail lookup counts as zero liquidity and volume.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::join_all;
use thiserror::Error;

use crate::adapters::birdeye::{BirdeyeClient, BirdeyeConfig};
use crate::adapters::dexscreener::{DexScreenerClient, DexScreenerConfig};
use crate::adapters::etherscan::{EtherscanClient, EtherscanConfig};
use crate::adapters::scoring::PlaceholderScoring;
use crate::config::{Config, Credentials};
use crate::domain::influencer::pick_influencer;
use crate::domain::qualification::round_to_tenth;
use crate::domain::{
    sample_tokens, Chain, ChainQuota, FallbackPolicy, Feed, QualificationCriteria,
    QualificationStats, QualifiedToken, Rejection, Token, TokenDetail,
};
use crate::ports::{DetailProvider, ScoringStrategy, TokenSource, MAX_SCORE};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("No API key available for {0}")]
    MissingCredential(Chain),
}

/// Run-level knobs, decoupled from the config file layout
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Enabled chains, in evaluation order
    pub chains: Vec<Chain>,
    /// Listings requested per chain
    pub page_size: usize,
    /// Detail requests in flight at once
    pub enrich_concurrency: usize,
    pub fallback: FallbackPolicy,
    pub criteria: QualificationCriteria,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            chains: Chain::ALL.to_vec(),
            page_size: 50,
            enrich_concurrency: 4,
            fallback: FallbackPolicy::Sample,
            criteria: QualificationCriteria::default(),
        }
    }
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            chains: config.dashboard.chains.clone(),
            page_size: config.sources.page_size,
            enrich_concurrency: config.sources.enrich_concurrency,
            fallback: config.dashboard.fallback,
            criteria: QualificationCriteria::from(&config.filters),
        }
    }
}

/// Routes detail lookups to the provider registered for each chain
#[derive(Default)]
pub struct DetailRouter {
    providers: HashMap<Chain, Box<dyn DetailProvider>>,
}

impl DetailRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, chain: Chain, provider: Box<dyn DetailProvider>) -> Self {
        self.providers.insert(chain, provider);
        self
    }

    pub fn has_provider(&self, chain: Chain) -> bool {
        self.providers.contains_key(&chain)
    }

    /// Fetch detail, mapping every failure to a zero detail
    pub async fn detail_or_zero(&self, chain: Chain, address: &str) -> TokenDetail {
        let Some(provider) = self.providers.get(&chain) else {
            tracing::warn!("No detail provider for {}, treating {} as zero", chain, address);
            return TokenDetail::zero();
        };

        match provider.fetch_detail(chain, address).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!("Detail lookup failed for {} {}: {}", chain, address, e);
                TokenDetail::zero()
            }
        }
    }
}

/// Result of one refresh
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Tokens to render, live or sample
    pub tokens: Vec<QualifiedToken>,
    pub feed: Feed,
    pub stats: QualificationStats,
}

pub struct RefreshPipeline {
    sources: Vec<Box<dyn TokenSource>>,
    details: DetailRouter,
    scoring: Box<dyn ScoringStrategy>,
    settings: PipelineSettings,
}

impl RefreshPipeline {
    pub fn new(
        sources: Vec<Box<dyn TokenSource>>,
        details: DetailRouter,
        scoring: Box<dyn ScoringStrategy>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            sources,
            details,
            scoring,
            settings,
        }
    }

    /// Wire the production adapters for every enabled chain
    pub fn from_config(config: &Config, credentials: &Credentials) -> Result<Self, PipelineError> {
        let timeout = Duration::from_secs(config.sources.timeout_secs);
        let mut sources: Vec<Box<dyn TokenSource>> = Vec::new();
        let mut details = DetailRouter::new();

        for &chain in &config.dashboard.chains {
            let api_key = credentials
                .key_for(chain)
                .cloned()
                .ok_or(PipelineError::MissingCredential(chain))?;

            match chain {
                Chain::Solana => {
                    let birdeye = BirdeyeClient::new(
                        BirdeyeConfig {
                            token_list_url: config.birdeye.token_list_url.clone(),
                            token_info_url: config.birdeye.token_info_url.clone(),
                            timeout,
                        },
                        api_key,
                    )?;
                    sources.push(Box::new(birdeye.clone()));
                    details = details.with_provider(Chain::Solana, Box::new(birdeye));
                }
                Chain::Ethereum => {
                    let etherscan = EtherscanClient::new(
                        EtherscanConfig {
                            api_url: config.etherscan.api_url.clone(),
                            watch_address: config.etherscan.watch_address.clone(),
                            timeout,
                        },
                        api_key,
                    )?;
                    let dexscreener = DexScreenerClient::new(DexScreenerConfig {
                        api_url: config.dexscreener.api_url.clone(),
                        timeout,
                    })?;
                    sources.push(Box::new(etherscan));
                    details = details.with_provider(Chain::Ethereum, Box::new(dexscreener));
                }
            }
        }

        Ok(Self::new(
            sources,
            details,
            Box::new(PlaceholderScoring::new()),
            PipelineSettings::from(config),
        ))
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Full refresh at `now_secs` (Unix seconds)
    pub async fn run(&self, now_secs: f64) -> RunOutcome {
        let candidates = self.collect_candidates().await;
        let (tokens, stats) = self.qualify(candidates, now_secs).await;

        tracing::info!(
            "Qualification: {} candidates, {} qualified, {} rejected \
             (too old {}, liquidity {}, volume {}, dyor {}, sentiment {}), {} skipped at cap",
            stats.candidates,
            stats.qualified,
            stats.rejected(),
            stats.too_old,
            stats.low_liquidity,
            stats.low_volume,
            stats.low_dyor,
            stats.low_sentiment,
            stats.quota_skipped,
        );

        if !tokens.is_empty() {
            return RunOutcome {
                tokens,
                feed: Feed::Live,
                stats,
            };
        }

        match self.settings.fallback {
            FallbackPolicy::Sample => {
                tracing::warn!("No tokens qualified, rendering sample data");
                RunOutcome {
                    tokens: sample_tokens(&self.settings.chains, now_secs),
                    feed: Feed::Fallback,
                    stats,
                }
            }
            FallbackPolicy::None => {
                tracing::warn!("No tokens qualified and fallback is disabled");
                RunOutcome {
                    tokens: Vec::new(),
                    feed: Feed::Empty,
                    stats,
                }
            }
        }
    }

    /// Newest listings of every source, concatenated in source order
    pub async fn collect_candidates(&self) -> Vec<Token> {
        let page_size = self.settings.page_size;
        let listings = join_all(
            self.sources
                .iter()
                .map(|source| source.fetch_recent_tokens(page_size)),
        )
        .await;

        let mut candidates = Vec::new();
        for (source, listing) in self.sources.iter().zip(listings) {
            match listing {
                Ok(tokens) => {
                    tracing::info!("Fetched {} {} listings", tokens.len(), source.chain());
                    candidates.extend(tokens);
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch {} listings: {}", source.chain(), e);
                }
            }
        }
        candidates
    }

    /// Apply every gate to `candidates` in order, honouring the per-chain cap
    pub async fn qualify(
        &self,
        candidates: Vec<Token>,
        now_secs: f64,
    ) -> (Vec<QualifiedToken>, QualificationStats) {
        let criteria = &self.settings.criteria;
        let batch_size = self.settings.enrich_concurrency.max(1);
        let mut quota = ChainQuota::new(&self.settings.chains, criteria.max_per_chain);
        let mut stats = QualificationStats {
            candidates: candidates.len(),
            ..Default::default()
        };
        let mut qualified = Vec::new();
        let mut remaining = candidates.into_iter().peekable();

        while remaining.peek().is_some() {
            if quota.all_saturated() {
                tracing::debug!("Every chain is at its cap, stopping early");
                break;
            }

            // Age gate and cap skip happen before any request is made. A batch
            // never holds more tokens of a chain than the chain has free slots,
            // so nothing past the cap is enriched.
            let mut batch: Vec<(Token, f64)> = Vec::with_capacity(batch_size);
            let mut reserved: HashMap<Chain, usize> = HashMap::new();
            while batch.len() < batch_size {
                let Some(token) = remaining.peek() else {
                    break;
                };
                let age = match criteria.check_age(token, now_secs) {
                    Ok(age) => age,
                    Err(rejection) => {
                        tracing::debug!("Rejected {} ({}): {}", token.symbol, token.chain, rejection);
                        stats.record_rejection(&rejection);
                        remaining.next();
                        continue;
                    }
                };

                let chain = token.chain;
                if quota.is_full(chain) {
                    stats.quota_skipped += 1;
                    remaining.next();
                    continue;
                }

                // Defer to the next batch until pending lookups settle
                let pending = reserved.entry(chain).or_insert(0);
                if *pending >= quota.remaining(chain) {
                    break;
                }
                *pending += 1;

                if let Some(token) = remaining.next() {
                    batch.push((token, age));
                }
            }

            let details = join_all(
                batch
                    .iter()
                    .map(|(token, _)| self.details.detail_or_zero(token.chain, &token.address)),
            )
            .await;
            stats.enriched += batch.len();

            for ((token, age), detail) in batch.into_iter().zip(details) {
                let symbol = token.symbol.clone();
                match self.admit(token, age, detail) {
                    Ok(token) => {
                        tracing::info!(
                            "Qualified {} on {} (liq {:.0}, vol {:.0}, dyor {}, sentiment {})",
                            token.token.symbol,
                            token.chain(),
                            token.detail.liquidity_usd,
                            token.detail.volume_1h_usd,
                            token.dyor_score,
                            token.sentiment_score,
                        );
                        quota.record(token.chain());
                        stats.qualified += 1;
                        qualified.push(token);
                    }
                    Err(rejection) => {
                        tracing::debug!("Rejected {}: {}", symbol, rejection);
                        stats.record_rejection(&rejection);
                    }
                }
            }
        }

        (qualified, stats)
    }

    /// Market and score gates for one enriched candidate
    fn admit(
        &self,
        token: Token,
        age_hours: f64,
        detail: TokenDetail,
    ) -> Result<QualifiedToken, Rejection> {
        let criteria = &self.settings.criteria;
        criteria.check_market(&detail)?;

        let dyor_score = self.scoring.dyor_score(&token, &detail).min(MAX_SCORE);
        criteria.check_dyor(dyor_score)?;

        let sentiment_score = self.scoring.sentiment_score(&token).min(MAX_SCORE);
        criteria.check_sentiment(sentiment_score)?;

        let influencer = pick_influencer(token.chain, &mut rand::thread_rng());
        Ok(QualifiedToken {
            token,
            detail,
            age_hours: round_to_tenth(age_hours),
            dyor_score,
            sentiment_score,
            influencer,
        })
    }
}
