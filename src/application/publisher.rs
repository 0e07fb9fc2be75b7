//! Dashboard Publisher
//!
//! Turns a `RunOutcome` into the final page: renders the cards, fills the
//! template slots and writes the output atomically. The template is loaded
//! up front so a missing page fails before any upstream request is made.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use thiserror::Error;

use crate::adapters::render::{
    chains_label, format_timestamp, render_fragment, write_atomic, PageError, PageTemplate,
    SlotValues,
};
use crate::config::Config;
use crate::domain::Chain;

use super::pipeline::RunOutcome;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Page error: {0}")]
    Page(#[from] PageError),
}

pub struct DashboardPublisher {
    template: PageTemplate,
    output_path: PathBuf,
    chains: Vec<Chain>,
}

impl DashboardPublisher {
    pub fn new(template: PageTemplate, output_path: PathBuf, chains: Vec<Chain>) -> Self {
        Self {
            template,
            output_path,
            chains,
        }
    }

    /// Load the page template named by the `[dashboard]` section
    pub fn from_config(config: &Config) -> Result<Self, PublishError> {
        let output_path = config.dashboard.output_path();
        let template_path = config.dashboard.template_path();
        let template = PageTemplate::load(template_path.as_deref(), &output_path)?;

        Ok(Self::new(
            template,
            output_path,
            config.dashboard.chains.clone(),
        ))
    }

    /// Slot content for one run
    pub fn slot_values<Tz>(&self, outcome: &RunOutcome, at: &DateTime<Tz>) -> SlotValues
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        SlotValues {
            tokens: render_fragment(&outcome.tokens),
            updated_at: format_timestamp(at),
            chains: chains_label(&self.chains),
            feed: outcome.feed.label().to_string(),
        }
    }

    /// Full page for `outcome`, without touching the filesystem
    pub fn render_page<Tz>(&self, outcome: &RunOutcome, at: &DateTime<Tz>) -> Result<String, PublishError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Ok(self.template.fill(&self.slot_values(outcome, at))?)
    }

    /// Render and write the page, returning where it went
    pub fn publish<Tz>(&self, outcome: &RunOutcome, at: &DateTime<Tz>) -> Result<&Path, PublishError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let page = self.render_page(outcome, at)?;
        write_atomic(&self.output_path, &page)?;

        tracing::info!(
            "Dashboard written to {} ({} tokens, {})",
            self.output_path.display(),
            outcome.tokens.len(),
            outcome.feed.label()
        );
        Ok(&self.output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_tokens, Feed, QualificationStats};
    use chrono::FixedOffset;
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str = "<h1><!-- meme-radar:chains --><!-- /meme-radar:chains --></h1>\
        <small><!-- meme-radar:feed --><!-- /meme-radar:feed --></small>\
        <div class=\"card-body\"><!-- meme-radar:tokens --><!-- /meme-radar:tokens --></div>\
        <footer><!-- meme-radar:updated_at --><!-- /meme-radar:updated_at --></footer>";

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
            .unwrap()
    }

    fn outcome(feed: Feed) -> RunOutcome {
        let tokens = match feed {
            Feed::Empty => Vec::new(),
            _ => sample_tokens(&Chain::ALL, 1_700_000_000.0),
        };
        RunOutcome {
            tokens,
            feed,
            stats: QualificationStats::default(),
        }
    }

    #[test]
    fn test_publish_writes_filled_page() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("index.html");
        let publisher = DashboardPublisher::new(
            PageTemplate::parse(TEMPLATE).unwrap(),
            output.clone(),
            Chain::ALL.to_vec(),
        );

        let written = publisher.publish(&outcome(Feed::Fallback), &at()).unwrap();
        assert_eq!(written, output.as_path());

        let page = fs::read_to_string(&output).unwrap();
        assert_eq!(page.matches("class=\"token-alert\"").count(), 6);
        assert!(page.contains("Solana and Ethereum"));
        assert!(page.contains("Sample data"));
        assert!(page.contains("October 19, 2026 09:30:00"));
    }

    #[test]
    fn test_empty_feed_renders_notice() {
        let publisher = DashboardPublisher::new(
            PageTemplate::parse(TEMPLATE).unwrap(),
            PathBuf::from("unused.html"),
            vec![Chain::Solana],
        );

        let page = publisher.render_page(&outcome(Feed::Empty), &at()).unwrap();
        assert!(page.contains("No qualifying tokens"));
        assert!(!page.contains("token-alert"));
        assert!(page.contains("<h1><!-- meme-radar:chains -->Solana<!-- /meme-radar:chains --></h1>"));
    }

    #[test]
    fn test_from_config_fails_fast_without_page() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.dashboard.output_path = dir.path().join("missing.html").display().to_string();

        let result = DashboardPublisher::from_config(&config);
        assert!(matches!(
            result,
            Err(PublishError::Page(PageError::MissingOutputTarget(_)))
        ));
    }
}
