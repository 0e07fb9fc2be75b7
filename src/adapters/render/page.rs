//! Page Template
//!
//! The dashboard page carries named slots:
//!
//! ```html
//! <!-- meme-radar:tokens --> ...cards... <!-- /meme-radar:tokens -->
//! ```
//!
//! Filling replaces the region between the markers and keeps the markers, so
//! a page produced by one run is a valid template for the next.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::domain::Chain;

/// Marker namespace, as in `<!-- meme-radar:NAME -->`
pub const SLOT_NAMESPACE: &str = "meme-radar";

/// Local time format for the `updated_at` slot
pub const TIMESTAMP_FORMAT: &str = "%B %d, %Y %H:%M:%S";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page template has no `{0}` slot")]
    MissingSlot(Slot),
    #[error("template not found: {}", .0.display())]
    MissingTemplate(PathBuf),
    #[error("output page not found: {} (set template_path or create the page first)", .0.display())]
    MissingOutputTarget(PathBuf),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid slot pattern: {0}")]
    Pattern(String),
}

/// A named region of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Token cards
    Tokens,
    /// Refresh timestamp
    UpdatedAt,
    /// Enabled chains, e.g. "Solana and Ethereum"
    Chains,
    /// Feed label
    Feed,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Tokens, Slot::UpdatedAt, Slot::Chains, Slot::Feed];

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Tokens => "tokens",
            Slot::UpdatedAt => "updated_at",
            Slot::Chains => "chains",
            Slot::Feed => "feed",
        }
    }

    /// Required slots must appear at least once
    pub fn is_required(&self) -> bool {
        matches!(self, Slot::Tokens | Slot::UpdatedAt)
    }

    fn pattern(&self) -> Result<Regex, PageError> {
        let name = regex::escape(self.name());
        let ns = regex::escape(SLOT_NAMESPACE);
        Regex::new(&format!(
            r"(?s)<!--\s*{ns}:{name}\s*-->(.*?)<!--\s*/{ns}:{name}\s*-->"
        ))
        .map_err(|e| PageError::Pattern(e.to_string()))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Content for every slot of one run
#[derive(Debug, Clone, Default)]
pub struct SlotValues {
    pub tokens: String,
    pub updated_at: String,
    pub chains: String,
    pub feed: String,
}

impl SlotValues {
    pub fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Tokens => &self.tokens,
            Slot::UpdatedAt => &self.updated_at,
            Slot::Chains => &self.chains,
            Slot::Feed => &self.feed,
        }
    }
}

/// Page with validated slot markers
#[derive(Debug, Clone)]
pub struct PageTemplate {
    source: String,
}

impl PageTemplate {
    /// Load from `template_path` when set, else from the current output page
    pub fn load(template_path: Option<&Path>, output_path: &Path) -> Result<Self, PageError> {
        let source = match template_path {
            Some(template) => read_page(template, PageError::MissingTemplate)?,
            None => read_page(output_path, PageError::MissingOutputTarget)?,
        };
        Self::parse(source)
    }

    /// Check that every required slot is present
    pub fn parse(source: impl Into<String>) -> Result<Self, PageError> {
        let template = Self {
            source: source.into(),
        };
        for slot in Slot::ALL.iter().filter(|s| s.is_required()) {
            if template.slot_count(*slot)? == 0 {
                return Err(PageError::MissingSlot(*slot));
            }
        }
        Ok(template)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of occurrences of `slot`
    pub fn slot_count(&self, slot: Slot) -> Result<usize, PageError> {
        Ok(slot.pattern()?.captures_iter(&self.source).count())
    }

    /// Fill every occurrence of every slot present in the page
    pub fn fill(&self, values: &SlotValues) -> Result<String, PageError> {
        let mut page = self.source.clone();
        for slot in Slot::ALL {
            let (filled, count) = splice(&page, &slot.pattern()?, values.get(slot));
            if count == 0 && slot.is_required() {
                return Err(PageError::MissingSlot(slot));
            }
            page = filled;
        }
        Ok(page)
    }
}

fn read_page<F>(path: &Path, missing: F) -> Result<String, PageError>
where
    F: FnOnce(PathBuf) -> PageError,
{
    let source = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => missing(path.to_path_buf()),
        _ => PageError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    debug!(path = %path.display(), bytes = source.len(), "Page template loaded");
    Ok(source)
}

/// Replace the inner region of each match, keeping the markers.
///
/// Assembled by hand: slot content is arbitrary HTML and may contain `$`.
fn splice(page: &str, pattern: &Regex, content: &str) -> (String, usize) {
    let mut out = String::with_capacity(page.len() + content.len());
    let mut last = 0;
    let mut count = 0;

    for caps in pattern.captures_iter(page) {
        if let Some(inner) = caps.get(1) {
            out.push_str(&page[last..inner.start()]);
            out.push_str(content);
            last = inner.end();
            count += 1;
        }
    }
    out.push_str(&page[last..]);
    (out, count)
}

/// Timestamp shown in the `updated_at` slot
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// "Solana", "Solana and Ethereum"
pub fn chains_label(chains: &[Chain]) -> String {
    let names: Vec<&str> = chains.iter().map(|c| c.display_name()).collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

/// Write via a sibling temp file and rename, so readers never see a partial page
pub fn write_atomic(path: &Path, content: &str) -> Result<(), PageError> {
    let io_err = |source: std::io::Error| PageError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));

    fs::write(&tmp_path, content).map_err(io_err)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use tempfile::TempDir;

    const PAGE: &str = r#"<html><body>
<p>Across <!-- meme-radar:chains -->Solana, Ethereum, and BSC<!-- /meme-radar:chains --></p>
<span><!-- meme-radar:updated_at -->March 29, 2025 15:24:48<!-- /meme-radar:updated_at --></span>
<div class="card-body"><!-- meme-radar:tokens -->
<div class="token-alert">old</div>
<!-- /meme-radar:tokens --></div>
<footer>Last Updated: <!-- meme-radar:updated_at --><!-- /meme-radar:updated_at --></footer>
</body></html>"#;

    fn values() -> SlotValues {
        SlotValues {
            tokens: "<div class=\"token-alert\">$NEW</div>".to_string(),
            updated_at: "October 19, 2026 09:00:00".to_string(),
            chains: "Solana and Ethereum".to_string(),
            feed: "Live data".to_string(),
        }
    }

    #[test]
    fn test_fill_replaces_every_occurrence() {
        let template = PageTemplate::parse(PAGE).unwrap();
        let page = template.fill(&values()).unwrap();

        assert!(!page.contains(">old<"));
        assert!(page.contains("$NEW"));
        assert!(page.contains("Solana and Ethereum"));
        assert!(!page.contains("March 29, 2025"));
        assert_eq!(page.matches("October 19, 2026 09:00:00").count(), 2);
        // markers survive
        assert_eq!(page.matches("<!-- meme-radar:updated_at -->").count(), 2);
    }

    #[test]
    fn test_fill_is_idempotent() {
        let first = PageTemplate::parse(PAGE).unwrap().fill(&values()).unwrap();
        let second = PageTemplate::parse(first.clone()).unwrap().fill(&values()).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.matches("$NEW").count(), 1);
    }

    #[test]
    fn test_optional_slot_may_be_absent() {
        let template = PageTemplate::parse(PAGE).unwrap();
        assert_eq!(template.slot_count(Slot::Feed).unwrap(), 0);
        assert!(template.fill(&values()).is_ok());
    }

    #[test]
    fn test_missing_required_slot() {
        let page = "<html><!-- meme-radar:updated_at --><!-- /meme-radar:updated_at --></html>";
        let err = PageTemplate::parse(page).unwrap_err();
        assert!(matches!(err, PageError::MissingSlot(Slot::Tokens)));

        let page = "<!-- meme-radar:tokens --><!-- /meme-radar:tokens -->";
        let err = PageTemplate::parse(page).unwrap_err();
        assert!(matches!(err, PageError::MissingSlot(Slot::UpdatedAt)));
    }

    #[test]
    fn test_load_prefers_template_path() {
        let dir = TempDir::new().unwrap();
        let template_path = dir.path().join("template.html");
        let output_path = dir.path().join("index.html");
        fs::write(&template_path, PAGE).unwrap();

        let template = PageTemplate::load(Some(&template_path), &output_path).unwrap();
        assert_eq!(template.source(), PAGE);
    }

    #[test]
    fn test_load_missing_files() {
        let dir = TempDir::new().unwrap();
        let template_path = dir.path().join("template.html");
        let output_path = dir.path().join("index.html");

        let err = PageTemplate::load(Some(&template_path), &output_path).unwrap_err();
        assert!(matches!(err, PageError::MissingTemplate(p) if p == template_path));

        let err = PageTemplate::load(None, &output_path).unwrap_err();
        assert!(matches!(err, PageError::MissingOutputTarget(p) if p == output_path));
    }

    #[test]
    fn test_write_atomic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site").join("index.html");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let leftovers = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_chains_label() {
        assert_eq!(chains_label(&[Chain::Solana]), "Solana");
        assert_eq!(chains_label(&[Chain::Solana, Chain::Ethereum]), "Solana and Ethereum");
        assert_eq!(chains_label(&[]), "");
    }

    #[test]
    fn test_format_timestamp() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 29, 15, 24, 48)
            .unwrap();
        assert_eq!(format_timestamp(&at), "March 29, 2025 15:24:48");
    }
}
