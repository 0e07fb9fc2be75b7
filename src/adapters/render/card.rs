//! Token card markup
//!
//! Bootstrap card layout consumed by the dashboard page. Every upstream string
//! goes through `escape_html` before it lands in markup.

use crate::domain::QualifiedToken;

/// Notice rendered in place of cards when the set is empty
pub const EMPTY_NOTICE: &str =
    "\n        <div class=\"alert alert-secondary\">No qualifying tokens found in this run.</div>\n";

/// Compact dollar amount: `$1.5M`, `$2.5K`, `$42.5`
pub fn format_currency(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        // Ties go to the even cent: 0.125 -> 0.12
        let rounded = (amount * 100.0).round_ties_even() / 100.0;
        if rounded.fract() == 0.0 {
            format!("${:.1}", rounded)
        } else {
            format!("${}", rounded)
        }
    }
}

/// Escape text for element content and double-quoted attributes
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// One `token-alert` card
pub fn render_card(qualified: &QualifiedToken) -> String {
    let chain = qualified.chain();
    let token = &qualified.token;
    let chart_url = chain.chart_url(&token.address);

    format!(
        r#"
        <div class="token-alert">
            <div class="d-flex justify-content-between align-items-start">
                <div>
                    <h5 class="mb-1">${symbol} <span class="badge {badge}">{chain}</span></h5>
                    <p class="mb-2">{name}</p>
                </div>
                <div>
                    <span class="badge bg-success">DYOR: {dyor}</span>
                    <span class="badge bg-info">Sentiment: {sentiment}</span>
                </div>
            </div>
            <div class="row mt-2">
                <div class="col-md-6">
                    <p><strong>Liquidity:</strong> {liquidity}</p>
                    <p><strong>Volume (1h):</strong> {volume}</p>
                </div>
                <div class="col-md-6">
                    <p><strong>Age:</strong> {age:.1} hours</p>
                    <p><strong>Top Influencer:</strong> {influencer}</p>
                </div>
            </div>
            <div class="mt-2">
                <a href="{chart}" target="_blank" rel="noopener" class="btn btn-sm btn-outline-primary">View Chart</a>
            </div>
        </div>
"#,
        symbol = escape_html(&token.symbol),
        badge = chain.badge_class(),
        chain = chain.display_name(),
        name = escape_html(&token.name),
        dyor = qualified.dyor_score,
        sentiment = qualified.sentiment_score,
        liquidity = format_currency(qualified.detail.liquidity_usd),
        volume = format_currency(qualified.detail.volume_1h_usd),
        age = qualified.age_hours,
        influencer = escape_html(&qualified.influencer),
        chart = escape_html(&chart_url),
    )
}

/// Cards for every token in order, or the empty notice
pub fn render_fragment(tokens: &[QualifiedToken]) -> String {
    if tokens.is_empty() {
        return EMPTY_NOTICE.to_string();
    }

    tokens.iter().map(render_card).collect()
}
