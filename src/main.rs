//! Meme Radar - Fresh Meme Token Dashboard
//!
//! Refreshes the dashboard page once and exits.

use anyhow::Result;

use meme_radar::adapters::cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (API keys go here, not in dashboard.toml)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app).await
}
