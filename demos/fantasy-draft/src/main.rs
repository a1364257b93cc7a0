//! Four-team fantasy football draft server.
//!
//! ```text
//! PORT=3000 RUST_LOG=draftroom=debug cargo run -p fantasy-draft
//! ```
//!
//! See [`ServerConfig`] for the other environment variables.

use draftroom::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        addr = %config.bind_addr(),
        teams = config.draft.total_teams,
        picks_per_team = config.draft.picks_per_team,
        catalog = ?config.catalog_path,
        "starting fantasy draft server"
    );

    let server = DraftServerBuilder::from_config(&config)?.build().await?;
    server.run().await?;
    Ok(())
}
