//! Battle client binary.
//!
//! Loads an encounter from the content directory and plays it out in the
//! terminal, with both sides driven by simple scripted tactics.
//!
//! ```bash
//! BATTLE_ENCOUNTER=Ambush RUST_LOG=client=debug cargo run -p battle-client
//! ```
mod config;
mod presenter;
mod scenario;

use anyhow::Result;

use config::ClientConfig;
use scenario::Outcome;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(data_dir = %config.data_dir.display(), encounter = %config.encounter, "starting battle");

    match scenario::run(&config).await? {
        Outcome::Victory(side) => tracing::info!(winner = %side, "battle over"),
        Outcome::TurnLimit { turns } => tracing::warn!(turns, "turn limit reached"),
    }
    Ok(())
}
