//! Discord bot entry point.
//!
//! Reads configuration from the environment (and `.env`), then hands off to
//! [`discord_command_bot::run`]. A missing token is fatal: the process exits
//! before ever touching the gateway.

use tracing::{error, info};

use discord_command_bot::config::BotConfig;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialise tracing (respects RUST_LOG env, defaults to info).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(prefix = config.prefix(), "configuration loaded");

    if let Err(e) = discord_command_bot::run(config).await {
        error!(error = %e, "bot exited with an error");
        std::process::exit(1);
    }

    info!("gracefully shut down");
}
