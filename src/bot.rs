//! Gateway wiring: the serenity client, its event handler, and shutdown.
//!
//! serenity owns the connection lifecycle (identify, heartbeat, reconnect,
//! resume). This module only builds the client, converts inbound events into
//! the bot's domain types, and hands them to [`crate::handlers`]. The only
//! shared state is the read-only [`BotConfig`] behind an `Arc`; serenity runs
//! each event on its own task.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{ActivityData, Client, Context, EventHandler, GatewayIntents, Message, Ready};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::BotConfig;
use crate::handlers;
use crate::http::DiscordHttpClient;
use crate::types::IncomingMessage;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum BotError {
    /// Building the client or running the gateway failed.
    ///
    /// Boxed because `serenity::Error` is large.
    #[error("Discord client error: {0}")]
    Client(#[from] Box<serenity::Error>),
}

impl From<serenity::Error> for BotError {
    fn from(e: serenity::Error) -> Self {
        BotError::Client(Box::new(e))
    }
}

// ---------------------------------------------------------------------------
// Gateway intents
// ---------------------------------------------------------------------------

/// GUILDS | GUILD_MESSAGES | MESSAGE_CONTENT
///
/// MESSAGE_CONTENT is privileged and must be enabled for the application in
/// the Discord Developer Portal, otherwise every message arrives with empty
/// content and no command ever matches.
pub fn gateway_intents() -> GatewayIntents {
    GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT
}

/// Presence text advertising the help command.
fn status_text(prefix: &str) -> String {
    format!("{}help for commands", prefix)
}

// ---------------------------------------------------------------------------
// Event handler
// ---------------------------------------------------------------------------

struct Handler {
    config: Arc<BotConfig>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "bot is ready!"
        );
        ctx.set_activity(Some(ActivityData::playing(status_text(
            self.config.prefix(),
        ))));
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let bot_user_id = ctx.cache.current_user().id;
        let incoming = IncomingMessage::from(&msg);
        let api = DiscordHttpClient::new(ctx.http.clone());

        handlers::on_message(&api, &self.config, bot_user_id, &incoming).await;
    }
}

// ---------------------------------------------------------------------------
// Bot entry point
// ---------------------------------------------------------------------------

/// Connect to the gateway and handle events until SIGINT or SIGTERM.
///
/// On a shutdown signal all shards are closed and this returns `Ok(())`.
/// Handlers still in flight at that point are not awaited.
pub async fn start(config: BotConfig) -> Result<(), BotError> {
    let config = Arc::new(config);

    let mut client = Client::builder(config.token(), gateway_intents())
        .event_handler(Handler {
            config: Arc::clone(&config),
        })
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown signal received, closing gateway");
        shard_manager.shutdown_all().await;
    });

    info!(prefix = config.prefix(), "connecting to gateway");
    client.start().await?;

    info!("gateway closed, bot stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(error = %error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(error = %error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Handler: EventHandler, Send, Sync);

    // -- gateway_intents() -------------------------------------------------

    #[test]
    fn gateway_intents_includes_required_bits() {
        let intents = gateway_intents();
        assert!(intents.contains(GatewayIntents::GUILDS), "missing GUILDS");
        assert!(
            intents.contains(GatewayIntents::GUILD_MESSAGES),
            "missing GUILD_MESSAGES"
        );
        assert!(
            intents.contains(GatewayIntents::MESSAGE_CONTENT),
            "missing MESSAGE_CONTENT"
        );
    }

    #[test]
    fn gateway_intents_skips_privileged_member_data() {
        let intents = gateway_intents();
        assert!(!intents.contains(GatewayIntents::GUILD_MEMBERS));
        assert!(!intents.contains(GatewayIntents::GUILD_PRESENCES));
    }

    // -- status_text() -----------------------------------------------------

    #[test]
    fn status_text_uses_prefix() {
        assert_eq!(status_text("!"), "!help for commands");
        assert_eq!(status_text("?"), "?help for commands");
    }

    // -- BotError ----------------------------------------------------------

    #[test]
    fn bot_error_wraps_serenity_error() {
        let err = BotError::from(serenity::Error::Other("no gateway"));
        assert!(err.to_string().contains("no gateway"));
    }
}
