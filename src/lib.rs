//! A prefix-command Discord bot.
//!
//! The bot answers `ping`, `help`, `info`, `server`, and `userinfo` (behind a
//! configurable prefix, `!` by default) with plain text or rich embeds.
//!
//! - [`config`] reads the token and prefix once at startup.
//! - [`commands`] decides whether a message is a command and which one.
//! - [`handlers`] builds and sends the replies through [`http::DiscordApi`].
//! - `bot` (feature `io`) wires everything to serenity's gateway client.

pub mod commands;
pub mod config;
pub mod handlers;
pub mod http;
pub mod types;

#[cfg(feature = "io")]
pub mod bot;

/// Run the Discord bot until a shutdown signal is received.
///
/// Thin wrapper over [`bot::start`] so the binary only depends on the crate
/// root.
#[cfg(feature = "io")]
pub async fn run(config: config::BotConfig) -> Result<(), bot::BotError> {
    bot::start(config).await
}
