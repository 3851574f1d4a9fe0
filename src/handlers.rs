//! Command handlers for the bot.
//!
//! [`on_message`] is the single entry point: it runs the router from
//! [`crate::commands`] and dispatches to one handler per command. Handlers
//! reach Discord only through [`DiscordApi`], and every failure is handled
//! where it happens: lookup errors become a plain-text reply, send and edit
//! errors are logged and dropped. Nothing propagates back to the caller.
//!
//! The formatting helpers are pure functions of their inputs (plus the
//! timestamp), so most of the behaviour is testable without a transport.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serenity::all::{ChannelId, UserId};
use tracing::{debug, info, warn};

use crate::commands::{self, Command, ParsedCommand};
use crate::config::BotConfig;
use crate::http::{ApiError, DiscordApi};
use crate::types::*;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const PING_PLACEHOLDER: &str = "Pinging...";
const SERVER_LOOKUP_ERROR: &str = "Error retrieving server information.";
const USER_LOOKUP_ERROR: &str = "Error retrieving user information.";

const HELP_COLOR: u32 = 0x00ff00;
const INFO_COLOR: u32 = 0x0099ff;
const SERVER_COLOR: u32 = 0xffa500;
const USER_COLOR: u32 = 0x9b59b6;

const REPOSITORY_URL: &str = env!("CARGO_PKG_REPOSITORY");

// ---------------------------------------------------------------------------
// MESSAGE_CREATE entry point
// ---------------------------------------------------------------------------

/// Handle one inbound message.
///
/// Returns the parsed command if the message was routed to a handler, or
/// `None` if it was ignored (own message, no prefix, nothing after the
/// prefix).
pub async fn on_message(
    api: &dyn DiscordApi,
    config: &BotConfig,
    bot_user_id: UserId,
    msg: &IncomingMessage,
) -> Option<ParsedCommand> {
    let parsed = commands::parse(config.prefix(), bot_user_id, msg)?;

    debug!(
        message_id = %msg.id,
        author = %msg.author.tag(),
        channel_id = %msg.channel_id,
        command = %parsed.name,
        args = parsed.args.len(),
        "routing command"
    );

    match parsed.command() {
        Some(Command::Ping) => handle_ping(api, msg.channel_id).await,
        Some(Command::Help) => handle_help(api, config, msg.channel_id).await,
        Some(Command::Info) => handle_info(api, config, msg.channel_id).await,
        Some(Command::Server) => handle_server(api, msg).await,
        Some(Command::UserInfo) => handle_user_info(api, msg).await,
        None => handle_unknown(api, config, msg.channel_id, &parsed.name).await,
    }

    Some(parsed)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Send a placeholder, then edit it to report how long the send took.
async fn handle_ping(api: &dyn DiscordApi, channel_id: ChannelId) {
    let start = Instant::now();
    let sent = match api.send_text(channel_id, PING_PLACEHOLDER).await {
        Ok(sent) => sent,
        Err(e) => {
            warn!(error = %e, "failed to send ping placeholder");
            return;
        }
    };
    let latency = start.elapsed();

    if let Err(e) = api.edit_text(sent, &pong_text(latency)).await {
        warn!(error = %e, message_id = %sent.message_id, "failed to edit ping reply");
    }
}

async fn handle_help(api: &dyn DiscordApi, config: &BotConfig, channel_id: ChannelId) {
    let embed = help_embed(config.prefix(), Utc::now());
    send_reply(api, channel_id, embed.into(), Command::Help).await;
}

async fn handle_info(api: &dyn DiscordApi, config: &BotConfig, channel_id: ChannelId) {
    let embed = info_embed(config.prefix(), Utc::now());
    send_reply(api, channel_id, embed.into(), Command::Info).await;
}

async fn handle_server(api: &dyn DiscordApi, msg: &IncomingMessage) {
    let lookup = match msg.guild_id {
        Some(guild_id) => api.guild(guild_id).await,
        None => Err(ApiError::NoGuild),
    };

    let reply = match lookup {
        Ok(guild) => guild_embed(&guild, Utc::now()).into(),
        Err(e) => {
            info!(error = %e, guild_id = ?msg.guild_id, "guild lookup failed");
            Reply::text(SERVER_LOOKUP_ERROR)
        }
    };
    send_reply(api, msg.channel_id, reply, Command::Server).await;
}

async fn handle_user_info(api: &dyn DiscordApi, msg: &IncomingMessage) {
    let target = user_info_target(msg);

    let lookup = match msg.guild_id {
        Some(guild_id) => api.member(guild_id, target.id).await,
        None => Err(ApiError::NoGuild),
    };

    let reply = match lookup {
        Ok(member) => user_embed(target, &member, Utc::now()).into(),
        Err(e) => {
            info!(error = %e, user_id = %target.id, "member lookup failed");
            Reply::text(USER_LOOKUP_ERROR)
        }
    };
    send_reply(api, msg.channel_id, reply, Command::UserInfo).await;
}

async fn handle_unknown(
    api: &dyn DiscordApi,
    config: &BotConfig,
    channel_id: ChannelId,
    name: &str,
) {
    info!(command = name, "unknown command");
    let text = unknown_command_text(name, config.prefix());
    if let Err(e) = api.send_text(channel_id, &text).await {
        warn!(error = %e, "failed to send unknown-command reply");
    }
}

/// Send a reply and log (but otherwise ignore) a failure.
async fn send_reply(api: &dyn DiscordApi, channel_id: ChannelId, reply: Reply, command: Command) {
    if let Err(e) = api.send(channel_id, &reply).await {
        warn!(error = %e, %command, "failed to send reply");
    }
}

/// The first mentioned user, or the author when nobody is mentioned.
fn user_info_target(msg: &IncomingMessage) -> &UserRef {
    msg.mentions.first().unwrap_or(&msg.author)
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn pong_text(latency: Duration) -> String {
    format!("🏓 Pong! Latency: {}ms", latency.as_millis())
}

fn unknown_command_text(name: &str, prefix: &str) -> String {
    format!(
        "Unknown command: `{}`. Use `{}help` to see available commands.",
        name, prefix
    )
}

/// One field per entry in the dispatch table.
fn help_embed(prefix: &str, now: DateTime<Utc>) -> Embed {
    Command::ALL
        .iter()
        .fold(
            EmbedBuilder::new()
                .title("📚 Bot Commands")
                .description(format!(
                    "Here are all the commands you can use (prefix: `{}`):",
                    prefix
                ))
                .color(HELP_COLOR),
            |embed, cmd| {
                embed.field(
                    format!("{}{}", prefix, cmd.usage()),
                    cmd.description(),
                    false,
                )
            },
        )
        .timestamp(now)
        .build()
}

fn info_embed(prefix: &str, now: DateTime<Utc>) -> Embed {
    EmbedBuilder::new()
        .title("ℹ️ Bot Information")
        .description("A simple Discord bot written in Rust!")
        .color(INFO_COLOR)
        .field("Language", "Rust", true)
        .field("Library", "serenity", true)
        .field("Prefix", format!("`{}`", prefix), true)
        .field("Repository", format!("[GitHub]({})", REPOSITORY_URL), false)
        .footer("Made with ❤️ using Rust")
        .timestamp(now)
        .build()
}

fn guild_embed(guild: &GuildInfo, now: DateTime<Utc>) -> Embed {
    let member_count = guild
        .member_count
        .map(|n| n.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    EmbedBuilder::new()
        .title(format!("🏰 {}", guild.name))
        .description("Server Information")
        .color(SERVER_COLOR)
        .thumbnail_opt(guild.icon_url.clone())
        .field("Server ID", guild.id.to_string(), true)
        .field("Owner", format!("<@{}>", guild.owner_id), true)
        .field("Members", member_count, true)
        .field("Channels", guild.channel_count.to_string(), true)
        .field("Roles", guild.role_count.to_string(), true)
        .timestamp(now)
        .build()
}

fn user_embed(user: &UserRef, member: &MemberInfo, now: DateTime<Utc>) -> Embed {
    let nickname = member
        .nick
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or("None");

    EmbedBuilder::new()
        .title(format!("👤 {}", user.tag()))
        .description("User Information")
        .color(USER_COLOR)
        .thumbnail_opt(user.avatar_url.clone())
        .field("User ID", user.id.to_string(), true)
        .field("Nickname", nickname, true)
        .field("Roles", member.role_count.to_string(), true)
        .timestamp(now)
        .build()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
