//! Transport-abstracted access to the Discord REST API.
//!
//! Handlers never talk to serenity directly; they go through the
//! [`DiscordApi`] trait, which covers exactly the calls the bot makes:
//! send text, send an embed, edit text, look up a guild, look up a member.
//! [`DiscordHttpClient`] is the production implementation on top of
//! serenity's `Http`; tests substitute a recording mock.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, EditMessage, GuildId, Timestamp,
    UserId,
};
use serenity::http::Http;
use thiserror::Error;
use tracing::debug;

use crate::types::{Embed, GuildInfo, MemberInfo, Reply, SentMessage};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ApiError {
    /// Discord API or transport error from serenity.
    ///
    /// Boxed because `serenity::Error` is large.
    #[error("Discord API error: {0}")]
    Discord(#[from] Box<serenity::Error>),

    /// A guild-scoped lookup was attempted for a message sent outside a guild.
    #[error("message was not sent in a guild")]
    NoGuild,
}

impl From<serenity::Error> for ApiError {
    fn from(e: serenity::Error) -> Self {
        ApiError::Discord(Box::new(e))
    }
}

// ---------------------------------------------------------------------------
// DiscordApi
// ---------------------------------------------------------------------------

/// The outbound calls the bot makes against Discord.
#[async_trait]
pub trait DiscordApi: Send + Sync {
    /// Send a plain-text message to a channel.
    async fn send_text(&self, channel_id: ChannelId, text: &str) -> Result<SentMessage, ApiError>;

    /// Send a single embed to a channel.
    async fn send_embed(
        &self,
        channel_id: ChannelId,
        embed: &Embed,
    ) -> Result<SentMessage, ApiError>;

    /// Replace the text of a message the bot sent earlier.
    async fn edit_text(&self, message: SentMessage, text: &str) -> Result<(), ApiError>;

    /// Fetch guild metadata, including channel and role counts.
    async fn guild(&self, guild_id: GuildId) -> Result<GuildInfo, ApiError>;

    /// Fetch a user's membership record in a guild.
    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<MemberInfo, ApiError>;

    /// Send whichever kind of reply the handler produced.
    async fn send(&self, channel_id: ChannelId, reply: &Reply) -> Result<SentMessage, ApiError> {
        match reply {
            Reply::Text(text) => self.send_text(channel_id, text).await,
            Reply::Embed(embed) => self.send_embed(channel_id, embed).await,
        }
    }
}

// ---------------------------------------------------------------------------
// DiscordHttpClient
// ---------------------------------------------------------------------------

/// [`DiscordApi`] backed by serenity's REST client.
///
/// Cheap to clone (internals are behind `Arc`).
#[derive(Clone)]
pub struct DiscordHttpClient {
    http: Arc<Http>,
}

impl DiscordHttpClient {
    /// Wrap an existing serenity HTTP client, e.g. the one owned by the
    /// gateway `Context`.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

impl std::fmt::Debug for DiscordHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordHttpClient")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl DiscordApi for DiscordHttpClient {
    async fn send_text(&self, channel_id: ChannelId, text: &str) -> Result<SentMessage, ApiError> {
        let msg = channel_id
            .send_message(&self.http, CreateMessage::new().content(text))
            .await?;
        Ok(SentMessage {
            channel_id: msg.channel_id,
            message_id: msg.id,
        })
    }

    async fn send_embed(
        &self,
        channel_id: ChannelId,
        embed: &Embed,
    ) -> Result<SentMessage, ApiError> {
        let msg = channel_id
            .send_message(&self.http, CreateMessage::new().embed(to_create_embed(embed)))
            .await?;
        Ok(SentMessage {
            channel_id: msg.channel_id,
            message_id: msg.id,
        })
    }

    async fn edit_text(&self, message: SentMessage, text: &str) -> Result<(), ApiError> {
        let edit = EditMessage::new().content(text);
        self.http
            .edit_message(message.channel_id, message.message_id, &edit, vec![])
            .await?;
        Ok(())
    }

    async fn guild(&self, guild_id: GuildId) -> Result<GuildInfo, ApiError> {
        let guild = self.http.get_guild_with_counts(guild_id).await?;
        let channels = self.http.get_channels(guild_id).await?;
        debug!(
            guild_id = %guild_id,
            channels = channels.len(),
            roles = guild.roles.len(),
            "fetched guild"
        );
        Ok(GuildInfo::from_partial(&guild, channels.len()))
    }

    async fn member(&self, guild_id: GuildId, user_id: UserId) -> Result<MemberInfo, ApiError> {
        let member = self.http.get_member(guild_id, user_id).await?;
        Ok(MemberInfo::from(&member))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Convert the bot's embed into serenity's builder.
fn to_create_embed(embed: &Embed) -> CreateEmbed {
    let mut out = CreateEmbed::new();

    if let Some(title) = &embed.title {
        out = out.title(title);
    }
    if let Some(description) = &embed.description {
        out = out.description(description);
    }
    if let Some(color) = embed.color {
        out = out.color(color);
    }
    out = out.fields(
        embed
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone(), f.inline)),
    );
    if let Some(thumbnail) = &embed.thumbnail {
        out = out.thumbnail(&thumbnail.url);
    }
    if let Some(footer) = &embed.footer {
        out = out.footer(CreateEmbedFooter::new(&footer.text));
    }
    if let Some(ts) = embed.timestamp {
        // Out-of-range timestamps are dropped rather than failing the send.
        if let Ok(ts) = Timestamp::from_unix_timestamp(ts.timestamp()) {
            out = out.timestamp(ts);
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
