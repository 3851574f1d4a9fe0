//! Domain types shared by the router, the handlers, and the transport.
//!
//! Everything here is scoped to a single inbound event: the gateway layer
//! converts serenity's models into these (see [`ext`]), the handlers read
//! them and build a [`Reply`], and the transport turns the reply back into
//! serenity builders. Keeping serenity's 40-field structs out of the handler
//! signatures is what lets the tests construct inputs in a few lines.
//!
//! IDs stay as serenity's typed snowflakes (`UserId`, `ChannelId`, ...), so a
//! guild ID can never be passed where a user ID is expected.

use serenity::all::{ChannelId, GuildId, MessageId, UserId};

/// Builder patterns for ergonomic embed construction.
pub mod builders;

/// Conversions from serenity models into the types below.
pub mod ext;

pub use self::builders::{Embed, EmbedBuilder, EmbedField, EmbedFooter, EmbedThumbnail};

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// The parts of a user the bot cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
    /// Legacy four-digit discriminator; `None` under the new username system.
    pub discriminator: Option<u16>,
    /// CDN URL of the user's avatar, if one is set.
    pub avatar_url: Option<String>,
}

impl UserRef {
    /// `Username#Discriminator` or just `Username` for the new username system.
    pub fn tag(&self) -> String {
        match self.discriminator {
            Some(disc) if disc != 0 => format!("{}#{:04}", self.name, disc),
            _ => self.name.clone(),
        }
    }

    /// Discord mention markup for this user.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// One chat message observed by the bot.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: MessageId,
    pub author: UserRef,
    pub channel_id: ChannelId,
    /// `None` for direct messages.
    pub guild_id: Option<GuildId>,
    pub content: String,
    /// Mentioned users, in the order Discord reports them.
    pub mentions: Vec<UserRef>,
}

// ---------------------------------------------------------------------------
// Directory lookups
// ---------------------------------------------------------------------------

/// Guild metadata returned by a guild lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildInfo {
    pub id: GuildId,
    pub name: String,
    pub icon_url: Option<String>,
    pub owner_id: UserId,
    /// Approximate member count; Discord omits it on some responses.
    pub member_count: Option<u64>,
    pub channel_count: usize,
    pub role_count: usize,
}

/// Guild-membership record returned by a member lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberInfo {
    pub nick: Option<String>,
    pub role_count: usize,
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// Handle to a message the bot has sent, used to edit it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

/// Outbound content: plain text or a single rich embed.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

impl Reply {
    /// Shorthand for a plain-text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }
}

impl From<Embed> for Reply {
    fn from(embed: Embed) -> Self {
        Reply::Embed(embed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
