//! Embed payload and its builder.
//!
//! The embed mirrors the subset of Discord's embed object the bot sends. It
//! serializes to the same JSON shape Discord documents (`thumbnail.url`,
//! `footer.text`, `fields[].inline`), which keeps log output and test
//! fixtures recognisable. The transport converts it into serenity's
//! `CreateEmbed` right before sending.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A rich embed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 24-bit RGB colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedThumbnail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Embed {
    /// Iterate over every piece of text in the embed.
    ///
    /// Handy for assertions that only care whether something appears
    /// anywhere in the rendered message.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.title
            .as_deref()
            .into_iter()
            .chain(self.description.as_deref())
            .chain(
                self.fields
                    .iter()
                    .flat_map(|f| [f.name.as_str(), f.value.as_str()]),
            )
            .chain(self.footer.as_ref().map(|f| f.text.as_str()))
    }

    /// Look up a field value by its name.
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedThumbnail {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

// ===========================================================================
// Embed builder
// ===========================================================================

/// Ergonomic builder for [`Embed`].
///
/// # Examples
///
/// ```
/// use discord_command_bot::types::EmbedBuilder;
///
/// let embed = EmbedBuilder::new()
///     .title("Hello")
///     .description("World")
///     .color(0x00FF00)
///     .build();
/// assert_eq!(embed.title.as_deref(), Some("Hello"));
/// ```
#[derive(Debug, Default)]
pub struct EmbedBuilder {
    inner: Embed,
}

impl EmbedBuilder {
    /// Create a new empty embed builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the embed title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.inner.title = Some(title.into());
        self
    }

    /// Set the embed description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.inner.description = Some(desc.into());
        self
    }

    /// Set the embed color (as a 24-bit RGB integer, e.g. `0xFF6600`).
    pub fn color(mut self, color: u32) -> Self {
        self.inner.color = Some(color);
        self
    }

    /// Add a field to the embed.
    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.inner.fields.push(EmbedField {
            inline,
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Set the footer text.
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.inner.footer = Some(EmbedFooter { text: text.into() });
        self
    }

    /// Set the thumbnail URL.
    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.inner.thumbnail = Some(EmbedThumbnail { url: url.into() });
        self
    }

    /// Set the thumbnail URL if there is one.
    pub fn thumbnail_opt(self, url: Option<String>) -> Self {
        match url {
            Some(url) => self.thumbnail(url),
            None => self,
        }
    }

    /// Set the embed timestamp.
    pub fn timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.inner.timestamp = Some(ts);
        self
    }

    /// Consume the builder and return the finished [`Embed`].
    pub fn build(self) -> Embed {
        self.inner
    }
}

// ===========================================================================
// Tests
// ===========================================================================
