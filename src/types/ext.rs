//! Conversions from serenity models into the bot's domain types.
//!
//! serenity's structs carry every field Discord sends; the handlers only need
//! a handful. These `From` impls are the single place where that projection
//! happens, so a serenity upgrade that renames a field only touches this file.

use serenity::all::{Member, Message, PartialGuild, User};

use crate::types::{GuildInfo, IncomingMessage, MemberInfo, UserRef};

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            discriminator: user.discriminator.map(|d| d.get()),
            avatar_url: user.avatar_url(),
        }
    }
}

impl From<&Message> for IncomingMessage {
    fn from(msg: &Message) -> Self {
        Self {
            id: msg.id,
            author: UserRef::from(&msg.author),
            channel_id: msg.channel_id,
            guild_id: msg.guild_id,
            content: msg.content.clone(),
            mentions: msg.mentions.iter().map(UserRef::from).collect(),
        }
    }
}

impl From<&Member> for MemberInfo {
    fn from(member: &Member) -> Self {
        Self {
            nick: member.nick.clone(),
            role_count: member.roles.len(),
        }
    }
}

impl GuildInfo {
    /// Build from a REST guild response plus the separately fetched channel
    /// count (the guild endpoint does not include channels).
    pub fn from_partial(guild: &PartialGuild, channel_count: usize) -> Self {
        Self {
            id: guild.id,
            name: guild.name.clone(),
            icon_url: guild.icon_url(),
            owner_id: guild.owner_id,
            member_count: guild.approximate_member_count,
            channel_count,
            role_count: guild.roles.len(),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_user(avatar: serde_json::Value) -> User {
        serde_json::from_value(serde_json::json!({
            "id": "789",
            "username": "alice",
            "discriminator": "0001",
            "avatar": avatar,
            "global_name": null,
        }))
        .expect("valid user JSON")
    }

    #[test]
    fn user_ref_copies_identity() {
        let user = make_test_user(serde_json::Value::Null);
        let r = UserRef::from(&user);
        assert_eq!(r.id.get(), 789);
        assert_eq!(r.name, "alice");
        assert_eq!(r.discriminator, Some(1));
        assert_eq!(r.tag(), "alice#0001");
        assert!(r.avatar_url.is_none());
    }

    #[test]
    fn user_ref_avatar_url_present() {
        let user = make_test_user(serde_json::json!("a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4"));
        let r = UserRef::from(&user);
        let url = r.avatar_url.expect("avatar url");
        assert!(url.contains("/avatars/789/"), "unexpected url {url}");
    }

    #[test]
    fn user_ref_new_username_system() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "5",
            "username": "bob",
            "discriminator": "0",
            "avatar": null,
        }))
        .expect("valid user JSON");
        let r = UserRef::from(&user);
        assert_eq!(r.discriminator, None);
        assert_eq!(r.tag(), "bob");
    }
}
