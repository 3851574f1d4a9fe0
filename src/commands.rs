//! Prefix-command routing.
//!
//! [`parse`] decides whether a message is a command at all and splits it into
//! a [`ParsedCommand`]. [`Command`] is the fixed dispatch table; it is also
//! what the `help` embed enumerates, so the listing cannot drift away from
//! what the router actually accepts.

use serenity::all::UserId;

use crate::types::IncomingMessage;

// ---------------------------------------------------------------------------
// Dispatch table
// ---------------------------------------------------------------------------

/// Every command the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Ping,
    Help,
    Info,
    Server,
    UserInfo,
}

impl Command {
    /// All commands, in the order `help` lists them.
    pub const ALL: [Command; 5] = [
        Command::Ping,
        Command::Help,
        Command::Info,
        Command::Server,
        Command::UserInfo,
    ];

    /// The token that invokes this command (always lowercase).
    pub fn name(self) -> &'static str {
        match self {
            Command::Ping => "ping",
            Command::Help => "help",
            Command::Info => "info",
            Command::Server => "server",
            Command::UserInfo => "userinfo",
        }
    }

    /// Invocation syntax without the prefix.
    pub fn usage(self) -> &'static str {
        match self {
            Command::UserInfo => "userinfo [@user]",
            other => other.name(),
        }
    }

    /// One-line description shown by `help`.
    pub fn description(self) -> &'static str {
        match self {
            Command::Ping => "Check the bot's latency",
            Command::Help => "Show this help message",
            Command::Info => "Display information about the bot",
            Command::Server => "Show information about the current server",
            Command::UserInfo => "Show information about yourself or a mentioned user",
        }
    }

    /// Look up a command by its (already lowercased) token.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A message that looked like a command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// First token after the prefix, lowercased.
    pub name: String,
    /// Remaining tokens, original casing.
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// The dispatch-table entry for this command, if it is a known one.
    pub fn command(&self) -> Option<Command> {
        Command::from_name(&self.name)
    }
}

/// Turn a message into a command, or `None` if it should be ignored.
///
/// Messages from the bot itself are always ignored so it can never answer its
/// own replies. The prefix match is exact and case-sensitive; the command
/// token is matched case-insensitively.
pub fn parse(prefix: &str, bot_user_id: UserId, msg: &IncomingMessage) -> Option<ParsedCommand> {
    if msg.author.id == bot_user_id {
        return None;
    }

    let rest = msg.content.strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let name = tokens.next()?.to_lowercase();
    let args = tokens.map(str::to_string).collect();

    Some(ParsedCommand { name, args })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserRef;
    use serenity::all::{ChannelId, GuildId, MessageId};

    const BOT: UserId = UserId::new(1);
    const HUMAN: UserId = UserId::new(2);

    fn message(author: UserId, content: &str) -> IncomingMessage {
        IncomingMessage {
            id: MessageId::new(10),
            author: UserRef {
                id: author,
                name: "someone".to_string(),
                discriminator: None,
                avatar_url: None,
            },
            channel_id: ChannelId::new(20),
            guild_id: Some(GuildId::new(30)),
            content: content.to_string(),
            mentions: Vec::new(),
        }
    }

    // -- Command table ------------------------------------------------------

    #[test]
    fn table_has_five_unique_names() {
        let mut names: Vec<&str> = Command::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn from_name_round_trips_every_entry() {
        for cmd in Command::ALL {
            assert_eq!(Command::from_name(cmd.name()), Some(cmd));
        }
        assert_eq!(Command::from_name("frobnicate"), None);
        assert_eq!(Command::from_name("PING"), None, "table is keyed by lowercase");
    }

    #[test]
    fn every_command_has_usage_and_description() {
        for cmd in Command::ALL {
            assert!(cmd.usage().starts_with(cmd.name()));
            assert!(!cmd.description().is_empty(), "{cmd} has no description");
        }
    }

    // -- parse() ------------------------------------------------------------

    #[test]
    fn ignores_own_messages() {
        for content in ["!ping", "!help", "!", "hello"] {
            assert_eq!(parse("!", BOT, &message(BOT, content)), None);
        }
    }

    #[test]
    fn ignores_messages_without_prefix() {
        assert_eq!(parse("!", BOT, &message(HUMAN, "ping")), None);
        assert_eq!(parse("!", BOT, &message(HUMAN, " !ping")), None);
        assert_eq!(parse("?", BOT, &message(HUMAN, "!ping")), None);
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        assert_eq!(parse("bot!", BOT, &message(HUMAN, "BOT! ping")), None);
        assert!(parse("bot!", BOT, &message(HUMAN, "bot! ping")).is_some());
    }

    #[test]
    fn ignores_prefix_followed_by_whitespace_only() {
        for content in ["!", "!   ", "!\t\n"] {
            assert_eq!(parse("!", BOT, &message(HUMAN, content)), None);
        }
    }

    #[test]
    fn command_token_is_lowercased() {
        for content in ["!PING", "!Ping", "!ping"] {
            let parsed = parse("!", BOT, &message(HUMAN, content)).expect("command");
            assert_eq!(parsed.name, "ping");
            assert_eq!(parsed.command(), Some(Command::Ping));
        }
    }

    #[test]
    fn args_keep_casing_and_collapse_whitespace() {
        let parsed = parse("!", BOT, &message(HUMAN, "!UserInfo   Foo\tBAR  ")).expect("command");
        assert_eq!(parsed.name, "userinfo");
        assert_eq!(parsed.args, vec!["Foo".to_string(), "BAR".to_string()]);
    }

    #[test]
    fn whitespace_between_prefix_and_command_is_allowed() {
        let parsed = parse("!", BOT, &message(HUMAN, "!  help")).expect("command");
        assert_eq!(parsed.command(), Some(Command::Help));
    }

    #[test]
    fn unknown_commands_still_parse() {
        let parsed = parse("!", BOT, &message(HUMAN, "!frobnicate now")).expect("command");
        assert_eq!(parsed.name, "frobnicate");
        assert_eq!(parsed.command(), None);
    }
}
