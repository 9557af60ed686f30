//! Message parser - Parses raw chat text into structured messages

use crate::domain::entities::{Message, Content, User};

/// Parses incoming text into Message objects
pub struct MessageParser {
    bot_username: Option<String>,
}

impl MessageParser {
    pub fn new() -> Self {
        Self { bot_username: None }
    }

    /// Commands addressed as `/cmd@other_bot` are dropped once the bot's own
    /// username is known.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Parse a text message. Returns `None` for commands meant for another bot.
    pub fn parse(&self, chat_id: impl Into<String>, text: impl Into<String>, sender: Option<User>) -> Option<Message> {
        let text = text.into();
        let chat_id = chat_id.into();

        let command = split_command(&text)
            .map(|(name, target, args)| (name.to_string(), target.map(str::to_string), args));
        let Some((name, target, args)) = command else {
            return Some(Message::new(chat_id, Content::Text(text)).with_sender_opt(sender));
        };

        if let Some(target) = &target {
            if !self.is_addressed_to_me(target) {
                tracing::debug!("Ignoring /{} addressed to @{}", name, target);
                return None;
            }
        }

        let content = Content::Command { name, args };
        Some(Message::new(chat_id, content).with_sender_opt(sender))
    }

    fn is_addressed_to_me(&self, target: &str) -> bool {
        match &self.bot_username {
            Some(me) => me.eq_ignore_ascii_case(target),
            None => true,
        }
    }
}

/// Split `/name[@username] args...` into its parts. Anything else, such as
/// `//name`, `/ name` or a name outside `[A-Za-z0-9_]`, is plain text.
fn split_command(text: &str) -> Option<(&str, Option<&str>, Vec<String>)> {
    let rest = text.strip_prefix('/')?;
    let head_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (head, tail) = rest.split_at(head_end);

    let (name, target) = match head.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (head, None),
    };
    if !is_command_word(name) || target.is_some_and(|t| !is_command_word(t)) {
        return None;
    }

    let args = tail.split_whitespace().map(|s| s.to_string()).collect();
    Some((name, target, args))
}

fn is_command_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new()
    }
}
