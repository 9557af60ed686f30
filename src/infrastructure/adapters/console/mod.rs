//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::{MessageDispatcher, MessageParser};
use crate::domain::entities::Reply;
use crate::domain::traits::{Bot, BotInfo};

/// Chat id used for every console message
pub const CONSOLE_CHAT_ID: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                name: "Gopher Explore Bot".to_string(),
                username: "console".to_string(),
            },
        }
    }

    /// Read stdin line by line and dispatch each one until EOF
    pub async fn run(&self, dispatcher: &MessageDispatcher) -> Result<(), BotError> {
        let parser = MessageParser::new();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("Type a message or /help. Ctrl-D to quit.");
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some(message) = parser.parse(CONSOLE_CHAT_ID, line, None) else {
                continue;
            };
            if let Err(e) = dispatcher.dispatch(self, &message).await {
                tracing::error!("Failed to handle message: {}", e);
            }
        }
        Ok(())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_message(&self, _chat_id: &str, reply: &Reply) -> Result<String, BotError> {
        println!("[BOT] {}", reply.text);
        Ok("console_msg".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
