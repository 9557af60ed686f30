use async_trait::async_trait;
use crate::domain::entities::Reply;
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a reply to a chat, returning the platform message id
    async fn send_message(&self, chat_id: &str, reply: &Reply) -> Result<String, BotError>;

    /// Show a "typing" indicator while a slow handler runs
    async fn send_typing(&self, _chat_id: &str) -> Result<(), BotError> {
        Ok(())
    }

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub name: String,
    pub username: String,
}
