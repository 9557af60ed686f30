//! Telegram adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{self, CommandKind, ParseMode, Reply};
use crate::domain::traits::{Bot, BotInfo};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Extra time allowed on top of the long-poll timeout before giving up
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

/// Envelope shared by every Bot API response
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl Update {
    /// Convert into a domain message. Non-text updates yield `None`.
    pub fn to_message(&self, parser: &MessageParser) -> Option<entities::Message> {
        let msg = self.message.as_ref()?;
        let text = msg.text.as_deref()?;
        let sender = msg.from.as_ref().map(|u| {
            let mut user = entities::User::new(u.id.to_string());
            user.username = u.username.clone();
            user.first_name = u.first_name.clone();
            user
        });
        parser.parse(msg.chat.id.to_string(), text, sender)
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_base: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: API_BASE.to_string(),
            client: Client::new(),
            info: BotInfo {
                name: "Gopher Explore Bot".to_string(),
                username: "unknown".to_string(),
            },
        }
    }

    /// Point the adapter at a different Bot API server
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// POST a method call and unwrap the `{ok, result}` envelope
    async fn call<Req, Res>(&self, method: &str, request: &Req, timeout: Option<Duration>) -> Result<Res, BotError>
    where
        Req: Serialize + ?Sized + Sync,
        Res: for<'de> Deserialize<'de>,
    {
        let mut builder = self.client.post(self.api_url(method)).json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| BotError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let data: ApiResponse<Res> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.without_url().to_string()))?;

        match data.result {
            Some(result) if data.ok => Ok(result),
            _ => Err(BotError::Api {
                status: status.as_u16(),
                description: data.description.unwrap_or_else(|| format!("{} failed", method)),
            }),
        }
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            first_name: String,
            username: Option<String>,
        }

        let data: BotInfoResponse = self.call("getMe", &serde_json::json!({}), None).await?;

        self.info = BotInfo {
            name: data.first_name,
            username: data.username.unwrap_or_default(),
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: u64,
            allowed_updates: Vec<String>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message".to_string()],
        };

        let wait = Duration::from_secs(timeout_secs) + POLL_GRACE;
        self.call("getUpdates", &request, Some(wait)).await
    }

    /// Get the next update offset
    pub fn get_next_offset(current: i64, updates: &[Update]) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
            .max(current)
    }

    /// Send a message with specific parse mode
    pub async fn send_message_with_format(&self, chat_id: &str, text: &str, parse_mode: Option<&str>) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            text: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            parse_mode: Option<&'a str>,
        }

        #[derive(Deserialize)]
        struct MessageResult {
            message_id: i64,
        }

        let request = SendMessageRequest { chat_id, text, parse_mode };
        let result: MessageResult = self.call("sendMessage", &request, None).await?;

        Ok(result.message_id.to_string())
    }

    /// Register bot commands with Telegram
    pub async fn register_commands(&self) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command {
            command: &'static str,
            description: &'static str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest {
            commands: Vec<Command>,
        }

        let commands = CommandKind::ALL
            .iter()
            .map(|kind| Command { command: kind.name(), description: kind.description() })
            .collect();

        let _: bool = self.call("setMyCommands", &SetMyCommandsRequest { commands }, None).await?;

        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }

    /// Send chat action (typing, upload_photo, etc.)
    pub async fn send_chat_action(&self, chat_id: &str, action: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct SendChatActionRequest<'a> {
            chat_id: &'a str,
            action: &'a str,
        }

        let _: bool = self
            .call("sendChatAction", &SendChatActionRequest { chat_id, action }, None)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    /// Markdown replies that Telegram refuses to parse are resent as plain text
    async fn send_message(&self, chat_id: &str, reply: &Reply) -> Result<String, BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, reply.text);

        match reply.parse_mode {
            ParseMode::Plain => self.send_message_with_format(chat_id, &reply.text, None).await,
            ParseMode::Markdown => {
                match self.send_message_with_format(chat_id, &reply.text, Some("Markdown")).await {
                    Err(BotError::Api { status: 400, description }) => {
                        tracing::warn!("Markdown failed, using plain text: {}", description);
                        self.send_message_with_format(chat_id, &reply.text, None).await
                    }
                    other => other,
                }
            }
        }
    }

    async fn send_typing(&self, chat_id: &str) -> Result<(), BotError> {
        self.send_chat_action(chat_id, "typing").await
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
