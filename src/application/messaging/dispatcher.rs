//! Message dispatcher - Routes each message to exactly one handler

use chrono::Utc;

use crate::application::errors::BotError;
use crate::application::services::{CommandService, SearchService};
use crate::domain::entities::{CommandKind, Content, Message, StaticCommand};
use crate::domain::traits::Bot;

/// Where a message goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    Static(StaticCommand),
    Search(&'a [String]),
    Unknown(&'a str),
    Echo(&'a str),
}

impl<'a> Route<'a> {
    pub fn classify(content: &'a Content) -> Self {
        match content {
            Content::Command { name, args } => match CommandKind::from_name(name) {
                Some(CommandKind::Static(command)) => Route::Static(command),
                Some(CommandKind::Search) => Route::Search(args),
                None => Route::Unknown(name),
            },
            Content::Text(text) => Route::Echo(text),
        }
    }
}

/// Message dispatcher - stateless, safe to share across tasks
pub struct MessageDispatcher {
    commands: CommandService,
    search: SearchService,
}

impl MessageDispatcher {
    pub fn new(commands: CommandService, search: SearchService) -> Self {
        Self { commands, search }
    }

    /// Handle one message, sending its replies through `bot`
    pub async fn dispatch(&self, bot: &dyn Bot, message: &Message) -> Result<(), BotError> {
        let chat_id = message.chat_id.as_str();
        let route = Route::classify(&message.content);
        let sender = message
            .sender
            .as_ref()
            .map(|user| user.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        tracing::debug!("[{}] {} from {}: {:?}", chat_id, message.id, sender, route);

        let result = self.route(bot, chat_id, route).await;

        let elapsed = Utc::now() - message.timestamp;
        tracing::debug!("[{}] {} handled in {}ms", chat_id, message.id, elapsed.num_milliseconds());
        result
    }

    async fn route(&self, bot: &dyn Bot, chat_id: &str, route: Route<'_>) -> Result<(), BotError> {
        let reply = match route {
            Route::Search(args) => return self.search.handle(bot, chat_id, args).await,
            Route::Static(command) => self.commands.reply_for(command),
            Route::Unknown(name) => {
                tracing::info!("Unknown command /{} from chat {}", name, chat_id);
                self.commands.unknown_command()
            }
            Route::Echo(text) => self.commands.echo(text),
        };

        bot.send_message(chat_id, &reply).await?;
        Ok(())
    }
}
