use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::formatting::{self, DEFAULT_MAX_RESULTS};
use crate::domain::traits::{Bot, SearchClient};

/// Service handling the `search` command end to end
pub struct SearchService {
    client: Arc<dyn SearchClient>,
    max_results: usize,
}

impl SearchService {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            client,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Join argument tokens into the query, `None` when there are none
    pub fn build_query(args: &[String]) -> Option<String> {
        if args.is_empty() {
            None
        } else {
            Some(args.join(" "))
        }
    }

    /// Validate, acknowledge, search and reply.
    ///
    /// Sends the usage message and returns when `args` is empty. Otherwise
    /// the acknowledgment always goes out before the final reply.
    pub async fn handle(&self, bot: &dyn Bot, chat_id: &str, args: &[String]) -> Result<(), BotError> {
        let Some(query) = Self::build_query(args) else {
            bot.send_message(chat_id, &formatting::usage()).await?;
            return Ok(());
        };

        if let Err(e) = bot.send_message(chat_id, &formatting::searching(&query)).await {
            tracing::warn!("Failed to acknowledge search in chat {}: {}", chat_id, e);
        }
        if let Err(e) = bot.send_typing(chat_id).await {
            tracing::debug!("Failed to send typing action: {}", e);
        }

        tracing::info!("Searching for {:?} (chat {})", query, chat_id);
        let outcome = self.client.search(&query).await;
        let reply = formatting::search_reply(&outcome, self.max_results);

        bot.send_message(chat_id, &reply).await?;
        Ok(())
    }
}
