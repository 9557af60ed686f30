//! In-memory fakes for exercising handlers without a network

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::{Reply, SearchOutcome};
use crate::domain::traits::{Bot, BotInfo, SearchClient};

/// Bot that records every reply instead of delivering it
pub struct RecordingBot {
    sent: Mutex<Vec<(String, Reply)>>,
    typing: AtomicUsize,
    fail_remaining: AtomicUsize,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            typing: AtomicUsize::new(0),
            fail_remaining: AtomicUsize::new(0),
        }
    }

    /// Make the next `n` sends fail with a network error
    pub fn failing_first(self, n: usize) -> Self {
        self.fail_remaining.store(n, Ordering::SeqCst);
        self
    }

    pub fn replies(&self) -> Vec<(String, Reply)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.replies().into_iter().map(|(_, reply)| reply.text).collect()
    }

    pub fn typing_count(&self) -> usize {
        self.typing.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat_id: &str, reply: &Reply) -> Result<String, BotError> {
        let failing = self
            .fail_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(BotError::Network("simulated send failure".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((chat_id.to_string(), reply.clone()));
        Ok(sent.len().to_string())
    }

    async fn send_typing(&self, _chat_id: &str) -> Result<(), BotError> {
        self.typing.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            name: "Test Bot".to_string(),
            username: "test_bot".to_string(),
        }
    }
}

/// Search client returning a canned outcome and recording queries
pub struct FakeSearch {
    outcome: SearchOutcome,
    queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    pub fn new(outcome: SearchOutcome) -> Self {
        Self {
            outcome,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for FakeSearch {
    async fn search(&self, query: &str) -> SearchOutcome {
        self.queries.lock().unwrap().push(query.to_string());
        self.outcome.clone()
    }
}
