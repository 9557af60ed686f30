//! Gopher client integration tests against a loopback HTTP server
//! Run with: cargo test --test gopher_client_test

mod common;

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};

use common::{closed_port, ensure_init, mock_server, silent_server, MockResponse};
use gopher_explore_bot::application::errors::BotError;
use gopher_explore_bot::application::messaging::{MessageDispatcher, MessageParser};
use gopher_explore_bot::application::services::{CommandService, SearchService};
use gopher_explore_bot::domain::entities::{Reply, SearchOutcome};
use gopher_explore_bot::domain::traits::{Bot, BotInfo, SearchClient};
use gopher_explore_bot::infrastructure::config::GopherConfig;
use gopher_explore_bot::infrastructure::gopher::GopherClient;

fn client_for(port: u16, timeout_secs: u64) -> GopherClient {
    let config = GopherConfig {
        api_key: Some("test-key".to_string()),
        endpoint: format!("http://127.0.0.1:{}/api/v1/search/live", port),
        timeout_secs,
        ..GopherConfig::default()
    };
    GopherClient::new(&config).unwrap()
}

#[derive(Default)]
struct CollectingBot {
    sent: Mutex<Vec<String>>,
}

#[async_trait]
impl Bot for CollectingBot {
    async fn send_message(&self, _chat_id: &str, reply: &Reply) -> Result<String, BotError> {
        self.sent.lock().unwrap().push(reply.text.clone());
        Ok("1".to_string())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            name: "Test".to_string(),
            username: "test_bot".to_string(),
        }
    }
}

#[tokio::test]
async fn sends_bearer_token_and_query_body() {
    ensure_init();
    let (port, mut requests) = mock_server(vec![MockResponse::json(200, json!({"results": []}))]).await;

    client_for(port, 15).search("rust language").await;

    let req = requests.recv().await.expect("request captured");
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/v1/search/live");
    assert_eq!(req.headers.get("authorization").map(String::as_str), Some("Bearer test-key"));
    assert_eq!(req.headers.get("content-type").map(String::as_str), Some("application/json"));
    assert_eq!(
        req.body,
        json!({
            "type": "twitter",
            "arguments": {"type": "searchbyquery", "query": "rust language", "max_results": 5}
        })
    );
}

#[tokio::test]
async fn success_returns_result_list() {
    ensure_init();
    let body = json!({"results": [{"text": "Rust is great"}, {"text": "Rust 2.0 news"}]});
    let (port, _requests) = mock_server(vec![MockResponse::json(200, body)]).await;

    let outcome = client_for(port, 15).search("rust").await;

    assert_eq!(
        outcome,
        SearchOutcome::Results(vec![json!({"text": "Rust is great"}), json!({"text": "Rust 2.0 news"})])
    );
}

#[tokio::test]
async fn missing_results_field_is_empty() {
    ensure_init();
    let (port, _requests) = mock_server(vec![MockResponse::json(200, json!({"status": "ok"}))]).await;

    assert_eq!(client_for(port, 15).search("rust").await, SearchOutcome::Results(vec![]));
}

#[tokio::test]
async fn non_200_is_upstream_error_with_body() {
    ensure_init();
    let (port, _requests) = mock_server(vec![MockResponse::raw(429, "slow down")]).await;

    assert_eq!(
        client_for(port, 15).search("rust").await,
        SearchOutcome::Upstream { status: 429, body: "slow down".to_string() }
    );
}

#[tokio::test]
async fn malformed_json_is_a_failure() {
    ensure_init();
    let (port, _requests) = mock_server(vec![MockResponse::raw(200, "<html>oops</html>")]).await;

    match client_for(port, 15).search("rust").await {
        SearchOutcome::Failed(description) => assert!(description.starts_with("invalid JSON response")),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn connection_refused_is_a_failure() {
    ensure_init();
    let port = closed_port().await;

    assert!(matches!(client_for(port, 15).search("rust").await, SearchOutcome::Failed(_)));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    ensure_init();
    let port = silent_server().await;

    assert_eq!(
        client_for(port, 1).search("rust").await,
        SearchOutcome::Failed("request timed out after 1s".to_string())
    );
}

#[tokio::test]
async fn search_command_end_to_end() {
    ensure_init();
    let body = json!({"results": [{"text": "Rust is great"}, {"text":"Rust 2.0 news"}]});
    let (port, mut requests) = mock_server(vec![MockResponse::json(200, body)]).await;

    let search = SearchService::new(Arc::new(client_for(port, 15)));
    let dispatcher = MessageDispatcher::new(CommandService::default(), search);
    let bot = CollectingBot::default();
    let message = MessageParser::new().parse("7", "/search rust language", None).unwrap();

    dispatcher.dispatch(&bot, &message).await.unwrap();

    let sent = bot.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0], "🔎 Searching for `rust language`...");
    assert!(sent[1].starts_with("🔍 Search Results:\n\n1. Rust is great...\n\n2. Rust 2.0 news..."));
    assert_eq!(requests.recv().await.unwrap().body["arguments"]["query"], "rust language");
}

#[tokio::test]
async fn search_without_keyword_makes_no_request() {
    ensure_init();
    let (port, mut requests) = mock_server(vec![MockResponse::json(200, json!({"results": []}))]).await;

    let search = SearchService::new(Arc::new(client_for(port, 15)));
    let dispatcher = MessageDispatcher::new(CommandService::default(), search);
    let bot = CollectingBot::default();
    let message = MessageParser::new().parse("7", "/search", None).unwrap();

    dispatcher.dispatch(&bot, &message).await.unwrap();

    assert_eq!(*bot.sent.lock().unwrap(), vec!["⚠️ Usage: `/search <keyword>`".to_string()]);
    assert!(requests.try_recv().is_err());
}
