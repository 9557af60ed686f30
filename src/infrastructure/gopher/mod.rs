//! Gopher AI live search client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

use crate::application::errors::BotError;
use crate::domain::entities::SearchOutcome;
use crate::domain::traits::SearchClient;
use crate::infrastructure::config::{GopherConfig, GOPHER_API_KEY_ENV};

/// Data source queried by every search
const SEARCH_SOURCE: &str = "twitter";
/// Request mode for keyword searches
const SEARCH_MODE: &str = "searchbyquery";

/// API request structure
#[derive(Serialize, Debug, PartialEq)]
pub struct SearchRequest<'a> {
    #[serde(rename = "type")]
    pub source: &'static str,
    pub arguments: SearchArguments<'a>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct SearchArguments<'a> {
    #[serde(rename = "type")]
    pub mode: &'static str,
    pub query: &'a str,
    pub max_results: usize,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a str, max_results: usize) -> Self {
        Self {
            source: SEARCH_SOURCE,
            arguments: SearchArguments {
                mode: SEARCH_MODE,
                query,
                max_results,
            },
        }
    }
}

/// Gopher provider
pub struct GopherClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    max_results: usize,
    timeout: Duration,
}

impl GopherClient {
    pub fn new(config: &GopherConfig) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BotError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            max_results: config.max_results,
            timeout: config.timeout(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs())
        } else if err.is_connect() {
            format!("could not connect to {}: {}", self.endpoint, err)
        } else {
            err.to_string()
        }
    }
}

#[async_trait]
impl SearchClient for GopherClient {
    async fn search(&self, query: &str) -> SearchOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("Search requested but {} is not set", GOPHER_API_KEY_ENV);
            return SearchOutcome::Failed(format!("{} is not configured", GOPHER_API_KEY_ENV));
        };

        let request = SearchRequest::new(query, self.max_results);

        let response = match self.client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Gopher request failed: {}", e);
                return SearchOutcome::Failed(self.describe(&e));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to read Gopher response: {}", e);
                return SearchOutcome::Failed(self.describe(&e));
            }
        };

        if status != StatusCode::OK {
            tracing::warn!("Gopher API returned {}", status);
            return SearchOutcome::Upstream {
                status: status.as_u16(),
                body,
            };
        }

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(data) => {
                let outcome = SearchOutcome::from_body(&data);
                if let SearchOutcome::Results(items) = &outcome {
                    tracing::info!("Gopher returned {} results for {:?}", items.len(), query);
                }
                outcome
            }
            Err(e) => {
                tracing::error!("Invalid JSON from Gopher: {}", e);
                SearchOutcome::Failed(format!("invalid JSON response: {}", e))
            }
        }
    }
}
