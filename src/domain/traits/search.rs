use async_trait::async_trait;
use crate::domain::entities::SearchOutcome;

/// SearchClient trait - abstraction over the live search API
///
/// Implementations make at most one attempt and fold every failure into
/// the returned [`SearchOutcome`].
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str) -> SearchOutcome;
}
