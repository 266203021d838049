use crate::{ColumnarResponse, SearchError};
use async_trait::async_trait;

#[async_trait]
pub trait SearchBackend {
    /// Issues one search with an already encoded query string.
    ///
    /// Implementations map HTTP 429 to [`SearchError::RateLimited`] and any
    /// other non-success status to [`SearchError::Http`].
    async fn search(&self, query_string: &str) -> Result<ColumnarResponse, SearchError>;
}
