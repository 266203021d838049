use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("rate limited by search service (HTTP 429)")]
    RateLimited,

    #[error("search service returned HTTP {status}")]
    Http { status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed search response: {0}")]
    MalformedResponse(String),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl SearchError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SearchError::RateLimited)
    }
}
