pub mod backend;
pub mod client;
pub mod error;
pub mod links;
pub mod models;
pub mod query;
pub mod render;
pub mod reshape;
pub mod text;
pub mod traits;

pub use backend::{HttpSearchBackend, DEFAULT_ENDPOINT};
pub use client::{SearchClient, SearchStatus};
pub use error::SearchError;
pub use links::{
    church_links, contact_links, project_links, ChangelogEntry, InfoOverlay, Link, LinkGroup,
    CHANGELOG,
};
pub use models::{
    ColumnarResponse, HitMetadata, ResultId, SearchMode, SearchRequest, SearchResultItem,
    DEFAULT_RERANK_LIMIT, DEFAULT_RESULT_LIMIT, RERANK_LIMIT_MAX, RERANK_LIMIT_MIN,
    RESULT_LIMIT_MAX, RESULT_LIMIT_MIN,
};
pub use query::encode_query;
pub use render::{render_item, render_results, NO_RESULTS};
pub use reshape::reshape_response;
pub use text::{audio_url, capitalize_words, caption_url, derive_media_url, is_digits_only};
pub use traits::SearchBackend;
