use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const RESULT_LIMIT_MIN: u32 = 1;
pub const RESULT_LIMIT_MAX: u32 = 100;
pub const DEFAULT_RESULT_LIMIT: u32 = 20;

pub const RERANK_LIMIT_MIN: u32 = 1;
/// Shares the `numResults` ceiling. The service itself accepts up to 200.
pub const RERANK_LIMIT_MAX: u32 = 100;
pub const DEFAULT_RERANK_LIMIT: u32 = 5;

pub const RATE_LIMIT_TITLE: &str = "Rate Limit Exceeded";
pub const RATE_LIMIT_MESSAGE: &str =
    "Too many searches in a short period of time. Please wait a minute and try again.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    #[default]
    FullText,
    Vector,
    VectorRerank,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::FullText => "full-text",
            SearchMode::Vector => "vector",
            SearchMode::VectorRerank => "vector-rerank",
        }
    }

    pub fn uses_rerank(&self) -> bool {
        matches!(self, SearchMode::VectorRerank)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "full-text" => Ok(SearchMode::FullText),
            "vector" => Ok(SearchMode::Vector),
            "vector-rerank" => Ok(SearchMode::VectorRerank),
            other => Err(format!(
                "unknown search mode `{other}` (expected full-text, vector or vector-rerank)"
            )),
        }
    }
}

/// One outbound search, as it will be transmitted.
///
/// Filters are already case-folded and empty fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query_text: Option<String>,
    pub search_mode: SearchMode,
    pub result_limit: u32,
    pub rerank_limit: Option<u32>,
    pub preacher_filter: Option<String>,
    pub title_filter: Option<String>,
    pub video_id_filter: Option<String>,
}

/// Chunk identifier as returned by the service. Older collections used
/// integer ids, current ones use strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultId {
    Text(String),
    Integer(i64),
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultId::Text(text) => f.write_str(text),
            ResultId::Integer(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub preacher: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub mp4_url: Option<String>,
}

/// Columnar query result. Every column holds one inner list per query in the
/// batch; the client always sends a single query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnarResponse {
    pub ids: Vec<Vec<ResultId>>,
    pub metadatas: Vec<Vec<Option<HitMetadata>>>,
    pub documents: Vec<Vec<Option<String>>>,
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
    #[serde(default)]
    pub scores: Option<Vec<Vec<Option<f64>>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub preacher_name: String,
    pub section_name: String,
    pub video_url: Option<String>,
    pub media_video_url: Option<String>,
    pub media_audio_url: Option<String>,
    pub caption_url: Option<String>,
    pub content_snippet: String,
    pub distance: Option<f64>,
    pub rerank_score: Option<f64>,
}

impl SearchResultItem {
    /// Stand-in row shown when the service rejects a search with HTTP 429.
    pub fn rate_limit_placeholder() -> Self {
        Self {
            id: "rate-limited".to_string(),
            title: RATE_LIMIT_TITLE.to_string(),
            preacher_name: String::new(),
            section_name: String::new(),
            video_url: None,
            media_video_url: None,
            media_audio_url: None,
            caption_url: None,
            content_snippet: RATE_LIMIT_MESSAGE.to_string(),
            distance: None,
            rerank_score: None,
        }
    }

    pub fn is_rate_limit_placeholder(&self) -> bool {
        self.id == "rate-limited" && self.title == RATE_LIMIT_TITLE
    }
}
