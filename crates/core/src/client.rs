use crate::models::{
    SearchMode, SearchRequest, SearchResultItem, DEFAULT_RERANK_LIMIT, DEFAULT_RESULT_LIMIT,
    RERANK_LIMIT_MAX, RERANK_LIMIT_MIN, RESULT_LIMIT_MAX, RESULT_LIMIT_MIN,
};
use crate::query::encode_query;
use crate::reshape::reshape_response;
use crate::text::is_digits_only;
use crate::traits::SearchBackend;
use crate::SearchError;
use tracing::{debug, error, info, warn};

/// How a call to [`SearchClient::execute_search`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Completed { hits: usize },
    RateLimited,
    Failed,
    /// A search was already in flight, nothing was sent.
    Skipped,
}

/// Editable search form plus the most recent result list.
///
/// All edits go through the setters so the digit-only video ID and the
/// slider ranges hold after any sequence of calls.
pub struct SearchClient<B> {
    backend: B,
    query_text: String,
    preacher: String,
    title: String,
    video_id: String,
    search_mode: SearchMode,
    result_limit: u32,
    rerank_limit: u32,
    is_busy: bool,
    results: Vec<SearchResultItem>,
}

impl<B> SearchClient<B>
where
    B: SearchBackend + Send + Sync,
{
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            query_text: String::new(),
            preacher: String::new(),
            title: String::new(),
            video_id: String::new(),
            search_mode: SearchMode::default(),
            result_limit: DEFAULT_RESULT_LIMIT,
            rerank_limit: DEFAULT_RERANK_LIMIT,
            is_busy: false,
            results: Vec::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn preacher(&self) -> &str {
        &self.preacher
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    pub fn result_limit(&self) -> u32 {
        self.result_limit
    }

    pub fn rerank_limit(&self) -> u32 {
        self.rerank_limit
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    pub fn set_preacher(&mut self, preacher: impl Into<String>) {
        self.preacher = preacher.into();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns `false` and keeps the previous value when `value` contains
    /// anything but ASCII digits.
    pub fn set_video_id(&mut self, value: &str) -> bool {
        if !is_digits_only(value) {
            debug!(rejected = value, "video id edit ignored");
            return false;
        }
        self.video_id = value.to_string();
        true
    }

    pub fn set_search_mode(&mut self, mode: SearchMode) {
        self.search_mode = mode;
    }

    /// Clamps into `1..=100` and returns the stored value.
    pub fn set_result_limit(&mut self, limit: u32) -> u32 {
        self.result_limit = limit.clamp(RESULT_LIMIT_MIN, RESULT_LIMIT_MAX);
        self.result_limit
    }

    /// Clamps into `1..=RERANK_LIMIT_MAX` and returns the stored value.
    pub fn set_rerank_limit(&mut self, limit: u32) -> u32 {
        self.rerank_limit = limit.clamp(RERANK_LIMIT_MIN, RERANK_LIMIT_MAX);
        self.rerank_limit
    }

    pub fn build_request(&self) -> SearchRequest {
        SearchRequest {
            query_text: non_empty(&self.query_text),
            search_mode: self.search_mode,
            result_limit: self.result_limit,
            rerank_limit: self.search_mode.uses_rerank().then_some(self.rerank_limit),
            preacher_filter: non_empty(&self.preacher).map(|value| value.to_lowercase()),
            title_filter: non_empty(&self.title).map(|value| value.to_lowercase()),
            video_id_filter: non_empty(&self.video_id),
        }
    }

    /// Marks the client busy and clears the previous results.
    ///
    /// Returns `None` while another search is in flight.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        if self.is_busy {
            return None;
        }
        self.is_busy = true;
        self.results.clear();
        Some(self.build_request())
    }

    /// Applies the outcome of an in-flight search and clears the busy flag.
    ///
    /// A rate-limited outcome stores the placeholder row and skips the error path.
    pub fn finish_search(&mut self, outcome: Result<Vec<SearchResultItem>, SearchError>) -> SearchStatus {
        let status = match outcome {
            Ok(items) => {
                let hits = items.len();
                self.results = items;
                info!(hits, "search completed");
                SearchStatus::Completed { hits }
            }
            Err(failure) if failure.is_rate_limited() => {
                warn!("search rate limited by service");
                self.results = vec![SearchResultItem::rate_limit_placeholder()];
                SearchStatus::RateLimited
            }
            Err(failure) => {
                error!(error = %failure, "failed to fetch search results");
                SearchStatus::Failed
            }
        };

        self.is_busy = false;
        status
    }

    pub async fn execute_search(&mut self) -> SearchStatus {
        let Some(request) = self.begin_search() else {
            debug!("search already in flight");
            return SearchStatus::Skipped;
        };

        let query_string = encode_query(&request);
        debug!(query = %query_string, mode = %request.search_mode, "encoded search query");

        let outcome = match self.backend.search(&query_string).await {
            Ok(response) => reshape_response(response),
            Err(failure) => Err(failure),
        };

        self.finish_search(outcome)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnarResponse, RATE_LIMIT_MESSAGE, RATE_LIMIT_TITLE};
    use async_trait::async_trait;
    use std::sync::Mutex;

    enum Reply {
        Columns(&'static str),
        RateLimited,
        Status(u16),
        Garbled,
    }

    struct FakeBackend {
        reply: Reply,
        seen: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<String> {
            self.seen.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl SearchBackend for FakeBackend {
        async fn search(&self, query_string: &str) -> Result<ColumnarResponse, SearchError> {
            self.seen.lock().expect("lock").push(query_string.to_string());
            match &self.reply {
                Reply::Columns(json) => Ok(serde_json::from_str(json)?),
                Reply::RateLimited => Err(SearchError::RateLimited),
                Reply::Status(status) => Err(SearchError::Http { status: *status }),
                Reply::Garbled => Err(serde_json::from_str::<ColumnarResponse>("{\"ids\": [")
                    .expect_err("truncated json")
                    .into()),
            }
        }
    }

    const TWO_HITS: &str = r#"{
        "ids": [[1, 2]],
        "metadatas": [[
            {"title": "john 3:16", "preacher": "john doe", "section": "gospel",
             "video_url": "http://a/b", "mp4_url": "http://a/b.mp4"},
            {"title": "romans road", "preacher": "john doe", "section": "gospel",
             "video_url": "http://a/c", "mp4_url": "http://a/c.mp4"}
        ]],
        "documents": [["text1", "text2"]]
    }"#;

    async fn client_with_previous_results() -> SearchClient<FakeBackend> {
        let mut client = SearchClient::new(FakeBackend::new(Reply::Columns(TWO_HITS)));
        client.execute_search().await;
        assert_eq!(client.results().len(), 2);
        client
    }

    #[test]
    fn video_id_never_holds_non_digits() {
        let mut client = SearchClient::new(FakeBackend::new(Reply::Status(500)));
        let edits = ["1", "12", "12a", "123", "x", "", "45 6", "789"];
        let mut last_accepted = String::new();

        for edit in edits {
            if client.set_video_id(edit) {
                last_accepted = edit.to_string();
            }
            assert!(client.video_id().bytes().all(|byte| byte.is_ascii_digit()));
            assert_eq!(client.video_id(), last_accepted);
        }
        assert_eq!(client.video_id(), "789");
    }

    #[test]
    fn limits_are_clamped_to_slider_range() {
        let mut client = SearchClient::new(FakeBackend::new(Reply::Status(500)));
        assert_eq!(client.set_result_limit(0), 1);
        assert_eq!(client.set_result_limit(250), 100);
        assert_eq!(client.set_result_limit(42), 42);
        assert_eq!(client.set_rerank_limit(0), RERANK_LIMIT_MIN);
        assert_eq!(client.set_rerank_limit(500), RERANK_LIMIT_MAX);
        assert_eq!(client.rerank_limit(), RERANK_LIMIT_MAX);
    }

    #[test]
    fn request_folds_filters_and_drops_empty_fields() {
        let mut client = SearchClient::new(FakeBackend::new(Reply::Status(500)));
        client.set_preacher("Pastor Anderson");
        client.set_title("");
        client.set_search_mode(SearchMode::Vector);

        let request = client.build_request();
        assert_eq!(request.query_text, None);
        assert_eq!(request.preacher_filter.as_deref(), Some("pastor anderson"));
        assert_eq!(request.title_filter, None);
        assert_eq!(request.video_id_filter, None);
        assert_eq!(request.rerank_limit, None);

        client.set_search_mode(SearchMode::VectorRerank);
        assert_eq!(client.build_request().rerank_limit, Some(DEFAULT_RERANK_LIMIT));
    }

    #[tokio::test]
    async fn execute_search_sends_encoded_query_and_stores_rows() {
        let mut client = SearchClient::new(FakeBackend::new(Reply::Columns(TWO_HITS)));
        client.set_query_text("born again");
        client.set_title("John 3:16");
        client.set_search_mode(SearchMode::VectorRerank);
        client.set_rerank_limit(7);

        let status = client.execute_search().await;

        assert_eq!(status, SearchStatus::Completed { hits: 2 });
        assert!(!client.is_busy());
        assert_eq!(
            client.backend().queries(),
            vec!["searchQuery=born+again&searchType=vector-rerank&numResults=20&numRerankResults=7&title=john+3%3A16".to_string()]
        );
        assert_eq!(client.results()[0].title, "John 3:16");
        assert_eq!(client.results()[0].media_audio_url.as_deref(), Some("http://a/b.mp3"));
        assert_eq!(client.results()[1].id, "2");
    }

    #[tokio::test]
    async fn new_search_replaces_previous_results() {
        let mut client = client_with_previous_results().await;
        let status = client.execute_search().await;

        assert_eq!(status, SearchStatus::Completed { hits: 2 });
        assert_eq!(client.results().len(), 2);
        assert_eq!(client.backend().queries().len(), 2);
    }

    #[tokio::test]
    async fn rate_limit_leaves_single_placeholder() {
        let mut client = client_with_previous_results().await;
        client.backend.reply = Reply::RateLimited;

        let status = client.execute_search().await;

        assert_eq!(status, SearchStatus::RateLimited);
        assert!(!client.is_busy());
        assert_eq!(client.results().len(), 1);
        assert_eq!(client.results()[0].title, RATE_LIMIT_TITLE);
        assert_eq!(client.results()[0].content_snippet, RATE_LIMIT_MESSAGE);
    }

    #[tokio::test]
    async fn http_failure_clears_results_and_busy_flag() {
        let mut client = client_with_previous_results().await;
        client.backend.reply = Reply::Status(503);

        let status = client.execute_search().await;

        assert_eq!(status, SearchStatus::Failed);
        assert!(!client.is_busy());
        assert!(client.results().is_empty());
    }

    #[tokio::test]
    async fn undecodable_body_clears_results_and_busy_flag() {
        let mut client = client_with_previous_results().await;
        client.backend.reply = Reply::Garbled;

        let status = client.execute_search().await;

        assert_eq!(status, SearchStatus::Failed);
        assert!(!client.is_busy());
        assert!(client.results().is_empty());
    }

    #[tokio::test]
    async fn refused_connection_clears_results_and_busy_flag() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
        let address = listener.local_addr().expect("listener address");
        drop(listener);

        let http = reqwest::Client::builder().no_proxy().build().expect("http client");
        let backend = crate::HttpSearchBackend::with_client(&format!("http://{address}/"), http)
            .expect("backend");
        let mut client = SearchClient::new(backend);
        client.set_query_text("grace");

        let status = client.execute_search().await;

        assert_eq!(status, SearchStatus::Failed);
        assert!(!client.is_busy());
        assert!(client.results().is_empty());
    }

    #[tokio::test]
    async fn malformed_columns_are_a_failure() {
        let mut client = SearchClient::new(FakeBackend::new(Reply::Columns(
            r#"{"ids":[["a","b"]],"metadatas":[[null]],"documents":[["x","y"]]}"#,
        )));

        assert_eq!(client.execute_search().await, SearchStatus::Failed);
        assert!(client.results().is_empty());
    }

    #[tokio::test]
    async fn second_trigger_while_busy_is_a_no_op() {
        let mut client = SearchClient::new(FakeBackend::new(Reply::Columns(TWO_HITS)));
        let in_flight = client.begin_search();
        assert!(in_flight.is_some());
        assert!(client.is_busy());

        assert_eq!(client.execute_search().await, SearchStatus::Skipped);
        assert!(client.begin_search().is_none());
        assert!(client.is_busy());
        assert!(client.backend().queries().is_empty());

        let status = client.finish_search(Ok(Vec::new()));
        assert_eq!(status, SearchStatus::Completed { hits: 0 });
        assert!(!client.is_busy());
    }

    #[test]
    fn begin_search_clears_results_immediately() {
        let mut client = SearchClient::new(FakeBackend::new(Reply::Status(500)));
        client.finish_search(Err(SearchError::RateLimited));
        assert_eq!(client.results().len(), 1);

        client.begin_search();
        assert!(client.results().is_empty());
        assert!(client.is_busy());
    }
}
