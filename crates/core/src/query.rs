use crate::models::SearchRequest;
use url::form_urlencoded;

/// Encodes a request as the service's query string.
///
/// Keys are appended in a fixed order and only when the field carries a
/// value; `numRerankResults` is written for `vector-rerank` only.
pub fn encode_query(request: &SearchRequest) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if let Some(query) = non_empty(&request.query_text) {
        serializer.append_pair("searchQuery", query);
    }
    serializer.append_pair("searchType", request.search_mode.as_str());
    serializer.append_pair("numResults", &request.result_limit.to_string());
    if request.search_mode.uses_rerank() {
        if let Some(rerank_limit) = request.rerank_limit {
            serializer.append_pair("numRerankResults", &rerank_limit.to_string());
        }
    }

    if let Some(preacher) = non_empty(&request.preacher_filter) {
        serializer.append_pair("preacher", preacher);
    }
    if let Some(title) = non_empty(&request.title_filter) {
        serializer.append_pair("title", title);
    }
    if let Some(video_id) = non_empty(&request.video_id_filter) {
        serializer.append_pair("videoID", video_id);
    }

    serializer.finish()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
