use crate::traits::SearchBackend;
use crate::{ColumnarResponse, SearchError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://atp-search-tools.online/";
const SEARCH_PATH: &str = "search";

pub struct HttpSearchBackend {
    client: Client,
    search_url: Url,
}

impl HttpSearchBackend {
    pub fn new(endpoint: &str) -> Result<Self, SearchError> {
        Self::with_client(endpoint, Client::new())
    }

    pub fn with_client(endpoint: &str, client: Client) -> Result<Self, SearchError> {
        let mut base = Url::parse(endpoint)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            search_url: base.join(SEARCH_PATH)?,
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    pub fn request_url(&self, query_string: &str) -> Url {
        let mut url = self.search_url.clone();
        if query_string.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(query_string));
        }
        url
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query_string: &str) -> Result<ColumnarResponse, SearchError> {
        let url = self.request_url(query_string);
        info!(url = %url, "dispatching search request");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited);
        }
        if !status.is_success() {
            return Err(SearchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "search response received");
        Ok(serde_json::from_slice(&body)?)
    }
}
