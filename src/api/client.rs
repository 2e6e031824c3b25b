use std::future::Future;
use std::sync::Arc;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::category::CategoryFilter;
use crate::error::RequestError;

use super::models::{CategoriesResponse, HealthResponse, SearchResponse};

pub const SEARCH_PATH: &str = "api/v1/search";
pub const CATEGORIES_PATH: &str = "api/v1/categories";
pub const HEALTH_PATH: &str = "api/v1/health";

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub category: CategoryFilter,
    pub max_results: Option<u32>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            query: query.into(),
            category,
            max_results: None,
        }
    }

    pub fn with_max_results(mut self, max_results: Option<u32>) -> Self {
        self.max_results = max_results;
        self
    }

    /// `category` is always sent, empty when no filter is selected.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("query", self.query.clone()),
            ("category", self.category.param_value().to_string()),
        ];
        if let Some(max) = self.max_results {
            pairs.push(("max_results", max.to_string()));
        }
        pairs
    }
}

/// Anything that can answer a search request. `SearchClient` talks HTTP;
/// tests plug in scripted doubles.
pub trait SearchBackend: Send + Sync {
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchResponse, RequestError>> + Send;
}

impl<B: SearchBackend> SearchBackend for Arc<B> {
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchResponse, RequestError>> + Send {
        (**self).search(request)
    }
}

/// HTTP client for the search API rooted at an explicit base URL.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    base: Url,
}

impl SearchClient {
    pub fn new(api_base: &str) -> Result<Self, RequestError> {
        Self::with_http(Client::new(), api_base)
    }

    pub fn with_http(http: Client, api_base: &str) -> Result<Self, RequestError> {
        let invalid = |reason: String| RequestError::InvalidBase {
            base: api_base.to_string(),
            reason,
        };

        let mut base = Url::parse(api_base.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", base.scheme())));
        }
        base.set_query(None);
        base.set_fragment(None);
        // Relative joins replace the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        self.base.join(path).map_err(|e| RequestError::InvalidBase {
            base: self.base.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn search_url(&self, request: &SearchRequest) -> Result<Url, RequestError> {
        let mut url = self.endpoint(SEARCH_PATH)?;
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        Ok(url)
    }

    /// One GET, no retry and no timeout.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, RequestError> {
        let url = self.search_url(request)?;
        tracing::debug!(%url, "issuing search request");
        self.get_json(url).await
    }

    pub async fn categories(&self) -> Result<Vec<String>, RequestError> {
        let url = self.endpoint(CATEGORIES_PATH)?;
        let response: CategoriesResponse = self.get_json(url).await?;
        Ok(response.categories)
    }

    pub async fn health(&self) -> Result<HealthResponse, RequestError> {
        let url = self.endpoint(HEALTH_PATH)?;
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RequestError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RequestError::Status { status });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| RequestError::Malformed { status, source })
    }
}

impl SearchBackend for SearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, RequestError> {
        SearchClient::search(self, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_all_categories() {
        let client = SearchClient::new("http://localhost:8000").unwrap();
        let request = SearchRequest::new("Fitness için kalori takip uygulaması", CategoryFilter::All);
        let url = client.search_url(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/search?query=Fitness+i%C3%A7in+kalori+takip+uygulamas%C4%B1&category="
        );
    }

    #[test]
    fn test_search_url_with_category_and_limit() {
        let client = SearchClient::new("https://search.example.com/").unwrap();
        let request =
            SearchRequest::new("budget", CategoryFilter::Finance).with_max_results(Some(5));
        let url = client.search_url(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://search.example.com/api/v1/search?query=budget&category=Finance&max_results=5"
        );
    }

    #[test]
    fn test_base_with_path_prefix() {
        let client = SearchClient::new("http://gateway.local/appsense?x=1#top").unwrap();
        assert_eq!(client.base().as_str(), "http://gateway.local/appsense/");
        let url = client
            .search_url(&SearchRequest::new("a&b", CategoryFilter::Games))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://gateway.local/appsense/api/v1/search?query=a%26b&category=Games"
        );
    }

    #[test]
    fn test_invalid_base() {
        for base in ["", "not a url", "localhost:8000", "ftp://files.example.com"] {
            let err = SearchClient::new(base).unwrap_err();
            assert!(
                matches!(err, RequestError::InvalidBase { .. }),
                "{base:?} gave {err:?}"
            );
            assert_eq!(err.status(), None);
        }
    }
}
