use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /api/v1/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    /// Relevance order as sent by the server. Absent or `null` means no results.
    #[serde(default)]
    pub results: Option<Vec<AppResult>>,
    /// Informational only; may differ from the number of results sent.
    pub total_found: u64,
    /// Server-side processing time in seconds.
    pub processing_time: f64,
    pub language_detected: String,
    /// Markdown narrative written by the LLM.
    #[serde(default)]
    pub llm_analysis: Option<String>,
}

impl SearchResponse {
    pub fn results(&self) -> &[AppResult] {
        self.results.as_deref().unwrap_or_default()
    }

    pub fn analysis(&self) -> &str {
        self.llm_analysis.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u64>,
    /// Display string such as "1M+".
    #[serde(default)]
    pub download_count: Option<String>,
    /// Display string such as "Ücretsiz" or "$4.99".
    #[serde(default)]
    pub price: Option<String>,
    pub developer: String,
    /// Relevance to the query in [0, 1].
    pub similarity_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_optional_fields() {
        let body = r#"{
            "query": "gps",
            "total_found": 0,
            "processing_time": 0.12,
            "language_detected": "en"
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.results().is_empty());
        assert_eq!(response.analysis(), "");
    }

    #[test]
    fn test_null_results_and_analysis() {
        let body = r#"{
            "query": "gps",
            "results": null,
            "total_found": 0,
            "processing_time": 0.0,
            "language_detected": "tr",
            "llm_analysis": null
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.results().is_empty());
        assert_eq!(response.analysis(), "");
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let body = r#"{"query": "gps", "results": []}"#;
        assert!(serde_json::from_str::<SearchResponse>(body).is_err());
    }

    #[test]
    fn test_result_optional_fields() {
        let body = r#"{
            "id": "com.example.run",
            "name": "RunTrack",
            "description": "Offline GPS",
            "category": "Fitness",
            "developer": "Example Inc",
            "similarity_score": 0.873,
            "unknown_field": true
        }"#;
        let app: AppResult = serde_json::from_str(body).unwrap();
        assert_eq!(app.rating, None);
        assert_eq!(app.review_count, None);
        assert_eq!(app.download_count, None);
        assert_eq!(app.price, None);
        assert_eq!(app.similarity_score, 0.873);
    }

    #[test]
    fn test_health() {
        let health: HealthResponse =
            serde_json::from_str(r#"{"status":"healthy","service":"AppSense Search API"}"#)
                .unwrap();
        assert!(health.is_healthy());
    }
}
