//! HTTP recommendation backend
//!
//! Talks to the recommender service over plain HTTP GET requests:
//! 1. Recommendations: /recommend?media_type=..&query=..&use_smart_search=..&topn=..
//! 2. Health: /health → {"status": "ok"}
//!
//! Error responses carry a `detail` field (`{"detail": "..."}`); the detail
//! is lifted into the error message when present.
use crate::{
    error::{AppError, AppResult},
    models::{RecommendRequest, ResultSet},
    services::providers::RecommendationBackend,
};
use reqwest::{Client as HttpClient, Response};
use serde::Deserialize;

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    base_url: String,
}

impl HttpBackend {
    /// Creates a backend client for the given base address
    pub fn new(base_url: &str) -> AppResult<Self> {
        reqwest::Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("Invalid backend URL {}: {}", base_url, e)))?;

        Ok(Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turns a non-success response into an `ExternalApi` error
    async fn status_error(response: Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = match extract_detail(&body) {
            Some(detail) => format!("status {}: {}", status.as_u16(), detail),
            None if body.trim().is_empty() => format!("status {}", status.as_u16()),
            None => format!("status {}: {}", status.as_u16(), body.trim()),
        };

        AppError::ExternalApi(message)
    }
}

/// Pulls the `detail` string out of an error body
fn extract_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) => Some(detail),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for HttpBackend {
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<ResultSet> {
        let url = format!("{}/recommend", self.base_url);

        tracing::debug!(
            query = %request.query,
            media_type = %request.media_type,
            use_smart_search = request.use_smart_search,
            topn = request.topn,
            "Requesting recommendations"
        );

        let response = self.http_client.get(&url).query(request).send().await?;

        if !response.status().is_success() {
            let err = Self::status_error(response).await;
            tracing::warn!(error = %err, query = %request.query, "Recommendation request rejected");
            return Err(err);
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw recommendation response");

        let result: ResultSet = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize recommendation response"
            );
            AppError::MalformedResponse(format!("Failed to parse recommendation response: {}", e))
        })?;

        tracing::info!(
            query = %request.query,
            base_title = %result.base_title,
            engine = %result.engine_used,
            results = result.recommendations.len(),
            backend = self.name(),
            "Recommendations fetched"
        );

        Ok(result)
    }

    async fn health(&self) -> AppResult<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        #[derive(Deserialize)]
        struct HealthResponse {
            status: String,
        }

        let health: HealthResponse = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(format!("Invalid health response: {}", e)))?;

        if health.status != "ok" {
            return Err(AppError::ExternalApi(format!(
                "backend reported status '{}'",
                health.status
            )));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
