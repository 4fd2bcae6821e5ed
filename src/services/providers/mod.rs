//! Recommendation backend abstraction
//!
//! The backend is an opaque service: the client sends a title plus search
//! options and receives a ranked result set. The controller talks to it only
//! through [`RecommendationBackend`], so tests can swap in a mock.
use crate::{
    error::AppResult,
    models::{RecommendRequest, ResultSet},
};

pub mod http;

pub use http::HttpBackend;

/// Trait for recommendation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationBackend: Send + Sync {
    /// Fetch recommendations similar to `request.query`
    ///
    /// Any failure (transport, non-success status, unparseable body) is an
    /// error; partial result sets are never returned.
    async fn recommend(&self, request: &RecommendRequest) -> AppResult<ResultSet>;

    /// Probe whether the backend is up
    async fn health(&self) -> AppResult<()>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
