use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{MediaType, RecommendRequest, ResultSet, SearchState},
    services::{
        providers::RecommendationBackend,
        renderer::{self, CardAction, SearchView},
        trailer::build_trailer_url,
    },
};

/// Generic text of the failure notification
pub const FAILURE_MESSAGE: &str =
    "Failed to get recommendations. Is the recommendation backend running?";

/// Identifies one submitted search. Later submits get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A search whose state transition has happened but whose request has not
/// been answered yet
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSearch {
    pub token: RequestToken,
    pub request: RecommendRequest,
}

/// User-visible failure signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub detail: Option<String>,
}

impl Notification {
    pub fn from_error(error: &AppError) -> Self {
        Self {
            message: FAILURE_MESSAGE.to_string(),
            detail: error.detail(),
        }
    }
}

/// How a submit or a response resolved
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Empty search term, nothing happened
    Skipped,
    /// Results replaced
    Completed,
    /// Request failed; results stay empty
    Failed(Notification),
    /// Response belonged to a superseded search and was dropped
    Stale,
}

/// Result of activating one card affordance
#[derive(Debug, Clone, PartialEq)]
pub enum CardActivation {
    Search(PendingSearch),
    OpenTrailer(String),
    Ignored,
}

/// Owns the session state and drives searches against the backend
pub struct SearchController {
    backend: Arc<dyn RecommendationBackend>,
    state: SearchState,
    last_token: u64,
    current: Option<RequestToken>,
}

impl SearchController {
    pub fn new(backend: Arc<dyn RecommendationBackend>) -> Self {
        Self {
            backend,
            state: SearchState::new(),
            last_token: 0,
            current: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn backend(&self) -> Arc<dyn RecommendationBackend> {
        Arc::clone(&self.backend)
    }

    /// Token of the search whose response is still awaited, if any
    pub fn pending_token(&self) -> Option<RequestToken> {
        self.current
    }

    pub fn view(&self) -> SearchView {
        renderer::render(&self.state)
    }

    pub fn set_media_type(&mut self, media_type: MediaType) {
        self.state.media_type = media_type;
    }

    pub fn toggle_smart_search(&mut self) {
        self.state.smart_search_enabled = !self.state.smart_search_enabled;
    }

    pub fn update_query(&mut self, text: impl Into<String>) {
        self.state.query = text.into();
    }

    /// Validates the search term and moves the state into loading.
    ///
    /// Returns `None` without touching state when the effective term is empty.
    /// Whitespace is a valid term and is sent as typed.
    /// An override (drill-down title) replaces the query field.
    pub fn begin_search(&mut self, override_title: Option<&str>) -> Option<PendingSearch> {
        let override_title = override_title.filter(|title| !title.is_empty());
        let term = match override_title {
            Some(title) => title.to_string(),
            None if self.state.query.is_empty() => return None,
            None => self.state.query.clone(),
        };

        if override_title.is_some() {
            self.state.query = term.clone();
        }

        self.last_token += 1;
        let token = RequestToken(self.last_token);
        if let Some(previous) = self.current.replace(token) {
            tracing::debug!(
                previous = previous.value(),
                token = token.value(),
                "Superseding in-flight search"
            );
        }

        self.state.loading = true;
        self.state.results = None;

        let request = RecommendRequest::new(
            self.state.media_type,
            term,
            self.state.smart_search_enabled,
        );

        tracing::info!(
            token = token.value(),
            query = %request.query,
            media_type = %request.media_type,
            use_smart_search = request.use_smart_search,
            "Search submitted"
        );

        Some(PendingSearch { token, request })
    }

    /// Applies the backend's answer for `token`.
    ///
    /// Only the most recent search may change state; answers for superseded
    /// searches are dropped and leave `loading` alone.
    pub fn complete_search(
        &mut self,
        token: RequestToken,
        result: AppResult<ResultSet>,
    ) -> SearchOutcome {
        if self.current != Some(token) {
            tracing::debug!(
                token = token.value(),
                current = ?self.current.map(|t| t.value()),
                "Dropping response for superseded search"
            );
            return SearchOutcome::Stale;
        }

        self.current = None;
        self.state.loading = false;

        match result {
            Ok(results) => {
                tracing::info!(
                    token = token.value(),
                    base_title = %results.base_title,
                    results = results.recommendations.len(),
                    "Search completed"
                );
                self.state.results = Some(results);
                SearchOutcome::Completed
            }
            Err(e) => {
                tracing::error!(token = token.value(), error = %e, "Search failed");
                self.state.results = None;
                SearchOutcome::Failed(Notification::from_error(&e))
            }
        }
    }

    /// Runs a whole search round trip: begin, await the backend, complete
    pub async fn submit_search(&mut self, override_title: Option<&str>) -> SearchOutcome {
        let Some(pending) = self.begin_search(override_title) else {
            return SearchOutcome::Skipped;
        };

        let result = self.backend.recommend(&pending.request).await;
        self.complete_search(pending.token, result)
    }

    /// Activates one affordance of the card at `position` (1-based).
    ///
    /// `Select` starts a drill-down search for the card's title; `WatchTrailer`
    /// only yields the trailer URL and never changes state.
    pub fn activate_card(
        &mut self,
        position: usize,
        action: CardAction,
    ) -> AppResult<CardActivation> {
        let title = self.card_title(position)?;

        match action {
            CardAction::Select => Ok(self
                .begin_search(Some(&title))
                .map(CardActivation::Search)
                .unwrap_or(CardActivation::Ignored)),
            CardAction::WatchTrailer => Ok(CardActivation::OpenTrailer(build_trailer_url(
                &title,
                self.state.media_type,
            ))),
        }
    }

    /// Drill-down search on a card, awaiting the backend
    pub async fn select_card(&mut self, position: usize) -> AppResult<SearchOutcome> {
        match self.activate_card(position, CardAction::Select)? {
            CardActivation::Search(pending) => {
                let result = self.backend.recommend(&pending.request).await;
                Ok(self.complete_search(pending.token, result))
            }
            _ => Ok(SearchOutcome::Skipped),
        }
    }

    fn card_title(&self, position: usize) -> AppResult<String> {
        let results = self
            .state
            .results
            .as_ref()
            .ok_or_else(|| {
                AppError::InvalidInput("There are no results to choose from".to_string())
            })?;

        position
            .checked_sub(1)
            .and_then(|index| results.recommendations.get(index))
            .map(|rec| rec.title.clone())
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "No result #{} (showing {})",
                    position,
                    results.recommendations.len()
                ))
            })
    }
}
