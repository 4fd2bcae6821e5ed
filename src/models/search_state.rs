use serde::Serialize;

use super::{MediaType, ResultSet};

/// Session state of the search client
///
/// Created once per session and mutated in place by the search controller.
/// While a request is in flight `loading` is set and `results` is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub media_type: MediaType,
    pub smart_search_enabled: bool,
    pub loading: bool,
    pub results: Option<ResultSet>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing is pending
    pub fn is_idle(&self) -> bool {
        !self.loading
    }
}
