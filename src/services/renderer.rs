use serde::Serialize;

use crate::{
    models::{ItemId, MediaType, Recommendation, ResultSet, SearchState},
    services::trailer::build_trailer_url,
};

/// Maximum number of genre tags shown on a card
pub const MAX_GENRE_TAGS: usize = 3;

const GENRE_DELIMITER: char = '|';

/// Matching strategy shown on the smart-search toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Keyword,
    Semantic,
}

impl SearchMode {
    pub fn from_smart_search(enabled: bool) -> Self {
        if enabled {
            SearchMode::Semantic
        } else {
            SearchMode::Keyword
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Keyword => "Keyword Search (Fast)",
            SearchMode::Semantic => "Semantic Search (AI)",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            SearchMode::Keyword => "Matches exact words & titles (Instant)",
            SearchMode::Semantic => "Understands meaning & context (Slower)",
        }
    }
}

/// The two affordances sharing one card.
///
/// A single activation names exactly one of them, so opening a trailer can
/// never also start a drill-down search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Select,
    WatchTrailer,
}

/// Display model of one recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCard {
    /// 1-based position in backend order
    pub position: usize,
    pub item_id: ItemId,
    pub title: String,
    pub image_url: String,
    pub match_percent: u8,
    pub genre_tags: Vec<String>,
    pub trailer_url: String,
}

impl RecommendationCard {
    pub fn match_label(&self) -> String {
        format!("{}%", self.match_percent)
    }
}

/// Display model of a result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub base_title: String,
    pub engine_used: String,
    pub cards: Vec<RecommendationCard>,
}

impl ResultsView {
    pub fn heading(&self) -> String {
        format!("Results for \"{}\"", self.base_title)
    }

    pub fn card(&self, position: usize) -> Option<&RecommendationCard> {
        self.cards.iter().find(|card| card.position == position)
    }
}

/// Everything the interface shows for one `SearchState`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    pub media_type: MediaType,
    pub query: String,
    pub placeholder: String,
    pub search_mode: SearchMode,
    pub loading: bool,
    pub results: Option<ResultsView>,
}

/// Derives the view for the current state. Called after every state change.
pub fn render(state: &SearchState) -> SearchView {
    SearchView {
        media_type: state.media_type,
        query: state.query.clone(),
        placeholder: format!("Enter {} title (e.g. \"Naruto\")...", state.media_type),
        search_mode: SearchMode::from_smart_search(state.smart_search_enabled),
        loading: !state.is_idle(),
        results: state
            .results
            .as_ref()
            .map(|results| render_results(results, state.media_type)),
    }
}

/// Turns a result set into cards, keeping backend order
pub fn render_results(results: &ResultSet, media_type: MediaType) -> ResultsView {
    ResultsView {
        base_title: results.base_title.clone(),
        engine_used: results.engine_used.clone(),
        cards: results
            .recommendations
            .iter()
            .enumerate()
            .map(|(i, rec)| render_card(i + 1, rec, media_type))
            .collect(),
    }
}

fn render_card(position: usize, rec: &Recommendation, media_type: MediaType) -> RecommendationCard {
    RecommendationCard {
        position,
        item_id: rec.item_id.clone(),
        title: rec.title.clone(),
        image_url: rec.image_url.clone(),
        match_percent: match_percent(rec.similarity_score),
        genre_tags: genre_tags(&rec.genres),
        trailer_url: build_trailer_url(&rec.title, media_type),
    }
}

/// Similarity score as a whole percentage, e.g. `0.873` → `87`
pub fn match_percent(similarity_score: f64) -> u8 {
    if similarity_score.is_nan() {
        return 0;
    }
    (similarity_score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// First three pipe-delimited segments, trimmed, in original order
pub fn genre_tags(genres: &str) -> Vec<String> {
    genres
        .split(GENRE_DELIMITER)
        .map(str::trim)
        .take(MAX_GENRE_TAGS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(id: i64, title: &str, genres: &str, score: f64) -> Recommendation {
        Recommendation {
            item_id: ItemId(id.to_string()),
            title: title.to_string(),
            image_url: format!("https://cdn.example.com/{}.jpg", id),
            genres: genres.to_string(),
            similarity_score: score,
        }
    }

    fn result_set() -> ResultSet {
        ResultSet {
            base_title: "Naruto".to_string(),
            engine_used: "TF-IDF (Local Title Match)".to_string(),
            recommendations: vec![
                recommendation(269, "Bleach", "Action|Adventure|Comedy|Supernatural", 0.41),
                recommendation(1735, "Naruto: Shippuuden", "Action | Adventure", 0.873),
                recommendation(21, "One Piece", "Action", 0.395),
            ],
            media_type: None,
            topn: None,
        }
    }

    #[test]
    fn test_match_percent_rounds() {
        assert_eq!(match_percent(0.873), 87);
        assert_eq!(match_percent(0.875), 88);
        assert_eq!(match_percent(0.0), 0);
        assert_eq!(match_percent(1.0), 100);
        assert_eq!(match_percent(0.004), 0);
        assert_eq!(match_percent(0.996), 100);
    }

    #[test]
    fn test_match_percent_clamps_out_of_range() {
        assert_eq!(match_percent(1.0000001), 100);
        assert_eq!(match_percent(-0.2), 0);
        assert_eq!(match_percent(f64::NAN), 0);
    }

    #[test]
    fn test_genre_tags_trims_and_truncates() {
        assert_eq!(
            genre_tags("Action | Drama |Sci-Fi|Comedy"),
            vec!["Action", "Drama", "Sci-Fi"]
        );
    }

    #[test]
    fn test_genre_tags_fewer_than_limit() {
        assert_eq!(genre_tags("Romance"), vec!["Romance"]);
        assert_eq!(genre_tags(" Horror | Mystery "), vec!["Horror", "Mystery"]);
    }

    #[test]
    fn test_genre_tags_keeps_empty_segments() {
        assert_eq!(genre_tags(""), vec![""]);
        assert_eq!(genre_tags(" | "), vec!["", ""]);
        assert_eq!(genre_tags("A||B|C"), vec!["A", "", "B"]);
    }

    #[test]
    fn test_render_results_preserves_backend_order() {
        let view = render_results(&result_set(), MediaType::Anime);
        let titles: Vec<&str> = view.cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Bleach", "Naruto: Shippuuden", "One Piece"]);
        let positions: Vec<usize> = view.cards.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_render_results_card_fields() {
        let view = render_results(&result_set(), MediaType::Anime);
        assert_eq!(view.heading(), "Results for \"Naruto\"");
        assert_eq!(view.engine_used, "TF-IDF (Local Title Match)");

        let card = view.card(2).unwrap();
        assert_eq!(card.item_id, ItemId("1735".to_string()));
        assert_eq!(card.match_label(), "87%");
        assert_eq!(card.genre_tags, vec!["Action", "Adventure"]);
        assert_eq!(card.image_url, "https://cdn.example.com/1735.jpg");
        assert_eq!(
            card.trailer_url,
            build_trailer_url("Naruto: Shippuuden", MediaType::Anime)
        );

        let first = view.card(1).unwrap();
        assert_eq!(first.genre_tags, vec!["Action", "Adventure", "Comedy"]);
        assert!(view.card(4).is_none());
    }

    #[test]
    fn test_render_does_not_touch_underlying_genres() {
        let results = result_set();
        let _ = render_results(&results, MediaType::Anime);
        assert_eq!(
            results.recommendations[0].genres,
            "Action|Adventure|Comedy|Supernatural"
        );
    }

    #[test]
    fn test_render_idle_state() {
        let state = SearchState::new();
        let view = render(&state);
        assert!(!view.loading);
        assert!(view.results.is_none());
        assert_eq!(view.search_mode, SearchMode::Keyword);
        assert_eq!(view.placeholder, "Enter anime title (e.g. \"Naruto\")...");
    }

    #[test]
    fn test_render_loading_state_has_no_results() {
        let state = SearchState {
            query: "Naruto".to_string(),
            loading: true,
            ..SearchState::default()
        };
        let view = render(&state);
        assert!(view.loading);
        assert!(view.results.is_none());
    }

    #[test]
    fn test_render_uses_current_media_type_for_trailers() {
        let state = SearchState {
            media_type: MediaType::Manga,
            smart_search_enabled: true,
            results: Some(result_set()),
            ..SearchState::default()
        };
        let view = render(&state);
        assert_eq!(view.search_mode, SearchMode::Semantic);
        assert_eq!(view.search_mode.label(), "Semantic Search (AI)");
        let results = view.results.unwrap();
        assert!(results.cards[0].trailer_url.contains("Bleach%20manga%20trailer"));
    }
}
