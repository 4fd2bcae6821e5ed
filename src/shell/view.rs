use std::fmt::Write;

use crate::services::{
    controller::Notification,
    renderer::{RecommendationCard, ResultsView, SearchView},
};

/// One-line summary of the search settings
pub fn format_status(view: &SearchView) -> String {
    let query = if view.query.is_empty() {
        view.placeholder.as_str()
    } else {
        view.query.as_str()
    };

    format!(
        "[{}] {} - {}\n  {}\n",
        view.media_type,
        view.search_mode.label(),
        view.search_mode.hint(),
        query
    )
}

/// Full text rendering of a view
pub fn format_view(view: &SearchView) -> String {
    let mut out = format_status(view);

    if view.loading {
        out.push_str("  Searching...\n");
    }

    if let Some(results) = &view.results {
        out.push_str(&format_results(results));
    }

    out
}

pub fn format_results(results: &ResultsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}  (via {})", results.heading(), results.engine_used);

    if results.cards.is_empty() {
        out.push_str("  No recommendations.\n");
    }

    for card in &results.cards {
        out.push_str(&format_card(card));
    }

    out
}

fn format_card(card: &RecommendationCard) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {}. {}  {} match",
        card.position,
        card.title,
        card.match_label()
    );
    let tags: Vec<&str> = card
        .genre_tags
        .iter()
        .map(String::as_str)
        .filter(|tag| !tag.is_empty())
        .collect();
    if !tags.is_empty() {
        let _ = writeln!(out, "     {}", tags.join(" · "));
    }
    let _ = writeln!(out, "     image: {}", card.image_url);
    out
}

pub fn format_notification(notification: &Notification) -> String {
    match &notification.detail {
        Some(detail) => format!("!! {}\n   ({})\n", notification.message, detail),
        None => format!("!! {}\n", notification.message),
    }
}
