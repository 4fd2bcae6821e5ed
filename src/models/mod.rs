use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

pub mod search_state;

pub use search_state::SearchState;

/// Number of recommendations requested per search
pub const RESULT_LIMIT: u32 = 5;

/// Kind of media the backend recommends for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Anime,
    Manga,
    Manhwa,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Anime => "anime",
            MediaType::Manga => "manga",
            MediaType::Manhwa => "manhwa",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anime" => Ok(MediaType::Anime),
            "manga" => Ok(MediaType::Manga),
            "manhwa" => Ok(MediaType::Manhwa),
            other => Err(format!(
                "unknown media type '{}' (expected anime, manga or manhwa)",
                other
            )),
        }
    }
}

/// Backend identifier of a recommended title.
///
/// The backend has shipped both integer and string ids; either is accepted and
/// kept as text so it can be compared and displayed uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawItemId")]
pub struct ItemId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemId {
    Text(String),
    Number(i64),
}

impl From<RawItemId> for ItemId {
    fn from(raw: RawItemId) -> Self {
        match raw {
            RawItemId::Text(id) => ItemId(id),
            RawItemId::Number(id) => ItemId(id.to_string()),
        }
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One candidate title returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub item_id: ItemId,
    pub title: String,
    pub image_url: String,
    /// Pipe-delimited genre tags, e.g. `"Action|Drama|Fantasy"`
    pub genres: String,
    /// Similarity to the searched title, in `0.0..=1.0`
    pub similarity_score: f64,
}

/// Response of `GET /recommend`
///
/// Replaced wholesale on every successful search; the client never merges or
/// re-sorts recommendations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultSet {
    pub base_title: String,
    pub engine_used: String,
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub topn: Option<u32>,
}

/// Query parameters of `GET /recommend`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendRequest {
    pub media_type: MediaType,
    pub query: String,
    pub use_smart_search: bool,
    pub topn: u32,
}

impl RecommendRequest {
    pub fn new(media_type: MediaType, query: impl Into<String>, use_smart_search: bool) -> Self {
        Self {
            media_type,
            query: query.into(),
            use_smart_search,
            topn: RESULT_LIMIT,
        }
    }
}
