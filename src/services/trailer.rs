use crate::models::MediaType;

const VIDEO_SEARCH_URL: &str = "https://www.youtube.com/results";

/// Builds a video-platform search URL for a title's trailer.
///
/// Pure and deterministic: the query is `"<title> <media type> trailer"`,
/// percent-encoded into the `search_query` parameter.
pub fn build_trailer_url(title: &str, media_type: MediaType) -> String {
    let search = format!("{} {} trailer", title, media_type);
    format!(
        "{}?search_query={}",
        VIDEO_SEARCH_URL,
        urlencoding::encode(&search)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_trailer_url() {
        let url = build_trailer_url("Bleach", MediaType::Anime);
        assert_eq!(
            url,
            "https://www.youtube.com/results?search_query=Bleach%20anime%20trailer"
        );
    }

    #[test]
    fn test_build_trailer_url_encodes_special_characters() {
        let url = build_trailer_url("Re:Zero & Friends?", MediaType::Manhwa);
        assert_eq!(
            url,
            "https://www.youtube.com/results?search_query=Re%3AZero%20%26%20Friends%3F%20manhwa%20trailer"
        );
    }

    #[test]
    fn test_build_trailer_url_keeps_title_verbatim() {
        let url = build_trailer_url(" Naruto", MediaType::Anime);
        assert_eq!(
            url,
            "https://www.youtube.com/results?search_query=%20Naruto%20anime%20trailer"
        );
    }

    #[test]
    fn test_build_trailer_url_is_deterministic() {
        assert_eq!(
            build_trailer_url("Berserk", MediaType::Manga),
            build_trailer_url("Berserk", MediaType::Manga)
        );
    }
}
