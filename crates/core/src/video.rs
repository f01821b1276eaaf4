//! YouTube URL handling for the watch section.

use std::sync::LazyLock;

use regex::Regex;

/// Matches watch, embed, `/v/`, `/e/`, nested-path and `youtu.be` URLs and
/// captures the 11-character video id.
static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("valid regex")
});

/// Derive the embed identifier from a YouTube URL.
///
/// Returns `None` for URLs that do not carry a recognisable video id.
///
/// ```
/// use marquee_core::video::extract_youtube_id;
///
/// assert_eq!(
///     extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
///     Some("dQw4w9WgXcQ"),
/// );
/// assert_eq!(extract_youtube_id("https://vimeo.com/12345"), None);
/// ```
pub fn extract_youtube_id(url: &str) -> Option<String> {
    YOUTUBE_ID_RE
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Default thumbnail for a video without an uploaded one.
pub fn thumbnail_url(embed_id: &str) -> String {
    format!("https://img.youtube.com/vi/{embed_id}/maxresdefault.jpg")
}

/// Player URL for an embed id.
pub fn embed_url(embed_id: &str) -> String {
    format!("https://www.youtube.com/embed/{embed_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_url() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn watch_url_with_leading_params() {
        assert_eq!(
            extract_youtube_id("https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn short_url() {
        assert_eq!(
            extract_youtube_id("https://youtu.be/dQw4w9WgXcQ?si=abc").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn embed_and_v_urls() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/v/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn unrelated_urls() {
        assert_eq!(extract_youtube_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(extract_youtube_id(""), None);
    }

    #[test]
    fn derived_urls() {
        assert_eq!(
            thumbnail_url("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
        assert_eq!(embed_url("dQw4w9WgXcQ"), "https://www.youtube.com/embed/dQw4w9WgXcQ");
    }
}
