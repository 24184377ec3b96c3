use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// `watch?v=`, `&v=`, `youtu.be/`, `/embed/`, `/v/` and `/e/` forms. The id is
/// exactly 11 characters and must be followed by a delimiter or end of input.
static YOUTUBE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/#\s]{11})(?:[&?/#"\s]|$)"#,
    )
    .expect("youtube pattern is valid")
});

static VIMEO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"vimeo\.com/(?:video/)?(\d+)(?:[/?#&]|$)").expect("vimeo pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedUrl {
    pub provider: VideoProvider,
    pub video_id: String,
    pub url: String,
}

/// Turns a pasted video link into an embeddable player URL.
///
/// Returns `None` for empty input and for anything that is not a recognised
/// YouTube or Vimeo link; callers should fall back to a plain link.
pub fn resolve_embed_url(url: &str) -> Option<EmbedUrl> {
    if url.is_empty() {
        return None;
    }

    if let Some(id) = YOUTUBE_PATTERN.captures(url).and_then(|c| c.get(1)) {
        let video_id = id.as_str().to_string();
        return Some(EmbedUrl {
            provider: VideoProvider::Youtube,
            url: format!("https://www.youtube.com/embed/{}", video_id),
            video_id,
        });
    }

    if let Some(id) = VIMEO_PATTERN.captures(url).and_then(|c| c.get(1)) {
        let video_id = id.as_str().to_string();
        return Some(EmbedUrl {
            provider: VideoProvider::Vimeo,
            url: format!("https://player.vimeo.com/video/{}", video_id),
            video_id,
        });
    }

    None
}
