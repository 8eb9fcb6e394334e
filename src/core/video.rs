use serde::{Deserialize, Serialize};

/// Hosted player the sales letter is streamed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum VideoSource {
    Youtube { id: String },
    Vimeo { id: String },
}

impl VideoSource {
    pub fn id(&self) -> &str {
        match self {
            VideoSource::Youtube { id } | VideoSource::Vimeo { id } => id,
        }
    }

    /// Autoplaying embed shown once the visitor presses play.
    pub fn embed_url(&self) -> String {
        match self {
            VideoSource::Youtube { id } => format!(
                "https://www.youtube.com/embed/{}?autoplay=1&modestbranding=1&rel=0&controls=0&showinfo=0&iv_load_policy=3&fs=0",
                id
            ),
            VideoSource::Vimeo { id } => format!(
                "https://player.vimeo.com/video/{}?autoplay=1&title=0&byline=0&portrait=0",
                id
            ),
        }
    }

    /// Thumbnail URL that can be derived without a network lookup.
    pub fn static_thumbnail_url(&self) -> Option<String> {
        match self {
            VideoSource::Youtube { id } => {
                Some(format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", id))
            }
            VideoSource::Vimeo { .. } => None,
        }
    }

    /// Public page URL, used as the key for oEmbed lookups.
    pub fn page_url(&self) -> String {
        match self {
            VideoSource::Youtube { id } => format!("https://www.youtube.com/watch?v={}", id),
            VideoSource::Vimeo { id } => format!("https://vimeo.com/{}", id),
        }
    }
}
