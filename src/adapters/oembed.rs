use crate::core::video::VideoSource;
use crate::utils::error::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const VIMEO_OEMBED_ENDPOINT: &str = "https://vimeo.com/api/oembed.json";

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    thumbnail_url: Option<String>,
}

/// Finds the poster image shown before the visitor presses play.
#[derive(Debug, Clone)]
pub struct ThumbnailResolver {
    client: Client,
    vimeo_endpoint: String,
}

impl ThumbnailResolver {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_vimeo_endpoint(timeout, VIMEO_OEMBED_ENDPOINT)
    }

    pub fn with_vimeo_endpoint(timeout: Duration, endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            vimeo_endpoint: endpoint.into(),
        })
    }

    /// A failed lookup leaves the player without a thumbnail; it never
    /// blocks the page.
    pub async fn resolve(&self, video: &VideoSource) -> Option<String> {
        if let Some(url) = video.static_thumbnail_url() {
            return Some(url);
        }

        match self.lookup(video).await {
            Ok(thumbnail) => thumbnail,
            Err(e) => {
                tracing::warn!("⚠️ Thumbnail lookup for video {} failed: {}", video.id(), e);
                None
            }
        }
    }

    async fn lookup(&self, video: &VideoSource) -> Result<Option<String>> {
        let response = self
            .client
            .get(&self.vimeo_endpoint)
            .query(&[("url", video.page_url())])
            .send()
            .await?
            .error_for_status()?;

        let body: OEmbedResponse = response.json().await?;
        Ok(body.thumbnail_url)
    }
}
