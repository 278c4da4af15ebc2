//! Best-effort image loading
//!
//! An item image is fetched through an [`ImageSource`], decoded off the async
//! threads and handed back as packed RGB8. The whole fetch + decode is raced
//! against a per-image budget; a slow or broken image costs at most that
//! budget and never fails the document.

use crate::cancel::CancelToken;
use crate::types::{LoadedImage, ResourceError};
use async_trait::async_trait;
use image::imageops::FilterType;
use std::time::Duration;

type LoadResult<T> = std::result::Result<T, ResourceError>;

/// Where image bytes come from
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> LoadResult<Vec<u8>>;
}

/// Fetches images over HTTP(S)
#[derive(Debug, Clone, Default)]
pub struct HttpImageSource {
    client: reqwest::Client,
}

impl HttpImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> LoadResult<Vec<u8>> {
        log::debug!("Fetching image: {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ResourceError::Network(format!(
                "HTTP request for {} failed with status: {}",
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Absolute URL for an item's image reference.
///
/// `http://` and `https://` references pass through unchanged, anything else
/// is joined to `api_base` with exactly one `/`. Blank references have no
/// image.
pub fn resolve_url(image_ref: &str, api_base: &str) -> Option<String> {
    let image_ref = image_ref.trim();
    if image_ref.is_empty() {
        return None;
    }
    if image_ref.starts_with("http://") || image_ref.starts_with("https://") {
        return Some(image_ref.to_string());
    }
    Some(format!(
        "{}/{}",
        api_base.trim_end_matches('/'),
        image_ref.trim_start_matches('/')
    ))
}

/// Decode `bytes` to RGB8, flattening alpha onto white and shrinking the
/// longest side to `max_dimension` if needed.
pub fn decode_image(bytes: &[u8], max_dimension: u32) -> LoadResult<LoadedImage> {
    let mut decoded = image::load_from_memory(bytes)?;

    if decoded.width().max(decoded.height()) > max_dimension {
        decoded = decoded.resize(max_dimension, max_dimension, FilterType::Triangle);
    }

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ResourceError::Decode("image has no pixels".to_string()));
    }

    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as u16;
        for channel in [r, g, b] {
            let blended = (channel as u16 * alpha + 255 * (255 - alpha)) / 255;
            pixels.push(blended as u8);
        }
    }

    Ok(LoadedImage {
        pixels,
        width,
        height,
    })
}

/// Image loading with a time budget per call
pub struct ResourceLoader<S> {
    source: S,
    max_dimension: u32,
}

impl<S: ImageSource> ResourceLoader<S> {
    pub fn new(source: S, max_dimension: u32) -> Self {
        Self {
            source,
            max_dimension,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and decode `url`, giving up after `timeout`.
    ///
    /// No retries. Decoding is skipped if `cancel` fired while fetching.
    pub async fn load_image(
        &self,
        url: &str,
        timeout: Duration,
        cancel: &CancelToken,
    ) -> LoadResult<LoadedImage> {
        let max_dimension = self.max_dimension;
        let work = async {
            let bytes = self.source.fetch(url).await?;
            if cancel.is_cancelled() {
                return Err(ResourceError::Cancelled);
            }
            log::debug!("Decoding {} bytes from {}", bytes.len(), url);
            tokio::task::spawn_blocking(move || decode_image(&bytes, max_dimension))
                .await
                .map_err(|e| ResourceError::Decode(e.to_string()))?
        };

        match tokio::time::timeout(timeout, work).await {
            Ok(result) => result,
            Err(_) => Err(ResourceError::Timeout(timeout)),
        }
    }
}
