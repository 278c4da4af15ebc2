use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failure to turn an image reference into embeddable pixels.
///
/// Always recovered per item: the item renders without its image.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("image load timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("image load cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for ResourceError {
    fn from(e: reqwest::Error) -> Self {
        ResourceError::Network(e.to_string())
    }
}

impl From<image::ImageError> for ResourceError {
    fn from(e: image::ImageError) -> Self {
        ResourceError::Decode(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("No items to render")]
    EmptyInput,
    #[error("Catalog generation timed out after {0:?}")]
    OverallTimeout(Duration),
    #[error("Generation was cancelled")]
    Cancelled,
    #[error("An identical generation is already in progress")]
    AlreadyInProgress,
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Coarse classification used to decide how an error reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ResourceTimeout,
    ResourceDecodeFailure,
    ResourceNetworkFailure,
    EmptyInput,
    OverallTimeout,
    Unknown,
}

impl ResourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResourceError::Timeout(_) => ErrorKind::ResourceTimeout,
            ResourceError::Network(_) => ErrorKind::ResourceNetworkFailure,
            ResourceError::Decode(_) => ErrorKind::ResourceDecodeFailure,
            ResourceError::Cancelled => ErrorKind::Unknown,
        }
    }
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::EmptyInput => ErrorKind::EmptyInput,
            CatalogError::OverallTimeout(_) => ErrorKind::OverallTimeout,
            CatalogError::Resource(e) => e.kind(),
            _ => ErrorKind::Unknown,
        }
    }

    /// Message suitable for showing to the person who asked for the document.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::EmptyInput => {
                "This collection has no products yet. Add at least one product and try again."
                    .to_string()
            }
            ErrorKind::OverallTimeout => {
                "Generating the catalog took too long. Please check your connection and try again."
                    .to_string()
            }
            _ if matches!(self, CatalogError::AlreadyInProgress) => {
                "This catalog is already being generated.".to_string()
            }
            _ => "Something went wrong while generating the catalog. Please try again.".to_string(),
        }
    }
}

/// One sellable product as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    /// Whole currency units, no minor units
    pub price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_new_edition: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub occasions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flowers: Vec<String>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            ..Default::default()
        }
    }

    /// Image reference, ignoring blank strings
    pub fn image_ref(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn badges(&self) -> Vec<BadgeKind> {
        let mut badges = Vec::new();
        if self.is_featured {
            badges.push(BadgeKind::Featured);
        }
        if self.is_new_edition {
            badges.push(BadgeKind::NewEdition);
        }
        badges
    }
}

/// Named, ordered group of items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub items: Vec<CatalogItem>,
}

/// Per-call rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub with_watermark: bool,
}

/// Semantic badge variants shown under an item title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Featured,
    NewEdition,
}

impl BadgeKind {
    pub fn label(self) -> &'static str {
        match self {
            BadgeKind::Featured => "FEATURED",
            BadgeKind::NewEdition => "NEW EDITION",
        }
    }
}

/// Decoded image ready to embed: tightly packed RGB8 rows.
///
/// Lives only while one item is drawn.
#[derive(Clone, PartialEq)]
pub struct LoadedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}
