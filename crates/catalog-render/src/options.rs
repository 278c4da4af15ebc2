use crate::canvas::RgbColor;
use crate::constants::{
    DEFAULT_IMAGE_TIMEOUT, DEFAULT_MAX_IMAGE_DIMENSION_PX, DEFAULT_OVERALL_TIMEOUT, mm_to_pt,
};
use crate::types::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Standard paper sizes (portrait)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    pub fn dimensions_pt(self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }
}

/// Palette used by every page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub paper: RgbColor,
    pub primary: RgbColor,
    pub accent: RgbColor,
    pub text: RgbColor,
    pub muted: RgbColor,
    pub cover_top: RgbColor,
    pub cover_bottom: RgbColor,
    pub featured: RgbColor,
    pub new_edition: RgbColor,
    pub badge_text: RgbColor,
    pub shadow: RgbColor,
    pub borders: [RgbColor; 3],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            paper: RgbColor::new(255, 255, 255),
            primary: RgbColor::new(176, 58, 92),
            accent: RgbColor::new(214, 160, 92),
            text: RgbColor::new(40, 34, 38),
            muted: RgbColor::new(120, 110, 116),
            cover_top: RgbColor::new(252, 231, 238),
            cover_bottom: RgbColor::new(255, 250, 244),
            featured: RgbColor::new(214, 160, 92),
            new_edition: RgbColor::new(92, 150, 120),
            badge_text: RgbColor::new(255, 255, 255),
            shadow: RgbColor::new(60, 40, 50),
            borders: [
                RgbColor::new(176, 58, 92),
                RgbColor::new(214, 160, 92),
                RgbColor::new(236, 214, 222),
            ],
        }
    }
}

/// Renderer configuration shared by every generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    pub brand_name: String,
    pub contact_line: String,
    /// Prefix for image references that are not absolute URLs
    pub api_base_url: String,
    pub paper_size: PaperSize,
    pub margin_mm: f32,
    pub image_timeout_ms: u64,
    pub overall_timeout_ms: u64,
    pub output_dir: PathBuf,
    pub currency_prefix: String,
    /// Draw an "image unavailable" box when an item image fails to load
    pub show_image_placeholder: bool,
    pub max_image_dimension_px: u32,
    pub theme: Theme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            brand_name: "Petal & Stem".to_string(),
            contact_line: "hello@petalandstem.example  |  +1 555 0134".to_string(),
            api_base_url: "http://localhost:5000".to_string(),
            paper_size: PaperSize::A4,
            margin_mm: 15.0,
            image_timeout_ms: DEFAULT_IMAGE_TIMEOUT.as_millis() as u64,
            overall_timeout_ms: DEFAULT_OVERALL_TIMEOUT.as_millis() as u64,
            output_dir: PathBuf::from("."),
            currency_prefix: "$".to_string(),
            show_image_placeholder: false,
            max_image_dimension_px: DEFAULT_MAX_IMAGE_DIMENSION_PX,
            theme: Theme::default(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CatalogError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.paper_size.dimensions_mm();
        if !(w > 0.0 && h > 0.0) {
            return Err(CatalogError::Config(
                "Paper dimensions must be positive".to_string(),
            ));
        }
        if self.margin_mm < 0.0 || self.margin_mm * 2.0 >= w.min(h) {
            return Err(CatalogError::Config(format!(
                "Margin of {}mm does not fit on a {}x{}mm page",
                self.margin_mm, w, h
            )));
        }
        if self.image_timeout_ms == 0 || self.overall_timeout_ms == 0 {
            return Err(CatalogError::Config(
                "Timeouts must be greater than zero".to_string(),
            ));
        }
        if self.max_image_dimension_px == 0 {
            return Err(CatalogError::Config(
                "Maximum image dimension must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_millis(self.overall_timeout_ms)
    }

    pub fn page_size_pt(&self) -> (f32, f32) {
        self.paper_size.dimensions_pt()
    }

    pub fn margin_pt(&self) -> f32 {
        mm_to_pt(self.margin_mm)
    }

    /// Price as shown on item pages, e.g. `$1,250`
    pub fn format_price(&self, price: i64) -> String {
        let digits = price.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if price < 0 { "-" } else { "" };
        format!("{}{}{}", sign, self.currency_prefix, grouped)
    }
}
