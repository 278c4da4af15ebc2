//! Drawing backend abstraction
//!
//! Layout and page composition only talk to a [`Canvas`]. Coordinates are in
//! points with the origin at the top-left corner of the current page and `y`
//! growing downward; backends convert to their native space.
//!
//! - [`PdfCanvas`] writes a PDF through printpdf
//! - [`RecordingCanvas`] records every call for inspection

mod color;
pub mod metrics;
mod pdf;
mod recording;

pub use color::RgbColor;
pub use pdf::PdfCanvas;
pub use recording::{DrawCommand, RecordingCanvas};

use crate::types::{LoadedImage, Result};

/// Axis-aligned box, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink by `by` on every side
    pub fn inset(&self, by: f32) -> Bounds {
        Bounds::new(
            self.x + by,
            self.y + by,
            (self.width - 2.0 * by).max(0.0),
            (self.height - 2.0 * by).max(0.0),
        )
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Bounds {
        Bounds::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Fill colour with opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: RgbColor,
    pub opacity: f32,
}

impl Paint {
    pub fn solid(color: RgbColor) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    pub fn translucent(color: RgbColor, opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: RgbColor,
    pub width: f32,
}

impl Stroke {
    pub fn new(color: RgbColor, width: f32) -> Self {
        Self { color, width }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub paint: Paint,
    /// Counter-clockwise rotation around the text origin
    pub angle_deg: f32,
}

impl TextStyle {
    pub fn regular(size: f32, color: RgbColor) -> Self {
        Self {
            size,
            weight: FontWeight::Regular,
            paint: Paint::solid(color),
            angle_deg: 0.0,
        }
    }

    pub fn bold(size: f32, color: RgbColor) -> Self {
        Self {
            weight: FontWeight::Bold,
            ..Self::regular(size, color)
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.paint.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn rotated(mut self, angle_deg: f32) -> Self {
        self.angle_deg = angle_deg;
        self
    }
}

/// Primitive drawing operations a document backend must provide.
///
/// A fresh canvas starts with exactly one page.
pub trait Canvas {
    /// Page width and height in points
    fn page_size(&self) -> (f32, f32);

    /// Physical pages created so far
    fn page_count(&self) -> usize;

    fn fill_rect(&mut self, bounds: Bounds, paint: Paint);

    fn stroke_rect(&mut self, bounds: Bounds, stroke: Stroke);

    /// Rounded rectangle. Backends without a native primitive inherit this
    /// plain-rectangle fallback.
    fn rounded_rect(
        &mut self,
        bounds: Bounds,
        _radius: f32,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    ) {
        if let Some(paint) = fill {
            self.fill_rect(bounds, paint);
        }
        if let Some(stroke) = stroke {
            self.stroke_rect(bounds, stroke);
        }
    }

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint);

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke);

    /// Draw `text` with its baseline starting at (`x`, `y`)
    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);

    fn measure_text(&self, text: &str, size: f32, weight: FontWeight) -> f32 {
        metrics::text_width(text, size, weight)
    }

    fn add_image(&mut self, image: &LoadedImage, bounds: Bounds) -> Result<()>;

    /// Append a page and make it current
    fn add_page(&mut self);

    /// Open a named group of drawing calls (e.g. `"watermark"`)
    fn begin_group(&mut self, _name: &str) {}

    fn end_group(&mut self) {}

    /// Serialize the finished document
    fn save(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}
