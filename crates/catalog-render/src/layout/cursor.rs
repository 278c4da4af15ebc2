use crate::constants::{FOOTER_HEIGHT, HEADER_HEIGHT};

/// Position within the document while one page is being filled.
///
/// Drawing operations take a context and hand back the advanced one, so a
/// block can never be placed against a stale cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageContext {
    /// 1-based physical page number
    pub page_number: usize,
    pub total_pages: usize,
    /// Distance from the top edge where the next block starts
    pub cursor: f32,
}

impl PageContext {
    pub fn new(page_number: usize, total_pages: usize, cursor: f32) -> Self {
        Self {
            page_number,
            total_pages,
            cursor,
        }
    }

    /// Move the cursor down by `consumed`. Negative amounts are ignored so
    /// the cursor only ever moves down.
    #[must_use]
    pub fn advance(self, consumed: f32) -> Self {
        Self {
            cursor: self.cursor + consumed.max(0.0),
            ..self
        }
    }

    /// Space left above `limit`
    pub fn remaining(&self, limit: f32) -> f32 {
        (limit - self.cursor).max(0.0)
    }

    /// `"page/total"` label for the header
    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.page_number, self.total_pages)
    }
}

/// Fixed regions of a page derived from its size and margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub fn new((width, height): (f32, f32), margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn content_left(&self) -> f32 {
        self.margin
    }

    pub fn content_right(&self) -> f32 {
        self.width - self.margin
    }

    pub fn content_width(&self) -> f32 {
        (self.width - 2.0 * self.margin).max(0.0)
    }

    /// Top of the header band
    pub fn header_top(&self) -> f32 {
        self.margin
    }

    /// First y available to body blocks, below the header
    pub fn body_top(&self) -> f32 {
        self.margin + HEADER_HEIGHT
    }

    /// Last y available to body blocks, above the footer
    pub fn body_bottom(&self) -> f32 {
        self.height - self.margin - FOOTER_HEIGHT
    }

    /// Top of the footer band
    pub fn footer_top(&self) -> f32 {
        self.body_bottom()
    }

    /// Horizontal center of the page
    pub fn center(&self) -> f32 {
        self.width / 2.0
    }
}
