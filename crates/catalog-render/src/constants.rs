//! Shared constants for catalog rendering
//!
//! This module centralizes magic numbers used by the layout engine,
//! the drawing primitives and the page composer. All lengths are in points.

use std::time::Duration;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Time Budgets
// =============================================================================

/// Per-image fetch + decode budget
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Whole-document budget for collection generation
pub const DEFAULT_OVERALL_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Longest image side kept when embedding; larger images are downscaled
pub const DEFAULT_MAX_IMAGE_DIMENSION_PX: u32 = 1600;

// =============================================================================
// Typography
// =============================================================================

pub const BRAND_FONT_SIZE: f32 = 12.0;
pub const PAGE_COUNTER_FONT_SIZE: f32 = 9.0;
pub const TITLE_FONT_SIZE: f32 = 22.0;
pub const PRICE_FONT_SIZE: f32 = 18.0;
pub const BODY_FONT_SIZE: f32 = 10.5;
pub const FOOTER_FONT_SIZE: f32 = 8.5;

pub const COVER_BRAND_FONT_SIZE: f32 = 34.0;
pub const COVER_TITLE_FONT_SIZE: f32 = 26.0;
pub const COVER_SUBTITLE_FONT_SIZE: f32 = 13.0;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.35;

// =============================================================================
// Page Furniture
// =============================================================================

/// Height reserved at the top of every page for brand + counter + divider
pub const HEADER_HEIGHT: f32 = 34.0;

/// Height reserved at the bottom of every page for divider + contact line
pub const FOOTER_HEIGHT: f32 = 30.0;

/// Vertical gap inserted after most blocks
pub const BLOCK_SPACING: f32 = 14.0;

// =============================================================================
// Drawing Primitives
// =============================================================================

/// Strips used to approximate a linear gradient
pub const GRADIENT_STRIPS: usize = 20;

/// Decorative dots spread along a divider
pub const DIVIDER_DOTS: usize = 7;
pub const DIVIDER_DOT_RADIUS: f32 = 1.6;
pub const DIVIDER_LINE_WIDTH: f32 = 0.6;

/// Badge (pill) geometry
pub const BADGE_HEIGHT: f32 = 18.0;
pub const BADGE_PADDING_X: f32 = 10.0;
pub const BADGE_FONT_SIZE: f32 = 8.5;
pub const BADGE_GAP: f32 = 8.0;

/// Shadow layers: offset in points and opacity, outermost first
pub const SHADOW_LAYERS: [(f32, f32); 3] = [(3.0, 0.06), (2.0, 0.10), (1.0, 0.16)];

/// Nested border strokes: inset and stroke width, outermost first
pub const BORDER_LAYERS: [(f32, f32); 3] = [(0.0, 2.0), (3.0, 1.0), (5.0, 0.5)];

pub const FRAME_CORNER_RADIUS: f32 = 6.0;

/// Padding between the frame border and the image
pub const FRAME_PADDING: f32 = 8.0;

/// Largest box an item image may occupy
pub const IMAGE_MAX_HEIGHT: f32 = 300.0;
pub const IMAGE_MAX_WIDTH_RATIO: f32 = 0.72;

/// Watermark geometry
pub const WATERMARK_FONT_SIZE: f32 = 64.0;
pub const WATERMARK_ANGLE_DEG: f32 = 45.0;
pub const WATERMARK_OPACITY: f32 = 0.08;
pub const WATERMARK_BAR_HEIGHT: f32 = 24.0;
pub const WATERMARK_BAR_OPACITY: f32 = 0.55;

// =============================================================================
// Bezier Curve Constants
// =============================================================================

/// Control point factor for approximating circles with Bezier curves:
/// 4 * (sqrt(2) - 1) / 3
pub const BEZIER_CIRCLE_FACTOR: f32 = 0.552284749831;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(210.0) - 595.2756).abs() < 0.01);
        assert_eq!(mm_to_pt(0.0), 0.0);
    }
}
