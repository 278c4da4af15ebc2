use crate::canvas::{Bounds, Canvas, FontWeight, Paint, TextStyle};
use crate::constants::{
    BODY_FONT_SIZE, WATERMARK_ANGLE_DEG, WATERMARK_BAR_HEIGHT, WATERMARK_BAR_OPACITY,
    WATERMARK_FONT_SIZE, WATERMARK_OPACITY,
};
use crate::options::Theme;

/// Name of the drawing group every watermark is wrapped in
pub const WATERMARK_GROUP: &str = "watermark";

/// Large faint brand name running diagonally through (`cx`, `cy`).
pub fn diagonal_watermark<C: Canvas + ?Sized>(
    canvas: &mut C,
    brand: &str,
    cx: f32,
    cy: f32,
    theme: &Theme,
) {
    let width = canvas.measure_text(brand, WATERMARK_FONT_SIZE, FontWeight::Bold);
    let angle = WATERMARK_ANGLE_DEG.to_radians();
    // Start so the midpoint of the rotated baseline lands on the center;
    // y grows downward, so a counter-clockwise run rises toward smaller y
    let x = cx - (width / 2.0) * angle.cos();
    let y = cy + (width / 2.0) * angle.sin();

    canvas.begin_group(WATERMARK_GROUP);
    canvas.text(
        brand,
        x,
        y,
        TextStyle::bold(WATERMARK_FONT_SIZE, theme.primary)
            .with_opacity(WATERMARK_OPACITY)
            .rotated(WATERMARK_ANGLE_DEG),
    );
    canvas.end_group();
}

/// Semi-opaque caption bar across the bottom of an image with the brand on
/// the left and the price on the right.
pub fn image_watermark_bar<C: Canvas + ?Sized>(
    canvas: &mut C,
    image: Bounds,
    brand: &str,
    price: &str,
    theme: &Theme,
) {
    let height = WATERMARK_BAR_HEIGHT.min(image.height);
    let bar = Bounds::new(image.x, image.bottom() - height, image.width, height);
    let baseline = bar.y + height / 2.0 + BODY_FONT_SIZE * 0.35;
    let padding = 8.0;

    canvas.begin_group(WATERMARK_GROUP);
    canvas.fill_rect(
        bar,
        Paint::translucent(theme.primary, WATERMARK_BAR_OPACITY),
    );
    canvas.text(
        brand,
        bar.x + padding,
        baseline,
        TextStyle::bold(BODY_FONT_SIZE, theme.badge_text),
    );
    let price_width = canvas.measure_text(price, BODY_FONT_SIZE, FontWeight::Bold);
    canvas.text(
        price,
        bar.right() - padding - price_width,
        baseline,
        TextStyle::bold(BODY_FONT_SIZE, theme.badge_text),
    );
    canvas.end_group();
}
