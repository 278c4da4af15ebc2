use crate::canvas::{Canvas, Paint, RgbColor, Stroke};
use crate::constants::{DIVIDER_DOT_RADIUS, DIVIDER_DOTS, DIVIDER_LINE_WIDTH};

/// Horizontal rule from `x1` to `x2` at `y` with evenly spaced dots on it.
///
/// The dots divide the rule into `DIVIDER_DOTS + 1` equal segments.
pub fn divider<C: Canvas + ?Sized>(
    canvas: &mut C,
    x1: f32,
    x2: f32,
    y: f32,
    line: RgbColor,
    dots: RgbColor,
) {
    canvas.line((x1, y), (x2, y), Stroke::new(line, DIVIDER_LINE_WIDTH));

    let step = (x2 - x1) / (DIVIDER_DOTS + 1) as f32;
    for i in 1..=DIVIDER_DOTS {
        canvas.circle(
            x1 + step * i as f32,
            y,
            DIVIDER_DOT_RADIUS,
            Paint::solid(dots),
        );
    }
}
