use crate::canvas::{Bounds, Canvas, FontWeight, Paint, TextStyle};
use crate::constants::{BADGE_FONT_SIZE, BADGE_GAP, BADGE_HEIGHT, BADGE_PADDING_X};
use crate::layout::center_row;
use crate::options::Theme;
use crate::types::BadgeKind;

/// Width of a badge: label width plus horizontal padding on both sides
pub fn badge_width<C: Canvas + ?Sized>(canvas: &C, kind: BadgeKind) -> f32 {
    canvas.measure_text(kind.label(), BADGE_FONT_SIZE, FontWeight::Bold) + 2.0 * BADGE_PADDING_X
}

/// Draw one pill badge with its top-left corner at (`x`, `y`); returns its width.
pub fn draw_badge<C: Canvas + ?Sized>(
    canvas: &mut C,
    kind: BadgeKind,
    x: f32,
    y: f32,
    theme: &Theme,
) -> f32 {
    let width = badge_width(&*canvas, kind);
    let fill = match kind {
        BadgeKind::Featured => theme.featured,
        BadgeKind::NewEdition => theme.new_edition,
    };

    canvas.rounded_rect(
        Bounds::new(x, y, width, BADGE_HEIGHT),
        BADGE_HEIGHT / 2.0,
        Some(Paint::solid(fill)),
        None,
    );
    canvas.text(
        kind.label(),
        x + BADGE_PADDING_X,
        y + BADGE_HEIGHT / 2.0 + BADGE_FONT_SIZE * 0.35,
        TextStyle::bold(BADGE_FONT_SIZE, theme.badge_text),
    );

    width
}

/// Draw `badges` as one group centered on the span starting at `left` with
/// `span_width`. Returns the total group width (badges plus gaps).
pub fn draw_badge_row<C: Canvas + ?Sized>(
    canvas: &mut C,
    badges: &[BadgeKind],
    left: f32,
    span_width: f32,
    y: f32,
    theme: &Theme,
) -> f32 {
    let widths: Vec<f32> = badges.iter().map(|b| badge_width(&*canvas, *b)).collect();
    let (starts, total) = center_row(&widths, BADGE_GAP, span_width);

    for (kind, start) in badges.iter().zip(starts) {
        draw_badge(canvas, *kind, left + start, y, theme);
    }

    total
}
