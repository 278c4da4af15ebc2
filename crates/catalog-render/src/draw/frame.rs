use crate::canvas::{Bounds, Canvas, FontWeight, Paint, Stroke, TextStyle};
use crate::constants::{BODY_FONT_SIZE, BORDER_LAYERS, FRAME_CORNER_RADIUS, SHADOW_LAYERS};
use crate::options::Theme;

/// Fake drop shadow plus layered border around `bounds`.
///
/// Shadow rectangles are offset down-right, outermost and faintest first;
/// the panel is then painted in the paper colour and three borders are
/// stroked inward with decreasing weight.
pub fn shadow_frame<C: Canvas + ?Sized>(canvas: &mut C, bounds: Bounds, theme: &Theme) {
    for (offset, opacity) in SHADOW_LAYERS {
        canvas.rounded_rect(
            bounds.offset(offset, offset),
            FRAME_CORNER_RADIUS + offset,
            Some(Paint::translucent(theme.shadow, opacity)),
            None,
        );
    }

    canvas.rounded_rect(
        bounds,
        FRAME_CORNER_RADIUS,
        Some(Paint::solid(theme.paper)),
        None,
    );

    for ((inset, width), color) in BORDER_LAYERS.into_iter().zip(theme.borders) {
        canvas.rounded_rect(
            bounds.inset(inset),
            (FRAME_CORNER_RADIUS - inset).max(1.0),
            None,
            Some(Stroke::new(color, width)),
        );
    }
}

/// Box drawn where an item image would have been
pub fn image_placeholder<C: Canvas + ?Sized>(canvas: &mut C, bounds: Bounds, theme: &Theme) {
    canvas.rounded_rect(
        bounds,
        FRAME_CORNER_RADIUS,
        Some(Paint::translucent(theme.muted, 0.08)),
        Some(Stroke::new(theme.muted, 0.5)),
    );

    let label = "Image unavailable";
    let width = canvas.measure_text(label, BODY_FONT_SIZE, FontWeight::Regular);
    canvas.text(
        label,
        bounds.x + (bounds.width - width) / 2.0,
        bounds.y + bounds.height / 2.0 + BODY_FONT_SIZE * 0.35,
        TextStyle::regular(BODY_FONT_SIZE, theme.muted),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};

    #[test]
    fn test_frame_layers() {
        let mut canvas = RecordingCanvas::new((300.0, 300.0));
        let theme = Theme::default();
        let bounds = Bounds::new(50.0, 50.0, 200.0, 150.0);
        shadow_frame(&mut canvas, bounds, &theme);

        let rects: Vec<_> = canvas
            .commands()
            .filter_map(|cmd| match cmd {
                DrawCommand::RoundedRect {
                    bounds,
                    fill,
                    stroke,
                    ..
                } => Some((*bounds, *fill, *stroke)),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 3 + 1 + 3);

        // Shadows: offset 3, 2, 1 with rising opacity
        let mut last_opacity = 0.0;
        for (i, expected_offset) in [3.0, 2.0, 1.0].into_iter().enumerate() {
            let (b, fill, stroke) = rects[i];
            assert_eq!(b.x, 50.0 + expected_offset);
            assert_eq!(b.y, 50.0 + expected_offset);
            assert!(stroke.is_none());
            let opacity = fill.map(|p| p.opacity).unwrap_or(0.0);
            assert!(opacity > last_opacity && opacity < 1.0);
            last_opacity = opacity;
        }

        // Borders shrink inward and get thinner
        let widths: Vec<f32> = rects[4..]
            .iter()
            .map(|(_, _, stroke)| stroke.map(|s| s.width).unwrap_or(0.0))
            .collect();
        assert!(widths[0] > widths[1] && widths[1] > widths[2]);
        assert!(rects[5].0.width < rects[4].0.width);
    }

    #[test]
    fn test_placeholder_has_label() {
        let mut canvas = RecordingCanvas::new((300.0, 300.0));
        image_placeholder(
            &mut canvas,
            Bounds::new(0.0, 0.0, 200.0, 100.0),
            &Theme::default(),
        );
        assert_eq!(canvas.texts_on_page(0), vec!["Image unavailable"]);
    }
}
