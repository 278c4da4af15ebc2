use crate::canvas::{Bounds, Canvas, Paint, RgbColor};

/// Paint `bounds` with a top-to-bottom gradient from `from` to `to`,
/// approximated by `strips` horizontal bands of interpolated colour.
pub fn vertical_gradient<C: Canvas + ?Sized>(
    canvas: &mut C,
    bounds: Bounds,
    from: RgbColor,
    to: RgbColor,
    strips: usize,
) {
    let strips = strips.max(1);
    let strip_height = bounds.height / strips as f32;

    for i in 0..strips {
        let t = if strips == 1 {
            0.0
        } else {
            i as f32 / (strips - 1) as f32
        };
        // Overlap neighbours slightly so no hairline gap shows between bands
        let overlap = if i + 1 < strips { 0.5 } else { 0.0 };
        let band = Bounds::new(
            bounds.x,
            bounds.y + i as f32 * strip_height,
            bounds.width,
            strip_height + overlap,
        );
        canvas.fill_rect(band, Paint::solid(from.lerp(to, t)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};

    #[test]
    fn test_gradient_strips_and_endpoints() {
        let mut canvas = RecordingCanvas::new((100.0, 200.0));
        let from = RgbColor::new(0, 0, 0);
        let to = RgbColor::new(190, 95, 19);
        vertical_gradient(
            &mut canvas,
            Bounds::new(0.0, 0.0, 100.0, 200.0),
            from,
            to,
            20,
        );

        let fills: Vec<_> = canvas
            .commands()
            .filter_map(|cmd| match cmd {
                DrawCommand::FillRect { bounds, paint } => Some((*bounds, paint.color)),
                _ => None,
            })
            .collect();

        assert_eq!(fills.len(), 20);
        assert_eq!(fills[0].1, from);
        assert_eq!(fills[19].1, to);
        assert_eq!(fills[0].0.y, 0.0);
        assert!((fills[19].0.bottom() - 200.0).abs() < 1e-3);
        // Channels never move backwards between neighbouring strips
        for pair in fills.windows(2) {
            assert!(pair[1].1.r >= pair[0].1.r);
            assert!(pair[1].0.y > pair[0].0.y);
        }
    }

    #[test]
    fn test_single_strip_is_solid() {
        let mut canvas = RecordingCanvas::new((10.0, 10.0));
        let color = RgbColor::new(5, 6, 7);
        vertical_gradient(
            &mut canvas,
            Bounds::new(0.0, 0.0, 10.0, 10.0),
            color,
            RgbColor::WHITE,
            0,
        );
        assert_eq!(canvas.commands().count(), 1);
    }
}
