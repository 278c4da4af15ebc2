/// Scale `natural_w` × `natural_h` to the largest size that fits inside
/// `max_w` × `max_h` without distortion.
///
/// Width is constrained first; if the resulting height is still over the
/// bound it is shrunk again against the height. The result therefore touches
/// at least one bound and never exceeds either. Degenerate input gives
/// `(0.0, 0.0)`.
pub fn fit_within_box(natural_w: f32, natural_h: f32, max_w: f32, max_h: f32) -> (f32, f32) {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !(valid(natural_w) && valid(natural_h) && valid(max_w) && valid(max_h)) {
        return (0.0, 0.0);
    }

    let aspect = natural_w / natural_h;
    let mut width = max_w;
    let mut height = width / aspect;

    if height > max_h {
        height = max_h;
        width = height * aspect;
    }

    (width.min(max_w), height.min(max_h))
}

/// Left edge that centers `content_width` on a span of `page_width`
pub fn center_x(content_width: f32, page_width: f32) -> f32 {
    (page_width - content_width) / 2.0
}

/// Left edge of each element when `widths` are laid out as one centered row
/// separated by `gap`. Returns the starting x of every element and the
/// total row width.
pub fn center_row(widths: &[f32], gap: f32, page_width: f32) -> (Vec<f32>, f32) {
    let total = row_width(widths, gap);
    let mut x = center_x(total, page_width);
    let mut starts = Vec::with_capacity(widths.len());
    for w in widths {
        starts.push(x);
        x += w + gap;
    }
    (starts, total)
}

/// Sum of `widths` plus one `gap` between each neighbour
pub fn row_width(widths: &[f32], gap: f32) -> f32 {
    let gaps = widths.len().saturating_sub(1) as f32 * gap;
    widths.iter().sum::<f32>() + gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn check_fit(nw: f32, nh: f32, mw: f32, mh: f32) {
        let (w, h) = fit_within_box(nw, nh, mw, mh);
        assert!(w <= mw + EPS, "{}x{} in {}x{}: width {} over", nw, nh, mw, mh, w);
        assert!(h <= mh + EPS, "{}x{} in {}x{}: height {} over", nw, nh, mw, mh, h);
        assert!(
            (w - mw).abs() < EPS || (h - mh).abs() < EPS,
            "{}x{} in {}x{}: touches no bound ({}, {})",
            nw,
            nh,
            mw,
            mh,
            w,
            h
        );
        let natural = nw / nh;
        assert!(
            ((w / h) - natural).abs() / natural < 1e-3,
            "aspect drifted: {} vs {}",
            w / h,
            natural
        );
    }

    #[test]
    fn test_fit_landscape_into_square() {
        let (w, h) = fit_within_box(800.0, 400.0, 200.0, 200.0);
        assert!((w - 200.0).abs() < EPS);
        assert!((h - 100.0).abs() < EPS);
    }

    #[test]
    fn test_fit_portrait_is_height_bound() {
        let (w, h) = fit_within_box(300.0, 900.0, 200.0, 300.0);
        assert!((h - 300.0).abs() < EPS);
        assert!((w - 100.0).abs() < EPS);
    }

    #[test]
    fn test_fit_upscales_small_images() {
        let (w, h) = fit_within_box(40.0, 20.0, 400.0, 400.0);
        assert!((w - 400.0).abs() < EPS);
        assert!((h - 200.0).abs() < EPS);
    }

    #[test]
    fn test_fit_property_grid() {
        let naturals = [1.0, 3.0, 17.0, 64.0, 480.0, 1023.0, 4000.0];
        let bounds = [0.5, 12.0, 99.0, 250.0, 612.0, 2048.0];
        for &nw in &naturals {
            for &nh in &naturals {
                for &mw in &bounds {
                    for &mh in &bounds {
                        check_fit(nw, nh, mw, mh);
                    }
                }
            }
        }
    }

    #[test]
    fn test_fit_degenerate() {
        assert_eq!(fit_within_box(0.0, 10.0, 100.0, 100.0), (0.0, 0.0));
        assert_eq!(fit_within_box(10.0, 10.0, -1.0, 100.0), (0.0, 0.0));
        assert_eq!(fit_within_box(f32::NAN, 10.0, 100.0, 100.0), (0.0, 0.0));
    }

    #[test]
    fn test_center_x() {
        assert_eq!(center_x(100.0, 500.0), 200.0);
        assert_eq!(center_x(500.0, 500.0), 0.0);
    }

    #[test]
    fn test_center_row() {
        let (starts, total) = center_row(&[60.0, 80.0], 8.0, 300.0);
        assert_eq!(total, 148.0);
        assert_eq!(starts, vec![76.0, 144.0]);
        assert_eq!(row_width(&[], 8.0), 0.0);
        assert_eq!(row_width(&[10.0], 8.0), 10.0);
    }
}
