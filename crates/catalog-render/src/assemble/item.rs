use crate::cancel::CancelToken;
use crate::canvas::{Bounds, Canvas, FontWeight, TextStyle};
use crate::constants::{
    BADGE_HEIGHT, BLOCK_SPACING, BODY_FONT_SIZE, FRAME_PADDING, IMAGE_MAX_HEIGHT,
    IMAGE_MAX_WIDTH_RATIO, PRICE_FONT_SIZE, TITLE_FONT_SIZE,
};
use crate::draw::{divider, draw_badge_row, image_placeholder, image_watermark_bar, shadow_frame};
use crate::layout::{
    PageContext, PageGeometry, center_x, clamp_lines, fit_within_box, line_height, max_lines,
    wrap_text,
};
use crate::options::RenderConfig;
use crate::types::{CatalogItem, LoadedImage, RenderOptions, Result};

const TITLE_MAX_LINES: usize = 2;
const METADATA_LABEL_WIDTH: f32 = 72.0;
const PLACEHOLDER_HEIGHT: f32 = 120.0;

/// Draw `lines` centered on the content area, the first line's top at
/// `top`. Returns the height used.
pub(super) fn centered_lines<C: Canvas + ?Sized>(
    canvas: &mut C,
    geo: &PageGeometry,
    lines: &[String],
    top: f32,
    style: TextStyle,
) -> f32 {
    let lh = line_height(style.size);
    for (i, line) in lines.iter().enumerate() {
        let width = canvas.measure_text(line, style.size, style.weight);
        let x = geo.content_left() + center_x(width, geo.content_width());
        canvas.text(line, x, top + i as f32 * lh + style.size, style);
    }
    lines.len() as f32 * lh
}

/// Wrap `text` to `max_width` and keep at most `limit` lines
pub(super) fn fitted_lines<C: Canvas + ?Sized>(
    canvas: &C,
    text: &str,
    max_width: f32,
    limit: usize,
    size: f32,
    weight: FontWeight,
) -> Vec<String> {
    let measure = |s: &str| canvas.measure_text(s, size, weight);
    clamp_lines(wrap_text(text, max_width, measure), limit, max_width, measure)
}

/// Label/value rows shown under the description, in display order
pub fn metadata_rows(item: &CatalogItem) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();
    let mut push = |label: &'static str, value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            rows.push((label, value));
        }
    };
    push("Type", item.kind.clone());
    push("Size", item.size.clone());
    push("Status", item.status.clone());
    push("Occasions", Some(item.occasions.join(", ")));
    push("Flowers", Some(item.flowers.join(", ")));
    rows
}

/// Lays out one item on the current page, block by block, top to bottom.
pub(super) struct ItemPainter<'a> {
    pub geo: PageGeometry,
    pub config: &'a RenderConfig,
    pub options: RenderOptions,
}

impl ItemPainter<'_> {
    pub fn paint<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        ctx: PageContext,
        item: &CatalogItem,
        image: Option<&LoadedImage>,
        cancel: &CancelToken,
    ) -> Result<PageContext> {
        let price = self.config.format_price(item.price);
        let rows = metadata_rows(item);

        cancel.check()?;
        let ctx = self.image_block(canvas, ctx, image, &price)?;
        cancel.check()?;
        let ctx = self.title_block(canvas, ctx, &item.name);
        cancel.check()?;
        let ctx = self.badge_block(canvas, ctx, item);
        cancel.check()?;
        let ctx = self.price_block(canvas, ctx, &price);
        cancel.check()?;
        let ctx = self.divider_block(canvas, ctx);
        cancel.check()?;
        let reserve = rows.len() as f32 * line_height(BODY_FONT_SIZE);
        let ctx = self.description_block(canvas, ctx, item.description.as_deref(), reserve);
        cancel.check()?;
        let ctx = self.metadata_block(canvas, ctx, &rows);

        log::debug!(
            "Item '{}' laid out on page {}, cursor at {:.1}",
            item.id,
            ctx.page_number,
            ctx.cursor
        );
        Ok(ctx)
    }

    fn image_block<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        ctx: PageContext,
        image: Option<&LoadedImage>,
        price: &str,
    ) -> Result<PageContext> {
        let theme = &self.config.theme;
        let max_w = self.geo.content_width() * IMAGE_MAX_WIDTH_RATIO;
        let max_h = IMAGE_MAX_HEIGHT.min(ctx.remaining(self.geo.body_bottom()) * 0.5);

        let Some(image) = image else {
            if !self.config.show_image_placeholder {
                return Ok(ctx);
            }
            let height = PLACEHOLDER_HEIGHT.min(max_h);
            let x = self.geo.content_left() + center_x(max_w, self.geo.content_width());
            image_placeholder(canvas, Bounds::new(x, ctx.cursor, max_w, height), theme);
            return Ok(ctx.advance(height + BLOCK_SPACING));
        };

        let (w, h) = fit_within_box(
            image.width as f32,
            image.height as f32,
            max_w - 2.0 * FRAME_PADDING,
            max_h - 2.0 * FRAME_PADDING,
        );
        if w <= 0.0 || h <= 0.0 {
            log::debug!("No room for image on page {}", ctx.page_number);
            return Ok(ctx);
        }

        let frame_w = w + 2.0 * FRAME_PADDING;
        let frame_h = h + 2.0 * FRAME_PADDING;
        let frame = Bounds::new(
            self.geo.content_left() + center_x(frame_w, self.geo.content_width()),
            ctx.cursor,
            frame_w,
            frame_h,
        );

        shadow_frame(canvas, frame, theme);
        let picture = frame.inset(FRAME_PADDING);
        canvas.add_image(image, picture)?;
        if self.options.with_watermark {
            image_watermark_bar(canvas, picture, &self.config.brand_name, price, theme);
        }

        Ok(ctx.advance(frame_h + BLOCK_SPACING))
    }

    fn title_block<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        ctx: PageContext,
        name: &str,
    ) -> PageContext {
        let lines = fitted_lines(
            &*canvas,
            name,
            self.geo.content_width(),
            TITLE_MAX_LINES,
            TITLE_FONT_SIZE,
            FontWeight::Bold,
        );
        let used = centered_lines(
            canvas,
            &self.geo,
            &lines,
            ctx.cursor,
            TextStyle::bold(TITLE_FONT_SIZE, self.config.theme.text),
        );
        ctx.advance(used + BLOCK_SPACING / 2.0)
    }

    fn badge_block<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        ctx: PageContext,
        item: &CatalogItem,
    ) -> PageContext {
        let badges = item.badges();
        if badges.is_empty() {
            return ctx;
        }
        draw_badge_row(
            canvas,
            &badges,
            self.geo.content_left(),
            self.geo.content_width(),
            ctx.cursor,
            &self.config.theme,
        );
        ctx.advance(BADGE_HEIGHT + BLOCK_SPACING / 2.0)
    }

    fn price_block<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        ctx: PageContext,
        price: &str,
    ) -> PageContext {
        let used = centered_lines(
            canvas,
            &self.geo,
            &[price.to_string()],
            ctx.cursor,
            TextStyle::bold(PRICE_FONT_SIZE, self.config.theme.primary),
        );
        ctx.advance(used)
    }

    fn divider_block<C: Canvas + ?Sized>(&self, canvas: &mut C, ctx: PageContext) -> PageContext {
        let theme = &self.config.theme;
        divider(
            canvas,
            self.geo.content_left(),
            self.geo.content_right(),
            ctx.cursor + BLOCK_SPACING / 2.0,
            theme.borders[2],
            theme.accent,
        );
        ctx.advance(BLOCK_SPACING * 1.5)
    }

    fn description_block<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        ctx: PageContext,
        description: Option<&str>,
        reserve: f32,
    ) -> PageContext {
        let Some(description) = description.filter(|d| !d.trim().is_empty()) else {
            return ctx;
        };

        let lh = line_height(BODY_FONT_SIZE);
        let available = ctx.remaining(self.geo.body_bottom()) - reserve - BLOCK_SPACING;
        let limit = max_lines(available, lh);
        let lines = fitted_lines(
            &*canvas,
            description,
            self.geo.content_width(),
            limit,
            BODY_FONT_SIZE,
            FontWeight::Regular,
        );
        if lines.is_empty() {
            log::debug!("No room for description on page {}", ctx.page_number);
            return ctx;
        }

        let style = TextStyle::regular(BODY_FONT_SIZE, self.config.theme.text);
        for (i, line) in lines.iter().enumerate() {
            canvas.text(
                line,
                self.geo.content_left(),
                ctx.cursor + i as f32 * lh + BODY_FONT_SIZE,
                style,
            );
        }
        ctx.advance(lines.len() as f32 * lh + BLOCK_SPACING / 2.0)
    }

    fn metadata_block<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        ctx: PageContext,
        rows: &[(&'static str, String)],
    ) -> PageContext {
        let theme = &self.config.theme;
        let lh = line_height(BODY_FONT_SIZE);
        let fit = max_lines(ctx.remaining(self.geo.body_bottom()), lh).min(rows.len());
        if fit < rows.len() {
            log::debug!(
                "Dropping {} metadata rows on page {}",
                rows.len() - fit,
                ctx.page_number
            );
        }

        let value_x = self.geo.content_left() + METADATA_LABEL_WIDTH;
        let value_width = (self.geo.content_width() - METADATA_LABEL_WIDTH).max(0.0);
        let mut ctx = ctx;
        for (label, value) in &rows[..fit] {
            let baseline = ctx.cursor + BODY_FONT_SIZE;
            canvas.text(
                label,
                self.geo.content_left(),
                baseline,
                TextStyle::bold(BODY_FONT_SIZE, theme.muted),
            );
            let value = fitted_lines(
                &*canvas,
                value,
                value_width,
                1,
                BODY_FONT_SIZE,
                FontWeight::Regular,
            );
            if let Some(value) = value.first() {
                canvas.text(
                    value,
                    value_x,
                    baseline,
                    TextStyle::regular(BODY_FONT_SIZE, theme.text),
                );
            }
            ctx = ctx.advance(lh);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawCommand, RecordingCanvas};

    fn painter(config: &RenderConfig, with_watermark: bool) -> ItemPainter<'_> {
        ItemPainter {
            geo: PageGeometry::new(config.page_size_pt(), config.margin_pt()),
            config,
            options: RenderOptions { with_watermark },
        }
    }

    fn full_item() -> CatalogItem {
        let mut item = CatalogItem::new("r1", "Blush Bouquet", 1450);
        item.is_featured = true;
        item.description = Some("Soft pink roses with eucalyptus.".into());
        item.kind = Some("Bouquet".into());
        item.occasions = vec!["Birthday".into(), "Anniversary".into()];
        item
    }

    fn image() -> LoadedImage {
        LoadedImage {
            pixels: vec![0; 40 * 20 * 3],
            width: 40,
            height: 20,
        }
    }

    #[test]
    fn test_metadata_rows_skip_empty() {
        let rows = metadata_rows(&full_item());
        assert_eq!(
            rows,
            vec![
                ("Type", "Bouquet".to_string()),
                ("Occasions", "Birthday, Anniversary".to_string()),
            ]
        );
    }

    #[test]
    fn test_blocks_flow_downward() {
        let config = RenderConfig::default();
        let painter = painter(&config, false);
        let mut canvas = RecordingCanvas::new(config.page_size_pt());
        let start = PageContext::new(1, 1, painter.geo.body_top());

        let image = image();
        let end = painter
            .paint(&mut canvas, start, &full_item(), Some(&image), &CancelToken::new())
            .unwrap();
        assert!(end.cursor > start.cursor);
        assert!(end.cursor <= painter.geo.body_bottom());

        let texts = canvas.texts_on_page(0);
        let pos = |needle: &str| texts.iter().position(|t| *t == needle).unwrap();
        assert!(pos("Blush Bouquet") < pos("FEATURED"));
        assert!(pos("FEATURED") < pos("$1,450"));
        assert!(pos("$1,450") < pos("Type"));
        assert_eq!(canvas.images_on_page(0), 1);
        assert!(!canvas.has_group("watermark"));
    }

    #[test]
    fn test_image_keeps_aspect_and_bar_when_watermarked() {
        let config = RenderConfig::default();
        let painter = painter(&config, true);
        let mut canvas = RecordingCanvas::new(config.page_size_pt());
        let start = PageContext::new(1, 1, painter.geo.body_top());

        let image = image();
        painter
            .paint(&mut canvas, start, &full_item(), Some(&image), &CancelToken::new())
            .unwrap();

        let placed = canvas
            .commands()
            .find_map(|cmd| match cmd {
                DrawCommand::Image { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .unwrap();
        assert!((placed.width / placed.height - 2.0).abs() < 1e-3);
        assert!(canvas.has_group("watermark"));
        assert!(canvas.texts_on_page(0).contains(&"$1,450"));
    }

    #[test]
    fn test_missing_image_without_placeholder_draws_no_frame() {
        let config = RenderConfig::default();
        let painter = painter(&config, false);
        let mut canvas = RecordingCanvas::new(config.page_size_pt());
        let start = PageContext::new(1, 1, painter.geo.body_top());

        let end = painter.image_block(&mut canvas, start, None, "$1").unwrap();
        assert_eq!(end, start);
        assert_eq!(canvas.commands().count(), 0);
    }

    #[test]
    fn test_missing_image_with_placeholder() {
        let config = RenderConfig {
            show_image_placeholder: true,
            ..Default::default()
        };
        let painter = painter(&config, false);
        let mut canvas = RecordingCanvas::new(config.page_size_pt());
        let start = PageContext::new(1, 1, painter.geo.body_top());

        let end = painter.image_block(&mut canvas, start, None, "$1").unwrap();
        assert!(end.cursor > start.cursor);
        assert_eq!(canvas.texts_on_page(0), vec!["Image unavailable"]);
    }

    #[test]
    fn test_long_description_stays_on_page() {
        let config = RenderConfig::default();
        let painter = painter(&config, false);
        let mut canvas = RecordingCanvas::new(config.page_size_pt());
        let start = PageContext::new(1, 1, painter.geo.body_top());

        let mut item = full_item();
        item.description = Some("petals and stems ".repeat(2_000));
        let image = image();
        let end = painter
            .paint(&mut canvas, start, &item, Some(&image), &CancelToken::new())
            .unwrap();

        assert!(end.cursor <= painter.geo.body_bottom());
        assert_eq!(canvas.page_count(), 1);
        let texts = canvas.texts_on_page(0);
        assert!(texts.iter().any(|t| t.ends_with("...")));
        // Metadata still fits below the clamped description
        assert!(texts.contains(&"Occasions"));
    }

    #[test]
    fn test_cancelled_painter_stops() {
        let config = RenderConfig::default();
        let painter = painter(&config, false);
        let mut canvas = RecordingCanvas::new(config.page_size_pt());
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = painter.paint(
            &mut canvas,
            PageContext::new(1, 1, 100.0),
            &full_item(),
            None,
            &cancel,
        );
        assert!(matches!(result, Err(crate::types::CatalogError::Cancelled)));
        assert_eq!(canvas.commands().count(), 0);
    }
}
