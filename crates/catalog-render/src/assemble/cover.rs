use super::item::{centered_lines, fitted_lines};
use crate::canvas::{Canvas, FontWeight, TextStyle};
use crate::constants::{
    BLOCK_SPACING, BODY_FONT_SIZE, COVER_BRAND_FONT_SIZE, COVER_SUBTITLE_FONT_SIZE,
    COVER_TITLE_FONT_SIZE,
};
use crate::draw::{diagonal_watermark, divider};
use crate::layout::{PageContext, PageGeometry};
use crate::options::RenderConfig;
use crate::types::RenderOptions;
use chrono::NaiveDate;

const COVER_TITLE_MAX_LINES: usize = 3;

/// What the cover page says about the collection
#[derive(Debug, Clone, PartialEq)]
pub struct CoverContent<'a> {
    pub name: &'a str,
    pub item_count: usize,
    pub date: NaiveDate,
}

impl CoverContent<'_> {
    pub fn count_label(&self) -> String {
        match self.item_count {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        }
    }

    pub fn date_label(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

/// Title block of the cover, placed about a quarter down the page. The
/// gradient background and header are already drawn by the composer.
pub fn draw_cover<C: Canvas + ?Sized>(
    canvas: &mut C,
    ctx: PageContext,
    geo: &PageGeometry,
    cover: &CoverContent<'_>,
    config: &RenderConfig,
    options: RenderOptions,
) -> PageContext {
    let theme = &config.theme;

    if options.with_watermark {
        diagonal_watermark(
            canvas,
            &config.brand_name,
            geo.center(),
            geo.height / 2.0,
            theme,
        );
    }

    let ctx = ctx.advance(geo.height * 0.26 - ctx.cursor);

    let used = centered_lines(
        canvas,
        geo,
        &[config.brand_name.clone()],
        ctx.cursor,
        TextStyle::bold(COVER_BRAND_FONT_SIZE, theme.primary),
    );
    let ctx = ctx.advance(used);

    let used = centered_lines(
        canvas,
        geo,
        &["COLLECTION".to_string()],
        ctx.cursor,
        TextStyle::regular(COVER_SUBTITLE_FONT_SIZE, theme.accent),
    );
    let ctx = ctx.advance(used + BLOCK_SPACING);

    let title = fitted_lines(
        &*canvas,
        cover.name,
        geo.content_width() * 0.85,
        COVER_TITLE_MAX_LINES,
        COVER_TITLE_FONT_SIZE,
        FontWeight::Bold,
    );
    let used = centered_lines(
        canvas,
        geo,
        &title,
        ctx.cursor,
        TextStyle::bold(COVER_TITLE_FONT_SIZE, theme.text),
    );
    let ctx = ctx.advance(used + BLOCK_SPACING / 2.0);

    let inset = geo.content_width() * 0.25;
    divider(
        canvas,
        geo.content_left() + inset,
        geo.content_right() - inset,
        ctx.cursor + BLOCK_SPACING / 2.0,
        theme.borders[0],
        theme.accent,
    );
    let ctx = ctx.advance(BLOCK_SPACING * 2.0);

    let used = centered_lines(
        canvas,
        geo,
        &[cover.count_label()],
        ctx.cursor,
        TextStyle::regular(COVER_SUBTITLE_FONT_SIZE, theme.muted),
    );
    let ctx = ctx.advance(used);

    let used = centered_lines(
        canvas,
        geo,
        &[cover.date_label()],
        ctx.cursor,
        TextStyle::regular(BODY_FONT_SIZE, theme.muted),
    );
    ctx.advance(used)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    fn cover(count: usize) -> CoverContent<'static> {
        CoverContent {
            name: "Rose Garden",
            item_count: count,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(cover(1).count_label(), "1 item");
        assert_eq!(cover(3).count_label(), "3 items");
        assert_eq!(cover(3).date_label(), "March 9, 2024");
    }

    #[test]
    fn test_cover_text_and_watermark() {
        let config = RenderConfig::default();
        let geo = PageGeometry::new(config.page_size_pt(), config.margin_pt());
        let ctx = PageContext::new(1, 4, geo.body_top());

        let mut plain = RecordingCanvas::new(config.page_size_pt());
        let end = draw_cover(
            &mut plain,
            ctx,
            &geo,
            &cover(3),
            &config,
            RenderOptions::default(),
        );
        assert!(end.cursor > geo.height * 0.26);
        assert_eq!(
            plain.texts_on_page(0),
            vec![
                config.brand_name.as_str(),
                "COLLECTION",
                "Rose Garden",
                "3 items",
                "March 9, 2024"
            ]
        );
        assert!(!plain.has_group("watermark"));

        let mut marked = RecordingCanvas::new(config.page_size_pt());
        draw_cover(
            &mut marked,
            ctx,
            &geo,
            &cover(3),
            &config,
            RenderOptions {
                with_watermark: true,
            },
        );
        assert!(marked.has_group("watermark"));
    }
}
