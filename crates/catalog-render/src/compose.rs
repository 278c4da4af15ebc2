//! Page sequencing
//!
//! The composer owns the page counter and the page furniture. Every page gets
//! a header (brand, `page/total` counter, divider). A page's footer (divider,
//! contact line) is drawn when the composer moves past it, and the last one
//! in [`PageComposer::finish`].

use crate::canvas::{Bounds, Canvas, FontWeight, TextStyle};
use crate::constants::{
    BRAND_FONT_SIZE, FOOTER_FONT_SIZE, FOOTER_HEIGHT, GRADIENT_STRIPS, HEADER_HEIGHT,
    PAGE_COUNTER_FONT_SIZE,
};
use crate::draw::{divider, vertical_gradient};
use crate::layout::{PageContext, PageGeometry};
use crate::options::{RenderConfig, Theme};

/// Where the composer is in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    /// Nothing drawn yet; the canvas holds its initial empty page
    Blank,
    Cover,
    /// 1-based item index
    ItemPage(usize),
    Finalizing,
}

/// How the next page is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Draw on the page the canvas was created with
    ReuseCurrent,
    AppendPage,
}

/// Page break decision when leaving `from`.
///
/// Only the untouched first page is reused; any page that already carries
/// content is closed and a new one appended.
pub fn transition(from: ComposerState) -> Transition {
    match from {
        ComposerState::Blank => Transition::ReuseCurrent,
        ComposerState::Cover | ComposerState::ItemPage(_) | ComposerState::Finalizing => {
            Transition::AppendPage
        }
    }
}

/// Drives page breaks and header/footer drawing for one document.
///
/// `finish` consumes the composer, so no page can be entered after the
/// document has been finalized.
pub struct PageComposer<'a> {
    geometry: PageGeometry,
    total_pages: usize,
    page_number: usize,
    state: ComposerState,
    brand: &'a str,
    contact: &'a str,
    theme: &'a Theme,
}

impl<'a> PageComposer<'a> {
    pub fn new<C: Canvas + ?Sized>(canvas: &C, config: &'a RenderConfig, total_pages: usize) -> Self {
        Self {
            geometry: PageGeometry::new(canvas.page_size(), config.margin_pt()),
            total_pages,
            page_number: 0,
            state: ComposerState::Blank,
            brand: &config.brand_name,
            contact: &config.contact_line,
            theme: &config.theme,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    /// Close the current page (if any), move to the page for `next` and
    /// draw its furniture. Returns a context whose cursor sits just below the
    /// header.
    pub fn enter<C: Canvas + ?Sized>(&mut self, canvas: &mut C, next: ComposerState) -> PageContext {
        if self.has_open_page() {
            self.draw_footer(canvas);
        }

        match transition(self.state) {
            Transition::ReuseCurrent => self.page_number = self.page_number.max(1),
            Transition::AppendPage => {
                canvas.add_page();
                self.page_number += 1;
            }
        }
        self.state = next;
        log::debug!(
            "Entering page {}/{} as {:?}",
            self.page_number,
            self.total_pages,
            next
        );

        if next == ComposerState::Cover {
            vertical_gradient(
                canvas,
                Bounds::new(0.0, 0.0, self.geometry.width, self.geometry.height),
                self.theme.cover_top,
                self.theme.cover_bottom,
                GRADIENT_STRIPS,
            );
        }

        let ctx = PageContext::new(self.page_number, self.total_pages, self.geometry.body_top());
        self.draw_header(canvas, &ctx);
        ctx
    }

    /// Draw the last page's footer. Returns the number of pages composed.
    pub fn finish<C: Canvas + ?Sized>(mut self, canvas: &mut C) -> usize {
        if self.has_open_page() {
            self.draw_footer(canvas);
        }
        self.state = ComposerState::Finalizing;
        if canvas.page_count() != self.page_number {
            log::warn!(
                "Canvas has {} pages but {} were composed",
                canvas.page_count(),
                self.page_number
            );
        }
        self.page_number
    }

    fn has_open_page(&self) -> bool {
        matches!(self.state, ComposerState::Cover | ComposerState::ItemPage(_))
    }

    fn draw_header<C: Canvas + ?Sized>(&self, canvas: &mut C, ctx: &PageContext) {
        let geo = &self.geometry;
        let baseline = geo.header_top() + BRAND_FONT_SIZE;

        canvas.text(
            self.brand,
            geo.content_left(),
            baseline,
            TextStyle::bold(BRAND_FONT_SIZE, self.theme.primary),
        );

        let counter = ctx.counter_label();
        let width = canvas.measure_text(&counter, PAGE_COUNTER_FONT_SIZE, FontWeight::Regular);
        canvas.text(
            &counter,
            geo.content_right() - width,
            baseline,
            TextStyle::regular(PAGE_COUNTER_FONT_SIZE, self.theme.muted),
        );

        divider(
            canvas,
            geo.content_left(),
            geo.content_right(),
            geo.header_top() + HEADER_HEIGHT - 10.0,
            self.theme.borders[2],
            self.theme.accent,
        );
    }

    fn draw_footer<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let geo = &self.geometry;
        let top = geo.footer_top();

        divider(
            canvas,
            geo.content_left(),
            geo.content_right(),
            top + 8.0,
            self.theme.borders[2],
            self.theme.accent,
        );

        let width = canvas.measure_text(self.contact, FOOTER_FONT_SIZE, FontWeight::Regular);
        canvas.text(
            self.contact,
            geo.center() - width / 2.0,
            top + FOOTER_HEIGHT - 6.0,
            TextStyle::regular(FOOTER_FONT_SIZE, self.theme.muted),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    #[test]
    fn test_transition_table() {
        assert_eq!(transition(ComposerState::Blank), Transition::ReuseCurrent);
        assert_eq!(transition(ComposerState::Cover), Transition::AppendPage);
        assert_eq!(transition(ComposerState::ItemPage(3)), Transition::AppendPage);
    }

    #[test]
    fn test_cover_then_items() {
        let config = RenderConfig::default();
        let mut canvas = RecordingCanvas::new(config.page_size_pt());
        let mut composer = PageComposer::new(&canvas, &config, 3);

        let cover = composer.enter(&mut canvas, ComposerState::Cover);
        assert_eq!(cover.page_number, 1);
        assert_eq!(canvas.page_count(), 1);

        let first = composer.enter(&mut canvas, ComposerState::ItemPage(1));
        let second = composer.enter(&mut canvas, ComposerState::ItemPage(2));
        assert_eq!(first.page_number, 2);
        assert_eq!(second.page_number, 3);
        assert_eq!(second.cursor, composer.geometry().body_top());

        assert_eq!(composer.finish(&mut canvas), 3);
        assert_eq!(canvas.page_count(), 3);

        for (index, label) in ["1/3", "2/3", "3/3"].iter().enumerate() {
            let texts = canvas.texts_on_page(index);
            assert_eq!(texts[0], config.brand_name);
            assert!(texts.contains(label));
            // One footer per page
            let footers = texts.iter().filter(|t| **t == config.contact_line).count();
            assert_eq!(footers, 1, "page {}", index + 1);
        }
    }

    #[test]
    fn test_single_page_reuses_initial_page() {
        let config = RenderConfig::default();
        let mut canvas = RecordingCanvas::new(config.page_size_pt());
        let mut composer = PageComposer::new(&canvas, &config, 1);

        let ctx = composer.enter(&mut canvas, ComposerState::ItemPage(1));
        assert_eq!(ctx.counter_label(), "1/1");
        assert_eq!(composer.finish(&mut canvas), 1);
        assert_eq!(canvas.page_count(), 1);
        assert!(canvas.texts_on_page(0).contains(&config.contact_line.as_str()));
    }

    #[test]
    fn test_only_cover_has_gradient() {
        let config = RenderConfig::default();
        let mut canvas = RecordingCanvas::new(config.page_size_pt());
        let mut composer = PageComposer::new(&canvas, &config, 2);
        composer.enter(&mut canvas, ComposerState::Cover);
        composer.enter(&mut canvas, ComposerState::ItemPage(1));
        composer.finish(&mut canvas);

        let fills = |page: usize| {
            canvas.pages()[page]
                .iter()
                .filter(|cmd| matches!(cmd, crate::canvas::DrawCommand::FillRect { .. }))
                .count()
        };
        assert_eq!(fills(0), GRADIENT_STRIPS);
        assert_eq!(fills(1), 0);
    }
}
