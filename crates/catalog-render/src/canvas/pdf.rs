use super::{Bounds, Canvas, FontWeight, Paint, RgbColor, Stroke, TextStyle};
use crate::constants::BEZIER_CIRCLE_FACTOR;
use crate::types::{CatalogError, LoadedImage, Result};
use printpdf::color::Color;
use printpdf::graphics::{
    ExtendedGraphicsState, LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder,
};
use printpdf::*;
use std::collections::HashMap;

/// Page content recorded before the document exists. Images and graphics
/// states need document-level ids, which are only assigned in `save`.
enum PageOp {
    Draw(Op),
    Image {
        index: usize,
        transform: XObjectTransform,
    },
    /// Constant fill and stroke alpha, in thousandths
    Alpha(u16),
}

/// printpdf-backed canvas using the built-in Helvetica faces.
///
/// Holds plain page data only; the `PdfDocument` is built by `save`, which
/// the assembler runs on the blocking pool. Translucent paints use an
/// ExtGState with constant alpha, unless the canvas was created with
/// [`flatten_translucency`](Self::flatten_translucency).
pub struct PdfCanvas {
    title: String,
    pages: Vec<Vec<PageOp>>,
    images: Vec<RawImage>,
    width_pt: f32,
    height_pt: f32,
    paper: RgbColor,
    flatten: bool,
}

impl PdfCanvas {
    pub fn new(title: &str, (width_pt, height_pt): (f32, f32), paper: RgbColor) -> Self {
        Self {
            title: title.to_string(),
            pages: vec![Vec::new()],
            images: Vec::new(),
            width_pt,
            height_pt,
            paper,
            flatten: false,
        }
    }

    /// Blend translucent paints against the paper colour and emit them
    /// opaque, for consumers that reject transparency (PDF/A-1).
    pub fn flatten_translucency(mut self) -> Self {
        self.flatten = true;
        self
    }

    fn page(&mut self) -> &mut Vec<PageOp> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn push(&mut self, op: Op) {
        self.page().push(PageOp::Draw(op));
    }

    /// Run `draw` with `opacity` applied through a graphics state
    fn with_opacity(&mut self, opacity: f32, draw: impl FnOnce(&mut Self)) {
        if self.flatten || opacity >= 1.0 {
            draw(self);
            return;
        }
        self.push(Op::SaveGraphicsState);
        self.page().push(PageOp::Alpha(alpha_key(opacity)));
        draw(self);
        self.push(Op::RestoreGraphicsState);
    }

    fn pdf_color(&self, paint: Paint) -> Color {
        let color = if self.flatten {
            paint.color.over(self.paper, paint.opacity)
        } else {
            paint.color
        };
        let (r, g, b) = color.to_unit();
        Color::Rgb(Rgb::new(r, g, b, None))
    }

    fn point(&self, x: f32, y: f32) -> LinePoint {
        LinePoint {
            p: Point {
                x: Pt(x),
                y: Pt(self.height_pt - y),
            },
            bezier: false,
        }
    }

    fn control(&self, x: f32, y: f32) -> LinePoint {
        LinePoint {
            bezier: true,
            ..self.point(x, y)
        }
    }

    fn rect_ring(&self, b: Bounds) -> PolygonRing {
        PolygonRing {
            points: vec![
                self.point(b.x, b.bottom()),
                self.point(b.right(), b.bottom()),
                self.point(b.right(), b.y),
                self.point(b.x, b.y),
            ],
        }
    }

    fn rounded_ring(&self, b: Bounds, radius: f32) -> PolygonRing {
        let r = radius.min(b.width / 2.0).min(b.height / 2.0).max(0.0);
        let k = r * BEZIER_CIRCLE_FACTOR;
        let (l, t, rt, bt) = (b.x, b.y, b.right(), b.bottom());
        PolygonRing {
            points: vec![
                self.point(l + r, bt),
                self.point(rt - r, bt),
                self.control(rt - r + k, bt),
                self.control(rt, bt - r + k),
                self.point(rt, bt - r),
                self.point(rt, t + r),
                self.control(rt, t + r - k),
                self.control(rt - r + k, t),
                self.point(rt - r, t),
                self.point(l + r, t),
                self.control(l + r - k, t),
                self.control(l, t + r - k),
                self.point(l, t + r),
                self.point(l, bt - r),
                self.control(l, bt - r + k),
                self.control(l + r - k, bt),
                self.point(l + r, bt),
            ],
        }
    }

    fn draw_ring(&mut self, ring: PolygonRing, mode: PaintMode) {
        self.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![ring],
                mode,
                winding_order: WindingOrder::NonZero,
            },
        });
    }

    fn fill_ring(&mut self, ring: PolygonRing, paint: Paint) {
        self.with_opacity(paint.opacity, |canvas| {
            let col = canvas.pdf_color(paint);
            canvas.push(Op::SetFillColor { col });
            canvas.draw_ring(ring, PaintMode::Fill);
        });
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        let col = self.pdf_color(Paint::solid(stroke.color));
        self.push(Op::SetOutlineColor { col });
        self.push(Op::SetOutlineThickness {
            pt: Pt(stroke.width),
        });
    }
}

fn alpha_key(opacity: f32) -> u16 {
    (opacity.clamp(0.0, 1.0) * 1000.0).round() as u16
}

impl Canvas for PdfCanvas {
    fn page_size(&self) -> (f32, f32) {
        (self.width_pt, self.height_pt)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn fill_rect(&mut self, bounds: Bounds, paint: Paint) {
        let ring = self.rect_ring(bounds);
        self.fill_ring(ring, paint);
    }

    fn stroke_rect(&mut self, bounds: Bounds, stroke: Stroke) {
        self.set_stroke(stroke);
        let ring = self.rect_ring(bounds);
        self.draw_ring(ring, PaintMode::Stroke);
    }

    fn rounded_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    ) {
        match (fill, stroke) {
            // One fill-and-stroke path, unless the alpha would reach the border
            (Some(paint), Some(stroke)) if paint.opacity >= 1.0 || self.flatten => {
                let col = self.pdf_color(paint);
                self.push(Op::SetFillColor { col });
                self.set_stroke(stroke);
                let ring = self.rounded_ring(bounds, radius);
                self.draw_ring(ring, PaintMode::FillStroke);
            }
            (fill, stroke) => {
                if let Some(paint) = fill {
                    let ring = self.rounded_ring(bounds, radius);
                    self.fill_ring(ring, paint);
                }
                if let Some(stroke) = stroke {
                    self.set_stroke(stroke);
                    let ring = self.rounded_ring(bounds, radius);
                    self.draw_ring(ring, PaintMode::Stroke);
                }
            }
        }
    }

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        let ring = self.rounded_ring(
            Bounds::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0),
            radius,
        );
        self.fill_ring(ring, paint);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        self.set_stroke(stroke);
        let ring = PolygonRing {
            points: vec![self.point(from.0, from.1), self.point(to.0, to.1)],
        };
        self.draw_ring(ring, PaintMode::Stroke);
    }

    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let font = match style.weight {
            FontWeight::Regular => BuiltinFont::Helvetica,
            FontWeight::Bold => BuiltinFont::HelveticaBold,
        };
        let baseline = self.height_pt - y;
        self.with_opacity(style.paint.opacity, |canvas| {
            let col = canvas.pdf_color(style.paint);
            canvas.push(Op::SetFillColor { col });
            canvas.push(Op::StartTextSection);
            canvas.push(Op::SetFontSizeBuiltinFont {
                font,
                size: Pt(style.size),
            });
            if style.angle_deg == 0.0 {
                canvas.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(x),
                        y: Pt(baseline),
                    },
                });
            } else {
                canvas.push(Op::SetTextMatrix {
                    matrix: TextMatrix::TranslateRotate(Pt(x), Pt(baseline), style.angle_deg),
                });
            }
            canvas.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(text.to_string())],
                font,
            });
            canvas.push(Op::EndTextSection);
        });
    }

    fn add_image(&mut self, image: &LoadedImage, bounds: Bounds) -> Result<()> {
        let expected = image.width as usize * image.height as usize * 3;
        if image.width == 0 || image.height == 0 || image.pixels.len() != expected {
            return Err(CatalogError::Pdf(format!(
                "image buffer of {} bytes does not match {}x{} RGB",
                image.pixels.len(),
                image.width,
                image.height
            )));
        }

        self.images.push(RawImage {
            pixels: RawImageData::U8(image.pixels.clone()),
            width: image.width as usize,
            height: image.height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        });
        let index = self.images.len() - 1;

        // At 72 dpi one pixel maps to one point before scaling
        let transform = XObjectTransform {
            translate_x: Some(Pt(bounds.x)),
            translate_y: Some(Pt(self.height_pt - bounds.bottom())),
            scale_x: Some(bounds.width / image.width as f32),
            scale_y: Some(bounds.height / image.height as f32),
            rotate: None,
            dpi: Some(72.0),
        };
        self.page().push(PageOp::Image { index, transform });
        Ok(())
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn begin_group(&mut self, _name: &str) {
        self.push(Op::SaveGraphicsState);
    }

    fn end_group(&mut self) {
        self.push(Op::RestoreGraphicsState);
    }

    fn save(self) -> Result<Vec<u8>> {
        let PdfCanvas {
            title,
            pages,
            images,
            width_pt,
            height_pt,
            ..
        } = self;

        let mut doc = PdfDocument::new(&title);
        let image_ids: Vec<XObjectId> = images.iter().map(|raw| doc.add_image(raw)).collect();
        let mut states: HashMap<u16, ExtendedGraphicsStateId> = HashMap::new();

        let built: Vec<PdfPage> = pages
            .into_iter()
            .map(|page| {
                let ops = page
                    .into_iter()
                    .map(|op| match op {
                        PageOp::Draw(op) => op,
                        PageOp::Image { index, transform } => Op::UseXobject {
                            id: image_ids[index].clone(),
                            transform,
                        },
                        PageOp::Alpha(key) => {
                            let gs = states
                                .entry(key)
                                .or_insert_with(|| {
                                    let alpha = key as f32 / 1000.0;
                                    doc.add_graphics_state(
                                        ExtendedGraphicsState::default()
                                            .with_current_fill_alpha(alpha)
                                            .with_current_stroke_alpha(alpha),
                                    )
                                })
                                .clone();
                            Op::LoadGraphicsState { gs }
                        }
                    })
                    .collect();
                PdfPage::new(Mm::from(Pt(width_pt)), Mm::from(Pt(height_pt)), ops)
            })
            .collect();
        doc.pages = built;

        log::debug!(
            "Serializing {} pages, {} images, {} opacity states",
            doc.pages.len(),
            image_ids.len(),
            states.len()
        );
        let mut warnings = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF serialization produced {} warnings", warnings.len());
        }
        Ok(bytes)
    }
}
