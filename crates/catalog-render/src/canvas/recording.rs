use super::{Bounds, Canvas, Paint, Stroke, TextStyle};
use crate::types::{LoadedImage, Result};

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        bounds: Bounds,
        paint: Paint,
    },
    StrokeRect {
        bounds: Bounds,
        stroke: Stroke,
    },
    RoundedRect {
        bounds: Bounds,
        radius: f32,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        paint: Paint,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    Image {
        width: u32,
        height: u32,
        bounds: Bounds,
    },
    BeginGroup(String),
    EndGroup,
}

/// Canvas that keeps every call, page by page, instead of producing a PDF.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width_pt: f32,
    height_pt: f32,
    pages: Vec<Vec<DrawCommand>>,
}

impl RecordingCanvas {
    pub fn new((width_pt, height_pt): (f32, f32)) -> Self {
        Self {
            width_pt,
            height_pt,
            pages: vec![Vec::new()],
        }
    }

    pub fn pages(&self) -> &[Vec<DrawCommand>] {
        &self.pages
    }

    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.pages.iter().flatten()
    }

    /// Every string drawn on page `index`, in call order
    pub fn texts_on_page(&self, index: usize) -> Vec<&str> {
        self.pages
            .get(index)
            .into_iter()
            .flatten()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn images_on_page(&self, index: usize) -> usize {
        self.pages.get(index).map_or(0, |page| {
            page.iter()
                .filter(|cmd| matches!(cmd, DrawCommand::Image { .. }))
                .count()
        })
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.commands()
            .any(|cmd| matches!(cmd, DrawCommand::BeginGroup(g) if g == name))
    }

    fn push(&mut self, cmd: DrawCommand) {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        self.pages[last].push(cmd);
    }
}

impl Canvas for RecordingCanvas {
    fn page_size(&self) -> (f32, f32) {
        (self.width_pt, self.height_pt)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn fill_rect(&mut self, bounds: Bounds, paint: Paint) {
        self.push(DrawCommand::FillRect { bounds, paint });
    }

    fn stroke_rect(&mut self, bounds: Bounds, stroke: Stroke) {
        self.push(DrawCommand::StrokeRect { bounds, stroke });
    }

    fn rounded_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
    ) {
        self.push(DrawCommand::RoundedRect {
            bounds,
            radius,
            fill,
            stroke,
        });
    }

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint) {
        self.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            paint,
        });
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        self.push(DrawCommand::Line { from, to, stroke });
    }

    fn text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style,
        });
    }

    fn add_image(&mut self, image: &LoadedImage, bounds: Bounds) -> Result<()> {
        self.push(DrawCommand::Image {
            width: image.width,
            height: image.height,
            bounds,
        });
        Ok(())
    }

    fn add_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn begin_group(&mut self, name: &str) {
        self.push(DrawCommand::BeginGroup(name.to_string()));
    }

    fn end_group(&mut self) {
        self.push(DrawCommand::EndGroup);
    }

    /// A plain-text listing of the recorded calls, one per line
    fn save(self) -> Result<Vec<u8>> {
        let mut out = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            out.push_str(&format!("page {}\n", index + 1));
            for cmd in page {
                out.push_str(&format!("  {:?}\n", cmd));
            }
        }
        Ok(out.into_bytes())
    }
}
