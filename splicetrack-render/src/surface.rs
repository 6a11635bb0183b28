//! Drawing surface abstraction.
//!
//! The composer only needs rectangles, quadratic and cubic strokes, text and
//! per-panel clipping. Coordinates are pixels with y growing downward.

use splicetrack_core::{BezierCurve, Point, Rgba};

use crate::layout::PanelRect;

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub alpha: f64,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64, alpha: f64) -> Self {
        Self {
            color: color.into(),
            width,
            alpha,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
}

pub trait DrawingSurface {
    /// Start a clipped sub-plot region. Primitives until [`end_panel`](Self::end_panel)
    /// are clipped to `rect`.
    fn begin_panel(&mut self, rect: &PanelRect);
    fn end_panel(&mut self);

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Rgba, edge: &Stroke);
    fn quadratic(&mut self, start: Point, control: Point, end: Point, stroke: &Stroke);
    fn cubic(&mut self, curve: &BezierCurve, stroke: &Stroke);
    /// Centered text with its baseline at `y`.
    fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle);
}

/// Recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPanel(PanelRect),
    EndPanel,
    Rect { x: f64, y: f64, width: f64, height: f64, fill: Rgba },
    Quadratic { start: Point, control: Point, end: Point },
    Cubic(BezierCurve),
    Text { x: f64, y: f64, content: String },
}

/// Surface that records primitives instead of drawing them.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_rects(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Rect { .. })).count()
    }

    pub fn count_quadratics(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Quadratic { .. })).count()
    }

    pub fn count_cubics(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Cubic(_))).count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_panel(&mut self, rect: &PanelRect) {
        self.ops.push(DrawOp::BeginPanel(*rect));
    }

    fn end_panel(&mut self) {
        self.ops.push(DrawOp::EndPanel);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Rgba, _edge: &Stroke) {
        self.ops.push(DrawOp::Rect { x, y, width, height, fill });
    }

    fn quadratic(&mut self, start: Point, control: Point, end: Point, _stroke: &Stroke) {
        self.ops.push(DrawOp::Quadratic { start, control, end });
    }

    fn cubic(&mut self, curve: &BezierCurve, _stroke: &Stroke) {
        self.ops.push(DrawOp::Cubic(*curve));
    }

    fn text(&mut self, x: f64, y: f64, content: &str, _style: &TextStyle) {
        self.ops.push(DrawOp::Text { x, y, content: content.to_string() });
    }
}
