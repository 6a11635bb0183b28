/*!
# Vector Export

SVG drawing surface and the figure exporter that writes `<stem>.svg` together
with a minimal `<stem>.html` page embedding it.
*/

use std::fs;
use std::path::{Path, PathBuf};

use svg::node::element::path::Data;
use svg::node::element::{ClipPath, Group, Path as SvgPath, Rectangle, Text};
use svg::node::Comment;
use svg::{Document, Node};

use splicetrack_core::{BezierCurve, ExonSpan, Point, Rgba, Sample};

use crate::compose::PlotComposer;
use crate::error::RenderResult;
use crate::layout::PanelRect;
use crate::surface::{DrawingSurface, Stroke, TextStyle};

/// Round to three decimals so output is stable and compact.
fn px(v: f64) -> f32 {
    ((v * 1000.0).round() / 1000.0) as f32
}

/// [`DrawingSurface`] backed by an in-memory SVG document.
pub struct SvgSurface {
    document: Document,
    panel: Option<Group>,
    panel_count: usize,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64, background: &str) -> Self {
        let document = Document::new()
            .set("viewBox", format!("0 0 {} {}", px(width), px(height)))
            .set("width", px(width))
            .set("height", px(height))
            .add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", px(width))
                    .set("height", px(height))
                    .set("fill", background),
            );
        Self {
            document,
            panel: None,
            panel_count: 0,
        }
    }

    /// Add a comment at the current position (e.g. provenance).
    pub fn comment(&mut self, text: &str) {
        for line in text.lines() {
            self.push(Comment::new(format!(" {} ", line)));
        }
    }

    fn push<N>(&mut self, node: N)
    where
        N: Into<Box<dyn Node>>,
    {
        match self.panel.take() {
            Some(group) => self.panel = Some(group.add(node)),
            None => {
                let document = std::mem::replace(&mut self.document, Document::new());
                self.document = document.add(node);
            }
        }
    }

    pub fn into_document(mut self) -> Document {
        self.end_panel();
        self.document
    }

    pub fn to_svg_string(self) -> String {
        self.into_document().to_string()
    }
}

fn stroke_path(data: Data, stroke: &Stroke) -> SvgPath {
    SvgPath::new()
        .set("d", data)
        .set("fill", "none")
        .set("stroke", stroke.color.as_str())
        .set("stroke-width", px(stroke.width))
        .set("stroke-opacity", px(stroke.alpha))
}

impl DrawingSurface for SvgSurface {
    fn begin_panel(&mut self, rect: &PanelRect) {
        self.end_panel();
        self.panel_count += 1;
        let clip_id = format!("panel-{}", self.panel_count);
        let clip = ClipPath::new().set("id", clip_id.as_str()).add(
            Rectangle::new()
                .set("x", px(rect.left))
                .set("y", px(rect.top))
                .set("width", px(rect.width))
                .set("height", px(rect.height)),
        );
        self.push(clip);
        self.panel = Some(Group::new().set("clip-path", format!("url(#{})", clip_id)));
    }

    fn end_panel(&mut self) {
        if let Some(group) = self.panel.take() {
            self.push(group);
        }
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Rgba, edge: &Stroke) {
        self.push(
            Rectangle::new()
                .set("x", px(x))
                .set("y", px(y))
                .set("width", px(width))
                .set("height", px(height))
                .set("fill", fill.to_css())
                .set("stroke", edge.color.as_str())
                .set("stroke-width", px(edge.width)),
        );
    }

    fn quadratic(&mut self, start: Point, control: Point, end: Point, stroke: &Stroke) {
        let data = Data::new()
            .move_to((px(start.x), px(start.y)))
            .quadratic_curve_to(vec![px(control.x), px(control.y), px(end.x), px(end.y)]);
        self.push(stroke_path(data, stroke));
    }

    fn cubic(&mut self, curve: &BezierCurve, stroke: &Stroke) {
        let data = Data::new()
            .move_to((px(curve.p0.x), px(curve.p0.y)))
            .cubic_curve_to(vec![
                px(curve.p1.x),
                px(curve.p1.y),
                px(curve.p2.x),
                px(curve.p2.y),
                px(curve.p3.x),
                px(curve.p3.y),
            ]);
        self.push(stroke_path(data, stroke));
    }

    fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.push(
            Text::new(content)
                .set("x", px(x))
                .set("y", px(y))
                .set("text-anchor", "middle")
                .set("font-family", style.font_family.as_str())
                .set("font-size", px(style.font_size))
                .set("font-weight", if style.bold { "bold" } else { "normal" }),
        );
    }
}

/// Minimal HTML page that shows `<stem>.svg`.
pub fn html_wrapper(stem: &str) -> String {
    format!(
        "\n<html>\n<body>\n<img src=\"{stem}.svg\" alt=\"{stem}\">\n</body>\n</html>\n",
        stem = stem
    )
}

/// Paths written by one export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFigure {
    pub svg: PathBuf,
    pub html: PathBuf,
}

/// Renders a composed figure to disk.
pub struct FigureExporter {
    composer: PlotComposer,
    provenance_comment: Option<String>,
}

impl FigureExporter {
    pub fn new(composer: PlotComposer) -> Self {
        Self {
            composer,
            provenance_comment: None,
        }
    }

    /// Embed a comment (e.g. inputs and options) at the top of the SVG.
    pub fn with_provenance(mut self, comment: impl Into<String>) -> Self {
        self.provenance_comment = Some(comment.into());
        self
    }

    /// Compose the figure into an SVG string.
    pub fn render_svg(&self, exons: &[ExonSpan], samples: &[Sample], title: &str) -> RenderResult<String> {
        let layout = self.composer.layout(samples.len());
        let mut surface = SvgSurface::new(
            layout.width,
            layout.height,
            &self.composer.style().background_color,
        );
        if let Some(comment) = &self.provenance_comment {
            surface.comment(comment);
        }
        self.composer.compose(&mut surface, exons, samples, title)?;
        Ok(surface.to_svg_string())
    }

    /// Write `<dir>/<title>.svg` and `<dir>/<title>.html`.
    pub fn export<P: AsRef<Path>>(
        &self,
        dir: P,
        exons: &[ExonSpan],
        samples: &[Sample],
        title: &str,
    ) -> RenderResult<ExportedFigure> {
        let svg_content = self.render_svg(exons, samples, title)?;

        let svg_path = dir.as_ref().join(format!("{}.svg", title));
        let html_path = dir.as_ref().join(format!("{}.html", title));
        fs::write(&svg_path, svg_content)?;
        fs::write(&html_path, html_wrapper(title))?;

        log::info!("Wrote {}", svg_path.display());
        log::info!("Wrote {}", html_path.display());
        Ok(ExportedFigure {
            svg: svg_path,
            html: html_path,
        })
    }
}
