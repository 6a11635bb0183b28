//! Multi-sample figure composition.
//!
//! Each sample gets one sub-plot sharing the same exon layout: exon boxes
//! shaded by coverage, canonical junction arcs above the boxes and backsplice
//! loops below them.

use splicetrack_core::{
    backsplice_curves, canonical_arcs, ArcCurve, BezierCurve, CurveParams, ExonSpan, Point, Rgba,
    Sample,
};

use crate::error::{RenderError, RenderResult};
use crate::layout::{FigureConfig, FigureLayout, PanelFrame, PanelRect};
use crate::surface::{DrawingSurface, Stroke, TextStyle};
use crate::{FigureStyle, Viewport};

/// Pixel offset between a sub-plot's top edge and its title baseline.
const SUBPLOT_TITLE_PAD: f64 = 6.0;

/// Figure title: `"<gene> (<transcript>)"` when selected by gene, otherwise
/// the transcript ID.
pub fn figure_title(transcript: &str, gene: Option<&str>) -> String {
    match gene {
        Some(gene) => format!("{} ({})", gene, transcript),
        None => transcript.to_string(),
    }
}

/// Sub-plot title: separator characters `-`, `_` and `|` become spaces.
pub fn sample_title(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '-' | '_' | '|') { ' ' } else { c })
        .collect()
}

/// One fill color per exon.
///
/// Per-exon coverage maps one-to-one. Per-base coverage (one value per base
/// over all exons) is averaged over each exon's bases. Any other length pairs
/// positionally and leaves the rest transparent.
pub fn exon_colors(exons: &[ExonSpan], colors: &[Rgba]) -> Vec<Rgba> {
    let transparent = colors
        .first()
        .map(|c| Rgba { a: 0.0, ..*c })
        .unwrap_or(Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 });

    let total_bases: usize = exons.iter().map(ExonSpan::base_count).sum();
    if colors.len() != exons.len() && colors.len() == total_bases && total_bases > 0 {
        let mut offset = 0;
        return exons
            .iter()
            .map(|exon| {
                let n = exon.base_count();
                let slice = &colors[offset..offset + n];
                offset += n;
                match slice.first() {
                    Some(first) => Rgba {
                        a: slice.iter().map(|c| c.a).sum::<f64>() / n as f64,
                        ..*first
                    },
                    None => transparent,
                }
            })
            .collect();
    }

    (0..exons.len())
        .map(|i| colors.get(i).copied().unwrap_or(transparent))
        .collect()
}

/// Control point of an arc connector in pixel space: the midpoint of `AB`
/// pushed perpendicular to it by `rad * |AB|`, toward the top of the figure
/// for left-to-right connectors.
pub fn arc_control_point(start: Point, end: Point, rad: f64) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    Point::new(
        (start.x + end.x) / 2.0 + rad * dy,
        (start.y + end.y) / 2.0 - rad * dx,
    )
}

/// Draws samples onto a [`DrawingSurface`].
pub struct PlotComposer {
    style: FigureStyle,
    figure: FigureConfig,
    curves: CurveParams,
}

impl PlotComposer {
    pub fn new(style: FigureStyle, figure: FigureConfig, curves: CurveParams) -> Self {
        Self { style, figure, curves }
    }

    pub fn style(&self) -> &FigureStyle {
        &self.style
    }

    pub fn layout(&self, samples: usize) -> FigureLayout {
        FigureLayout::new(samples, &self.figure)
    }

    /// Draw the whole figure: one sub-plot per sample in order, then the
    /// figure title.
    pub fn compose<S: DrawingSurface>(
        &self,
        surface: &mut S,
        exons: &[ExonSpan],
        samples: &[Sample],
        title: &str,
    ) -> RenderResult<FigureLayout> {
        if samples.is_empty() {
            return Err(RenderError::NoSamples);
        }
        let frame = PanelFrame::for_exons(exons).ok_or(RenderError::EmptyTranscript)?;
        let layout = self.layout(samples.len());

        for (sample, rect) in samples.iter().zip(&layout.panels) {
            self.draw_sample(surface, &frame, *rect, exons, sample);
        }

        let title_style = TextStyle {
            font_family: self.style.font_family.clone(),
            font_size: self.style.title_font_size,
            bold: true,
        };
        surface.text(
            layout.width / 2.0,
            layout.title_y + self.style.title_font_size,
            title,
            &title_style,
        );

        log::debug!(
            "Composed {} sub-plots into a {}x{} figure",
            samples.len(),
            layout.width,
            layout.height
        );
        Ok(layout)
    }

    fn draw_sample<S: DrawingSurface>(
        &self,
        surface: &mut S,
        frame: &PanelFrame,
        rect: PanelRect,
        exons: &[ExonSpan],
        sample: &Sample,
    ) {
        let viewport = Viewport::new(frame, rect);

        surface.begin_panel(&rect);
        self.draw_exons(surface, &viewport, frame, exons, &sample.colors);

        let arcs = canonical_arcs(&sample.canonical, frame.exon_top(), frame.visible_width(), &self.curves);
        self.draw_arcs(surface, &viewport, &arcs);

        let loops = backsplice_curves(
            &sample.backsplice,
            frame.baseline,
            frame.visible_height(),
            frame.gene_length,
            &self.curves,
        );
        self.draw_loops(surface, &viewport, &loops);
        surface.end_panel();

        let title_style = TextStyle {
            font_family: self.style.font_family.clone(),
            font_size: self.style.subplot_font_size,
            bold: false,
        };
        surface.text(
            rect.left + rect.width / 2.0,
            rect.top - SUBPLOT_TITLE_PAD,
            &sample_title(&sample.name),
            &title_style,
        );

        log::debug!(
            "{}: {} arcs, {} backsplice curves",
            sample.name,
            arcs.len(),
            loops.len()
        );
    }

    fn draw_exons<S: DrawingSurface>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        frame: &PanelFrame,
        exons: &[ExonSpan],
        colors: &[Rgba],
    ) {
        let edge = Stroke::new(self.style.exon_edge_color.clone(), self.style.exon_edge_width, 1.0);
        for (exon, fill) in exons.iter().zip(exon_colors(exons, colors)) {
            let top_left = viewport.world_to_pixel(Point::new(exon.start, frame.exon_top()));
            let bottom_right = viewport.world_to_pixel(Point::new(exon.stop, frame.baseline));
            surface.rect(
                top_left.x,
                top_left.y,
                bottom_right.x - top_left.x,
                bottom_right.y - top_left.y,
                fill,
                &edge,
            );
        }
    }

    fn draw_arcs<S: DrawingSurface>(&self, surface: &mut S, viewport: &Viewport, arcs: &[ArcCurve]) {
        let stroke = Stroke::new(
            self.style.curve_color.clone(),
            self.style.canonical_line_width,
            self.style.canonical_alpha,
        );
        for arc in arcs {
            let start = viewport.world_to_pixel(arc.start);
            let end = viewport.world_to_pixel(arc.stop);
            let control = arc_control_point(start, end, arc.rad);
            surface.quadratic(start, control, end, &stroke);
        }
    }

    fn draw_loops<S: DrawingSurface>(&self, surface: &mut S, viewport: &Viewport, loops: &[BezierCurve]) {
        let stroke = Stroke::new(
            self.style.curve_color.clone(),
            self.style.backsplice_line_width,
            self.style.backsplice_alpha,
        );
        for curve in loops {
            let pixel = BezierCurve {
                p0: viewport.world_to_pixel(curve.p0),
                p1: viewport.world_to_pixel(curve.p1),
                p2: viewport.world_to_pixel(curve.p2),
                p3: viewport.world_to_pixel(curve.p3),
            };
            surface.cubic(&pixel, &stroke);
        }
    }
}
