/*!
# SpliceTrack Rendering

Turns per-sample junction and coverage data into a single static figure:

1. **Layout**: one normalized sub-plot per sample, stacked vertically
2. **Composition**: exon rectangles, canonical arcs above, backsplice loops below
3. **Export**: an SVG document plus a minimal HTML page that embeds it

All drawing goes through the [`DrawingSurface`] trait, which works in pixel
coordinates. [`Viewport`] maps a sub-plot's data coordinates onto its pixel
rectangle.
*/

pub mod compose;
pub mod error;
pub mod layout;
pub mod surface;
pub mod vector_export;

pub use compose::{figure_title, PlotComposer};
pub use error::{RenderError, RenderResult};
pub use layout::{FigureConfig, FigureLayout, PanelFrame, PanelRect};
pub use surface::{DrawingSurface, RecordingSurface, Stroke, TextStyle};
pub use vector_export::{html_wrapper, ExportedFigure, FigureExporter, SvgSurface};

use serde::{Deserialize, Serialize};
use splicetrack_core::Point;

/// Mapping from a sub-plot's data window onto its pixel rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub rect: PanelRect,
}

impl Viewport {
    pub fn new(frame: &PanelFrame, rect: PanelRect) -> Self {
        Self {
            x_min: frame.x_min,
            x_max: frame.x_max,
            y_min: frame.y_min,
            y_max: frame.y_max,
            rect,
        }
    }

    /// Data to pixel. Pixel y grows downward, data y grows upward.
    pub fn world_to_pixel(&self, world: Point) -> Point {
        let nx = (world.x - self.x_min) / (self.x_max - self.x_min);
        let ny = (world.y - self.y_min) / (self.y_max - self.y_min);
        Point::new(
            self.rect.left + nx * self.rect.width,
            self.rect.top + (1.0 - ny) * self.rect.height,
        )
    }

    pub fn pixel_to_world(&self, pixel: Point) -> Point {
        let nx = (pixel.x - self.rect.left) / self.rect.width;
        let ny = 1.0 - (pixel.y - self.rect.top) / self.rect.height;
        Point::new(
            self.x_min + nx * (self.x_max - self.x_min),
            self.y_min + ny * (self.y_max - self.y_min),
        )
    }

    /// Pixel length of a data-space width.
    pub fn x_scale(&self) -> f64 {
        self.rect.width / (self.x_max - self.x_min)
    }
}

/// Stroke and fill settings for one figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureStyle {
    pub exon_edge_color: String,
    pub exon_edge_width: f64,
    pub canonical_line_width: f64,
    pub canonical_alpha: f64,
    pub backsplice_line_width: f64,
    pub backsplice_alpha: f64,
    pub curve_color: String,
    pub font_family: String,
    pub title_font_size: f64,
    pub subplot_font_size: f64,
    pub background_color: String,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            exon_edge_color: "#000000".to_string(),
            exon_edge_width: 0.5,
            canonical_line_width: 1.0,
            canonical_alpha: 0.2,
            backsplice_line_width: 1.0,
            backsplice_alpha: 0.1,
            curve_color: "#000000".to_string(),
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            title_font_size: 16.0,
            subplot_font_size: 12.0,
            background_color: "#ffffff".to_string(),
        }
    }
}
