//! Figure and sub-plot geometry.

use serde::{Deserialize, Serialize};
use splicetrack_core::ExonSpan;

/// Bottom edge of the exon track in sub-plot data coordinates.
pub const EXON_BASELINE: f64 = 0.5;
/// Height of the exon track.
pub const EXON_HEIGHT: f64 = 0.5;
/// Horizontal padding as a fraction of the transcript extent.
const X_PADDING: f64 = 0.05;
/// Vertical margin multiplier applied to `top * height`.
const Y_MARGIN: f64 = 3.0;

/// Horizontal subplot margins as figure fractions.
const LEFT: f64 = 0.125;
const RIGHT: f64 = 0.9;
/// Vertical position of the figure title as a figure fraction from the bottom.
const SUPTITLE_Y: f64 = 0.98;

/// Figure dimensions and subplot spacing. Sizes are in figure units
/// (`pixels_per_unit` pixels each).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    pub width_units: f64,
    pub height_units_per_sample: f64,
    pub pixels_per_unit: f64,
    /// Gap between sub-plots as a fraction of the sub-plot height.
    pub hspace: f64,
    /// Top of the sub-plot area as a figure fraction.
    pub top: f64,
    /// Bottom of the sub-plot area as a figure fraction.
    pub bottom: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_units: 15.0,
            height_units_per_sample: 3.0,
            pixels_per_unit: 72.0,
            hspace: 0.4,
            top: 0.8,
            bottom: 0.2,
        }
    }
}

/// Pixel rectangle of one sub-plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Data window of one sub-plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub baseline: f64,
    pub exon_height: f64,
    /// Transcript extent (`stop - start`) in plotting coordinates.
    pub gene_length: f64,
}

impl PanelFrame {
    /// Frame around `exons`: transcript extent padded by 5% on both sides,
    /// exon track at `[0.5, 1.0]`, and `1.5` units of headroom above and
    /// below for the junction curves.
    pub fn for_exons(exons: &[ExonSpan]) -> Option<Self> {
        if exons.is_empty() {
            return None;
        }
        let start = exons.iter().map(|e| e.start).fold(f64::INFINITY, f64::min);
        let stop = exons.iter().map(|e| e.stop).fold(f64::NEG_INFINITY, f64::max);
        let gene_length = stop - start;
        // Zero extent widens around the position itself, or to +-padding at 0.
        let x_adjustment = if gene_length > 0.0 {
            X_PADDING * gene_length
        } else if start != 0.0 {
            X_PADDING * start.abs()
        } else {
            X_PADDING
        };

        let top = EXON_BASELINE + EXON_HEIGHT;
        let y_adjustment = top * EXON_HEIGHT * Y_MARGIN;

        Some(Self {
            x_min: start - x_adjustment,
            x_max: stop + x_adjustment,
            y_min: EXON_BASELINE - y_adjustment,
            y_max: top + y_adjustment,
            baseline: EXON_BASELINE,
            exon_height: EXON_HEIGHT,
            gene_length,
        })
    }

    pub fn exon_top(&self) -> f64 {
        self.baseline + self.exon_height
    }

    pub fn visible_width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn visible_height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// Pixel layout of an `N`-sample figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub width: f64,
    pub height: f64,
    pub panels: Vec<PanelRect>,
    /// Baseline of the figure title.
    pub title_y: f64,
}

impl FigureLayout {
    /// `N` equal sub-plots in one column, separated by `hspace` times the
    /// sub-plot height, filling `[bottom, top]` of the figure.
    pub fn new(samples: usize, config: &FigureConfig) -> Self {
        let width = config.width_units * config.pixels_per_unit;
        let height = config.height_units_per_sample * samples as f64 * config.pixels_per_unit;

        let n = samples as f64;
        let area_top = (1.0 - config.top) * height;
        let area_height = (config.top - config.bottom) * height;
        let panel_height = if samples == 0 {
            0.0
        } else {
            area_height / (n + config.hspace * (n - 1.0))
        };
        let gap = config.hspace * panel_height;

        let panels = (0..samples)
            .map(|i| PanelRect {
                left: LEFT * width,
                top: area_top + i as f64 * (panel_height + gap),
                width: (RIGHT - LEFT) * width,
                height: panel_height,
            })
            .collect();

        Self {
            width,
            height,
            panels,
            title_y: (1.0 - SUPTITLE_Y) * height,
        }
    }
}
