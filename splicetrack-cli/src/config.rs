//! Configuration handling for the SpliceTrack CLI
//!
//! Supports loading figure settings from splicetrack.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use splicetrack_core::CurveParams;
use splicetrack_render::{FigureConfig, FigureStyle};

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "splicetrack.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub figure: FigureSection,
    #[serde(default)]
    pub curves: CurveSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Exon fill color used when `--color` is not given
    #[serde(default = "default_exon_color")]
    pub exon_color: String,

    #[serde(default = "default_exon_edge_color")]
    pub exon_edge_color: String,

    #[serde(default = "default_exon_edge_width")]
    pub exon_edge_width: f64,

    #[serde(default = "default_line_width")]
    pub canonical_line_width: f64,

    /// Opacity of each canonical arc
    #[serde(default = "default_canonical_alpha")]
    pub canonical_alpha: f64,

    #[serde(default = "default_line_width")]
    pub backsplice_line_width: f64,

    /// Opacity of each backsplice curve
    #[serde(default = "default_backsplice_alpha")]
    pub backsplice_alpha: f64,

    #[serde(default = "default_title_font_size")]
    pub title_font_size: f64,

    #[serde(default = "default_subplot_font_size")]
    pub subplot_font_size: f64,

    #[serde(default = "default_font_family")]
    pub font_family: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureSection {
    /// Figure width in units
    #[serde(default = "default_width_units")]
    pub width_units: f64,

    /// Figure height per sample in units
    #[serde(default = "default_height_units")]
    pub height_units_per_sample: f64,

    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f64,

    /// Vertical gap between sub-plots, as a fraction of sub-plot height
    #[serde(default = "default_hspace")]
    pub hspace: f64,

    #[serde(default = "default_top")]
    pub top: f64,

    #[serde(default = "default_bottom")]
    pub bottom: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSection {
    /// Lowest canonical arc radian before correction
    #[serde(default = "default_radian_low")]
    pub radian_low: f64,

    /// Highest canonical arc radian before correction
    #[serde(default = "default_radian_high")]
    pub radian_high: f64,

    /// Backsplice depth as a fraction of the visible sub-plot height
    #[serde(default = "default_bezier_offset")]
    pub bezier_offset: f64,
}

// Default value functions
fn default_exon_color() -> String { "#C21807".to_string() }
fn default_exon_edge_color() -> String { FigureStyle::default().exon_edge_color }
fn default_exon_edge_width() -> f64 { FigureStyle::default().exon_edge_width }
fn default_line_width() -> f64 { 1.0 }
fn default_canonical_alpha() -> f64 { FigureStyle::default().canonical_alpha }
fn default_backsplice_alpha() -> f64 { FigureStyle::default().backsplice_alpha }
fn default_title_font_size() -> f64 { FigureStyle::default().title_font_size }
fn default_subplot_font_size() -> f64 { FigureStyle::default().subplot_font_size }
fn default_font_family() -> String { FigureStyle::default().font_family }
fn default_width_units() -> f64 { FigureConfig::default().width_units }
fn default_height_units() -> f64 { FigureConfig::default().height_units_per_sample }
fn default_pixels_per_unit() -> f64 { FigureConfig::default().pixels_per_unit }
fn default_hspace() -> f64 { FigureConfig::default().hspace }
fn default_top() -> f64 { FigureConfig::default().top }
fn default_bottom() -> f64 { FigureConfig::default().bottom }
fn default_radian_low() -> f64 { CurveParams::default().radian_low }
fn default_radian_high() -> f64 { CurveParams::default().radian_high }
fn default_bezier_offset() -> f64 { CurveParams::default().bezier_offset }

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            exon_color: default_exon_color(),
            exon_edge_color: default_exon_edge_color(),
            exon_edge_width: default_exon_edge_width(),
            canonical_line_width: default_line_width(),
            canonical_alpha: default_canonical_alpha(),
            backsplice_line_width: default_line_width(),
            backsplice_alpha: default_backsplice_alpha(),
            title_font_size: default_title_font_size(),
            subplot_font_size: default_subplot_font_size(),
            font_family: default_font_family(),
        }
    }
}

impl Default for FigureSection {
    fn default() -> Self {
        Self {
            width_units: default_width_units(),
            height_units_per_sample: default_height_units(),
            pixels_per_unit: default_pixels_per_unit(),
            hspace: default_hspace(),
            top: default_top(),
            bottom: default_bottom(),
        }
    }
}

impl Default for CurveSection {
    fn default() -> Self {
        Self {
            radian_low: default_radian_low(),
            radian_high: default_radian_high(),
            bezier_offset: default_bezier_offset(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")
    }

    pub fn figure_style(&self) -> FigureStyle {
        let style = &self.style;
        FigureStyle {
            exon_edge_color: style.exon_edge_color.clone(),
            exon_edge_width: style.exon_edge_width,
            canonical_line_width: style.canonical_line_width,
            canonical_alpha: style.canonical_alpha,
            backsplice_line_width: style.backsplice_line_width,
            backsplice_alpha: style.backsplice_alpha,
            font_family: style.font_family.clone(),
            title_font_size: style.title_font_size,
            subplot_font_size: style.subplot_font_size,
            ..FigureStyle::default()
        }
    }

    pub fn figure_config(&self) -> FigureConfig {
        let figure = &self.figure;
        FigureConfig {
            width_units: figure.width_units,
            height_units_per_sample: figure.height_units_per_sample,
            pixels_per_unit: figure.pixels_per_unit,
            hspace: figure.hspace,
            top: figure.top,
            bottom: figure.bottom,
        }
    }

    pub fn curve_params(&self) -> CurveParams {
        CurveParams {
            radian_low: self.curves.radian_low,
            radian_high: self.curves.radian_high,
            bezier_offset: self.curves.bezier_offset,
        }
    }
}
