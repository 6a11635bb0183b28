//! Exon fill colors.
//!
//! Coverage is encoded in the alpha channel of a single base color, so every
//! data point carries an [`Rgba`] built from the user's [`Rgb`] plus an alpha
//! derived from its coverage value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgb {
    pub const RED: Rgb = Rgb { r: 1.0, g: 0.0, b: 0.0 };

    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b)
        )
    }
}

impl Rgba {
    /// CSS `rgba()` string with 0-255 color channels.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.4})",
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

fn channel_to_byte(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#FF0000"),
    ("blue", "#0000FF"),
    ("green", "#006600"),
    ("yellow", "#FFFF00"),
    ("purple", "#990099"),
    ("black", "#000000"),
    ("white", "#FFFFFF"),
    ("orange", "#FF8000"),
    ("brown", "#663300"),
];

/// Parse `#RRGGBB` or a small set of color names. Anything else logs a
/// warning and falls back to red.
pub fn parse_color(spec: &str) -> Rgb {
    let hex = if spec.starts_with('#') && spec.len() == 7 {
        spec.to_string()
    } else {
        let lowered = spec.to_lowercase();
        match NAMED_COLORS.iter().find(|(name, _)| *name == lowered) {
            Some((_, hex)) => hex.to_string(),
            None => {
                log::warn!("Invalid color input: {}. Color is set to red", spec);
                return Rgb::RED;
            }
        }
    };

    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .map(|v| v as f64 / 255.0)
    };
    match (channel(1), channel(3), channel(5)) {
        (Some(r), Some(g), Some(b)) => Rgb { r, g, b },
        _ => {
            log::warn!(
                "Invalid hex input: {}. Values must range from 0-9 and A-F. Color is set to red",
                spec
            );
            Rgb::RED
        }
    }
}

/// One color per coverage value, alpha = value / `max_coverage`.
/// A zero maximum gives alpha 0 everywhere instead of dividing by zero.
pub fn coverage_colors(base: Rgb, coverage: &[f64], max_coverage: f64) -> Vec<Rgba> {
    coverage
        .iter()
        .map(|&value| {
            let alpha = if max_coverage != 0.0 { value / max_coverage } else { 0.0 };
            base.with_alpha(alpha)
        })
        .collect()
}

/// Largest coverage value, 0 for an empty slice.
pub fn max_coverage(coverage: &[f64]) -> f64 {
    coverage.iter().copied().fold(0.0, f64::max)
}
