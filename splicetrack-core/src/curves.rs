//! Junction curve families.
//!
//! Read support is drawn as repetition: a junction with `count` reads becomes
//! `count` translucent arcs above the exons (canonical) or `2 * count` bezier
//! loops below them (backsplice). Overlapping low-alpha strokes darken with
//! support. Curves are produced in data coordinates; the drawing surface maps
//! them to pixels.

use serde::{Deserialize, Serialize};

use crate::types::Junction;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Arc connector between two points on the same baseline. `rad` is the
/// curvature of a quadratic connector: the control point sits `rad * |AB|`
/// away from the midpoint of `AB`, on the upper side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCurve {
    pub start: Point,
    pub stop: Point,
    pub rad: f64,
}

/// Cubic bezier `p0 -> p3` with control points `p1`, `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierCurve {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

/// Backsplice depth offsets cover `[0, BACKSPLICE_DEPTH_SPAN)`.
pub const BACKSPLICE_DEPTH_SPAN: f64 = 0.5;

/// Depth parameters shared by both generators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    pub radian_low: f64,
    pub radian_high: f64,
    pub bezier_offset: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            radian_low: 0.2,
            radian_high: 0.4,
            bezier_offset: 0.15,
        }
    }
}

/// Dampening for junctions spanning a large part of the visible width.
///
/// Thresholds are checked in increasing order and each match overwrites the
/// previous factor, so the widest matching threshold decides.
pub fn radian_correction(arc_len: f64, visible_width: f64) -> f64 {
    let mut corr = 1.0;
    if arc_len > visible_width / 8.0 {
        corr = 2.0 * arc_len / visible_width;
    }
    if arc_len > visible_width / 4.0 {
        corr = 1.5 * arc_len / visible_width;
    }
    if arc_len > visible_width / 2.0 {
        corr = arc_len / visible_width;
    }
    if arc_len > visible_width / 1.2 {
        corr = 0.4 * arc_len / visible_width;
    }
    corr
}

/// Arcs for canonical junctions, anchored at `y` (the exon top edge).
///
/// Each junction yields exactly `count` arcs whose base radians step from
/// `radian_low` by `(radian_high - radian_low) / count`. Zero-count junctions
/// produce nothing.
pub fn canonical_arcs(
    junctions: &[Junction],
    y: f64,
    visible_width: f64,
    params: &CurveParams,
) -> Vec<ArcCurve> {
    let radian_diff = params.radian_high - params.radian_low;
    let mut arcs = Vec::new();

    for junction in junctions.iter().filter(|j| j.count != 0) {
        let corr = radian_correction(junction.span(), visible_width);
        let step = radian_diff / junction.count as f64;
        arcs.extend((0..junction.count).map(|i| ArcCurve {
            start: Point::new(junction.start, y),
            stop: Point::new(junction.stop, y),
            rad: (params.radian_low + i as f64 * step) * corr,
        }));
    }
    arcs
}

/// Bezier loops for backsplice junctions, hanging below `y` (the exon bottom
/// edge).
///
/// Each junction yields `2 * count` curves with depth offsets spread evenly
/// over `[0, 0.5)`. Control points dip by `bezier_offset * visible_height`
/// plus the offset, and are pushed outward by `gene_length / 20`.
pub fn backsplice_curves(
    junctions: &[Junction],
    y: f64,
    visible_height: f64,
    gene_length: f64,
    params: &CurveParams,
) -> Vec<BezierCurve> {
    let size_adjust = gene_length / 20.0;
    let base_depth = params.bezier_offset * visible_height;
    let mut curves = Vec::new();

    for junction in junctions.iter().filter(|j| j.count != 0) {
        let n = 2 * junction.count;
        curves.extend((0..n).map(|i| {
            let adjust = i as f64 * BACKSPLICE_DEPTH_SPAN / n as f64;
            let depth = y - base_depth - adjust;
            BezierCurve {
                p0: Point::new(junction.start, y),
                p1: Point::new(junction.start - size_adjust, depth),
                p2: Point::new(junction.stop + size_adjust, depth),
                p3: Point::new(junction.stop, y),
            }
        }));
    }
    curves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_arc_count_matches_support() {
        let junctions = vec![
            Junction::new(100.0, 200.0, 3),
            Junction::new(150.0, 250.0, 0),
            Junction::new(120.0, 130.0, 1),
        ];
        let arcs = canonical_arcs(&junctions, 1.0, 1000.0, &CurveParams::default());
        assert_eq!(arcs.len(), 4);
        assert!(arcs.iter().all(|a| a.start.y == 1.0 && a.stop.y == 1.0));
    }

    #[test]
    fn test_canonical_zero_count_draws_nothing() {
        let arcs = canonical_arcs(&[Junction::new(0.0, 10.0, 0)], 1.0, 100.0, &CurveParams::default());
        assert!(arcs.is_empty());
    }

    #[test]
    fn test_canonical_radians_step_through_range() {
        // Span 10 of 1000 is below every threshold, so no correction.
        let arcs = canonical_arcs(&[Junction::new(0.0, 10.0, 4)], 1.0, 1000.0, &CurveParams::default());
        let rads: Vec<f64> = arcs.iter().map(|a| a.rad).collect();
        let expected = [0.2, 0.25, 0.3, 0.35];
        for (r, e) in rads.iter().zip(expected) {
            assert!((r - e).abs() < 1e-12);
        }
        assert!(rads.iter().all(|&r| r < 0.4));
    }

    #[test]
    fn test_radian_correction_last_threshold_wins() {
        let w = 800.0;
        assert_eq!(radian_correction(50.0, w), 1.0);
        // > w/8 only
        assert!((radian_correction(150.0, w) - 2.0 * 150.0 / w).abs() < 1e-12);
        // > w/4
        assert!((radian_correction(300.0, w) - 1.5 * 300.0 / w).abs() < 1e-12);
        // > w/2
        assert!((radian_correction(500.0, w) - 500.0 / w).abs() < 1e-12);
        // > w/1.2
        assert!((radian_correction(700.0, w) - 0.4 * 700.0 / w).abs() < 1e-12);
    }

    #[test]
    fn test_backsplice_draws_two_curves_per_read() {
        let junctions = vec![Junction::new(100.0, 300.0, 3), Junction::new(100.0, 300.0, 0)];
        let curves = backsplice_curves(&junctions, 0.5, 3.5, 400.0, &CurveParams::default());
        assert_eq!(curves.len(), 6);
    }

    #[test]
    fn test_backsplice_geometry() {
        let curves = backsplice_curves(&[Junction::new(100.0, 300.0, 1)], 0.5, 4.0, 400.0, &CurveParams::default());
        assert_eq!(curves.len(), 2);
        let first = &curves[0];
        assert_eq!(first.p0, Point::new(100.0, 0.5));
        assert_eq!(first.p3, Point::new(300.0, 0.5));
        assert_eq!(first.p1.x, 80.0);
        assert_eq!(first.p2.x, 320.0);
        assert!((first.p1.y - (0.5 - 0.6)).abs() < 1e-12);
        // Second curve dips a further 0.25.
        assert!((curves[1].p1.y - (0.5 - 0.6 - 0.25)).abs() < 1e-12);
        assert!(curves.iter().all(|c| c.p1.y < 0.5 && c.p2.y == c.p1.y));
    }
}
