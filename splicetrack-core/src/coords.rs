//! Coordinate spaces for intron-scaled plotting.
//!
//! A transcript's exons define a piecewise coordinate space: the flattened
//! sequence `start_0, stop_0, start_1, stop_1, ...`. Scaling introns yields a
//! second space with the same number of breakpoints, and any point (such as a
//! junction endpoint) can be carried from one space into the other by linear
//! interpolation inside the segment that contains it.

use crate::types::{ExonSpan, Junction};

/// Flattened, ordered breakpoints of an exon list.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSpace {
    breakpoints: Vec<f64>,
}

impl CoordinateSpace {
    pub fn from_exons(exons: &[ExonSpan]) -> Self {
        let breakpoints = exons.iter().flat_map(|e| [e.start, e.stop]).collect();
        Self { breakpoints }
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn len(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    /// Index of the first consecutive pair `[left, right]` with
    /// `left <= query <= right`. Adjacent exons that share a breakpoint resolve
    /// to the earlier segment. A query outside every segment falls back to the
    /// last pair so it is extrapolated from the trailing edge.
    fn segment_index(&self, query: f64) -> Option<usize> {
        let pairs = self.breakpoints.len().checked_sub(1)?;
        if pairs == 0 {
            return None;
        }
        let found = self
            .breakpoints
            .windows(2)
            .position(|w| w[0] <= query && query <= w[1]);
        Some(found.unwrap_or(pairs - 1))
    }
}

/// Map `query` from the `original` space into the `scaled` space.
///
/// Linear scan, first match wins. When `scaled` has no pair at the selected
/// index the segment is treated as unscaled from `scaled[i]` onwards; when the
/// original segment has zero length the scaled left edge is returned.
pub fn transform(original: &CoordinateSpace, scaled: &CoordinateSpace, query: f64) -> f64 {
    let Some(i) = original.segment_index(query) else {
        return query;
    };
    let left = original.breakpoints[i];
    let right = original.breakpoints[i + 1];

    let (n_left, n_right) = match scaled.breakpoints.get(i..i + 2) {
        Some(pair) => (pair[0], pair[1]),
        None => match scaled.breakpoints.get(i) {
            Some(&n_left) => (n_left, query),
            None => return query,
        },
    };

    let o_range = right - left;
    if o_range == 0.0 {
        return n_left;
    }
    (query - left) * (n_right - n_left) / o_range + n_left
}

/// Compress inter-exon gaps by `scaling_factor`, keeping every exon's length.
///
/// A factor of zero is rejected: the input is returned unchanged and a warning
/// is logged.
pub fn scale_introns(exons: &[ExonSpan], scaling_factor: f64) -> Vec<ExonSpan> {
    if scaling_factor == 0.0 {
        log::warn!("Intron scaling factor of 0 not allowed. Plotting without scaling.");
        return exons.to_vec();
    }

    let mut scaled: Vec<ExonSpan> = Vec::with_capacity(exons.len());
    let mut previous: Option<(&ExonSpan, ExonSpan)> = None;
    for exon in exons {
        let next = match previous {
            None => *exon,
            Some((prev_orig, prev_scaled)) => {
                let intron = (exon.start - prev_orig.stop) / scaling_factor;
                let start = prev_scaled.stop + intron;
                ExonSpan::new(start, start + exon.length())
            }
        };
        scaled.push(next);
        previous = Some((exon, next));
    }

    log::debug!("Scaled {} exons by intron factor {}", scaled.len(), scaling_factor);
    scaled
}

/// Carry junction endpoints from the original exon space into the scaled one.
/// Counts are untouched.
pub fn scale_junctions(
    original: &[ExonSpan],
    scaled: &[ExonSpan],
    junctions: &[Junction],
) -> Vec<Junction> {
    let from = CoordinateSpace::from_exons(original);
    let to = CoordinateSpace::from_exons(scaled);
    junctions
        .iter()
        .map(|j| Junction {
            start: transform(&from, &to, j.start),
            stop: transform(&from, &to, j.stop),
            count: j.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(pairs: &[(f64, f64)]) -> Vec<ExonSpan> {
        pairs.iter().map(|&(s, e)| ExonSpan::new(s, e)).collect()
    }

    #[test]
    fn test_transform_documented_example() {
        let original = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0), (20.0, 30.0)]));
        let scaled = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0), (15.0, 25.0)]));
        assert_eq!(transform(&original, &scaled, 25.0), 20.0);
    }

    #[test]
    fn test_transform_identity() {
        let exons = spans(&[(100.0, 150.0), (300.0, 350.0), (500.0, 620.0)]);
        let space = CoordinateSpace::from_exons(&exons);
        for q in [100.0, 120.5, 150.0, 200.0, 300.0, 333.0, 350.0, 410.0, 500.0, 620.0] {
            assert!((transform(&space, &space, q) - q).abs() < 1e-9, "query {}", q);
        }
    }

    #[test]
    fn test_transform_intron_midpoint() {
        let original = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0), (110.0, 120.0)]));
        let scaled = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0), (20.0, 30.0)]));
        assert_eq!(transform(&original, &scaled, 60.0), 15.0);
    }

    #[test]
    fn test_transform_shared_boundary_takes_first_segment() {
        // Zero-length intron: 10 is the stop of exon 0 and the start of exon 1.
        let original = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0), (10.0, 20.0)]));
        let scaled = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0), (50.0, 60.0)]));
        // First pair [0, 10] matches, so the point stays at the end of exon 0.
        assert_eq!(transform(&original, &scaled, 10.0), 10.0);
    }

    #[test]
    fn test_transform_degenerate_segment_returns_left_edge() {
        let original = CoordinateSpace::from_exons(&spans(&[(5.0, 5.0)]));
        let scaled = CoordinateSpace::from_exons(&spans(&[(7.0, 7.0)]));
        assert_eq!(transform(&original, &scaled, 5.0), 7.0);
    }

    #[test]
    fn test_transform_short_scaled_space_is_unscaled() {
        let original = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0), (20.0, 30.0)]));
        let scaled = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0)]));
        // Segment [10, 20] has no scaled pair; n_left = scaled[1], n_right = query.
        let q = 14.0;
        let expected = (q - 10.0) * (q - 10.0) / 10.0 + 10.0;
        assert!((transform(&original, &scaled, q) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_transform_beyond_end_extrapolates_last_segment() {
        let original = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0), (20.0, 30.0)]));
        let scaled = CoordinateSpace::from_exons(&spans(&[(0.0, 10.0), (15.0, 25.0)]));
        assert_eq!(transform(&original, &scaled, 40.0), 35.0);
    }

    #[test]
    fn test_transform_empty_space_is_identity() {
        let empty = CoordinateSpace::from_exons(&[]);
        assert_eq!(transform(&empty, &empty, 42.0), 42.0);
    }

    #[test]
    fn test_scale_introns_example() {
        let scaled = scale_introns(&spans(&[(100.0, 150.0), (300.0, 350.0)]), 2.0);
        assert_eq!(scaled, spans(&[(100.0, 150.0), (225.0, 275.0)]));
    }

    #[test]
    fn test_scale_introns_preserves_lengths() {
        let exons = spans(&[(100.0, 150.0), (300.0, 350.0), (1000.0, 1003.0), (1500.0, 1800.0)]);
        let scaled = scale_introns(&exons, 7.5);
        assert_eq!(scaled.len(), exons.len());
        for (a, b) in exons.iter().zip(&scaled) {
            assert!((a.length() - b.length()).abs() < 1e-9);
        }
        for w in scaled.windows(2) {
            assert!(w[0].stop <= w[1].start);
        }
    }

    #[test]
    fn test_scale_introns_unit_factor_is_identity() {
        let exons = spans(&[(100.0, 150.0), (300.0, 350.0), (900.0, 950.0)]);
        assert_eq!(scale_introns(&exons, 1.0), exons);
    }

    #[test]
    fn test_scale_introns_zero_factor_is_rejected() {
        let exons = spans(&[(100.0, 150.0), (300.0, 350.0)]);
        assert_eq!(scale_introns(&exons, 0.0), exons);
    }

    #[test]
    fn test_scale_junctions_roundtrip() {
        let exons = spans(&[(100.0, 150.0), (300.0, 350.0), (900.0, 950.0)]);
        let scaled = scale_introns(&exons, 4.0);
        let junctions = vec![
            Junction::new(150.0, 300.0, 12),
            Junction::new(120.0, 925.0, 3),
            Junction::new(200.0, 700.0, 0),
        ];
        let forward = scale_junctions(&exons, &scaled, &junctions);
        let back = scale_junctions(&scaled, &exons, &forward);
        for (orig, round) in junctions.iter().zip(&back) {
            assert!((orig.start - round.start).abs() < 1e-9);
            assert!((orig.stop - round.stop).abs() < 1e-9);
            assert_eq!(orig.count, round.count);
        }
    }

    #[test]
    fn test_scale_junctions_lands_on_scaled_exon_edges() {
        let exons = spans(&[(100.0, 150.0), (300.0, 350.0)]);
        let scaled = scale_introns(&exons, 2.0);
        let mapped = scale_junctions(&exons, &scaled, &[Junction::new(150.0, 300.0, 5)]);
        assert_eq!(mapped[0].start, 150.0);
        assert_eq!(mapped[0].stop, 225.0);
        assert_eq!(mapped[0].count, 5);
    }
}
