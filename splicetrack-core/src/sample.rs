//! Per-sample aggregation.
//!
//! Fetches junctions and coverage from every sample store, brings them into
//! the plotting coordinate space and assigns coverage colors. The result is an
//! ordered `Vec<Sample>` handed to the figure composer.

use crate::color::{coverage_colors, max_coverage, Rgb};
use crate::coords::scale_junctions;
use crate::error::StoreResult;
use crate::store::CoordinateStore;
use crate::types::{ExonSpan, Junction, JunctionKind, Sample, Strand, TranscriptModel};

/// Options controlling how raw store data becomes plottable samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleOptions {
    /// Base exon color; coverage becomes its alpha.
    pub color: Rgb,
    /// Share one coverage maximum across all samples.
    pub normalize: bool,
    /// Integer divisor for canonical read counts. `None` or `Some(0)` keeps counts.
    pub reduce_canonical: Option<u32>,
    /// Integer divisor for backsplice read counts.
    pub reduce_backsplice: Option<u32>,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            color: Rgb::RED,
            normalize: false,
            reduce_canonical: None,
            reduce_backsplice: None,
        }
    }
}

/// Store-level data for one sample before colors are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub name: String,
    pub canonical: Vec<Junction>,
    pub backsplice: Vec<Junction>,
    pub coverage: Vec<f64>,
}

/// Fetch one sample's junctions and coverage for `model`.
///
/// Junctions are looked up over the transcript's full extent, remapped into
/// `scaled` space when given, then count-reduced. Coverage is reversed for
/// minus-strand transcripts.
pub fn load_sample<S: CoordinateStore + ?Sized>(
    name: &str,
    store: &S,
    model: &TranscriptModel,
    scaled: Option<&[ExonSpan]>,
    options: &SampleOptions,
) -> StoreResult<RawSample> {
    let start = model.start() as i64;
    let stop = model.stop() as i64;

    let fetch = |kind: JunctionKind| {
        store.junctions(kind, &model.chromosome, start, stop, model.strand)
    };
    let mut canonical = fetch(JunctionKind::Canonical)?;
    let mut backsplice = fetch(JunctionKind::Backsplice)?;

    let mut coverage = store.coverage(&model.transcript)?;
    if model.strand == Strand::Reverse {
        coverage.reverse();
    }

    if let Some(scaled) = scaled {
        canonical = scale_junctions(&model.exons, scaled, &canonical);
        backsplice = scale_junctions(&model.exons, scaled, &backsplice);
    }

    if let Some(divisor) = options.reduce_canonical {
        canonical = canonical.iter().map(|j| j.reduced(divisor)).collect();
    }
    if let Some(divisor) = options.reduce_backsplice {
        backsplice = backsplice.iter().map(|j| j.reduced(divisor)).collect();
    }

    log::info!(
        "Sample {}: {} canonical, {} backsplice junctions, {} coverage values",
        name,
        canonical.len(),
        backsplice.len(),
        coverage.len()
    );

    Ok(RawSample {
        name: name.to_string(),
        canonical,
        backsplice,
        coverage,
    })
}

/// Attach coverage colors. With `normalize` every sample shares the global
/// coverage maximum, otherwise each sample uses its own.
pub fn assign_colors(raw: Vec<RawSample>, options: &SampleOptions) -> Vec<Sample> {
    let global_max = raw
        .iter()
        .map(|s| max_coverage(&s.coverage))
        .fold(0.0, f64::max);

    raw.into_iter()
        .map(|s| {
            let max = if options.normalize {
                global_max
            } else {
                max_coverage(&s.coverage)
            };
            let colors = coverage_colors(options.color, &s.coverage, max);
            Sample {
                name: s.name,
                canonical: s.canonical,
                backsplice: s.backsplice,
                coverage: s.coverage,
                colors,
            }
        })
        .collect()
}

/// Load every `(name, store)` pair in order and color the result.
pub fn build_samples<S: CoordinateStore>(
    sources: &[(String, S)],
    model: &TranscriptModel,
    scaled: Option<&[ExonSpan]>,
    options: &SampleOptions,
) -> StoreResult<Vec<Sample>> {
    let raw = sources
        .iter()
        .map(|(name, store)| load_sample(name, store, model, scaled, options))
        .collect::<StoreResult<Vec<_>>>()?;
    Ok(assign_colors(raw, options))
}
