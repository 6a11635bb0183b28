//! SpliceTrack Core Library
//!
//! Data model, intron-scaling coordinate transforms, junction curve
//! generation, coverage coloring and the sample database layer.

pub mod types;
pub mod coords;
pub mod curves;
pub mod color;
pub mod error;
pub mod store;
pub mod sample;

// Re-export commonly used types and functions
pub use types::{ExonSpan, GenomicPos, Junction, JunctionKind, Sample, Strand, TranscriptModel};
pub use coords::{scale_introns, scale_junctions, transform, CoordinateSpace};
pub use curves::{backsplice_curves, canonical_arcs, ArcCurve, BezierCurve, CurveParams, Point};
pub use color::{parse_color, Rgb, Rgba};
pub use error::{StoreError, StoreResult};
pub use store::{CoordinateStore, SqliteStore};
pub use sample::{build_samples, SampleOptions};

/// Version information for the SpliceTrack core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
