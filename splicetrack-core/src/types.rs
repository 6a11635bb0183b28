use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Integer genomic coordinate as stored in a sample database.
pub type GenomicPos = i64;

/// A single exon interval. Original coordinates are integral, intron-scaled
/// coordinates are fractional, so both spaces share the `f64` representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExonSpan {
    pub start: f64,
    pub stop: f64,
}

impl ExonSpan {
    pub fn new(start: f64, stop: f64) -> Self {
        Self { start, stop }
    }

    pub fn from_genomic(start: GenomicPos, stop: GenomicPos) -> Self {
        Self {
            start: start as f64,
            stop: stop as f64,
        }
    }

    /// Drawn width of the exon (`stop - start`).
    pub fn length(&self) -> f64 {
        self.stop - self.start
    }

    /// Number of bases covered by the closed interval `[start, stop]`.
    /// Rounded, since intron-scaled bounds carry float error.
    pub fn base_count(&self) -> usize {
        (self.length().round() + 1.0).max(0.0) as usize
    }
}

/// Which junction table a junction came from. Both share a shape but are
/// rendered on opposite sides of the exon track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JunctionKind {
    Canonical,
    Backsplice,
}

impl JunctionKind {
    /// Name of the backing table in a sample database.
    pub fn table_name(&self) -> &'static str {
        match self {
            JunctionKind::Canonical => "canonical",
            JunctionKind::Backsplice => "circle",
        }
    }
}

/// A splice event between two coordinates supported by `count` reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub start: f64,
    pub stop: f64,
    pub count: u32,
}

impl Junction {
    pub fn new(start: f64, stop: f64, count: u32) -> Self {
        Self { start, stop, count }
    }

    /// Integer-divide the read support, as used to thin out dense plots.
    /// A divisor of zero leaves the count untouched.
    pub fn reduced(&self, divisor: u32) -> Self {
        if divisor == 0 {
            return *self;
        }
        Self {
            count: self.count / divisor,
            ..*self
        }
    }

    pub fn span(&self) -> f64 {
        self.stop - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
    /// `.` or any other non-`+`/`-` value in the database.
    Unstranded,
}

impl From<char> for Strand {
    fn from(c: char) -> Self {
        match c {
            '+' => Strand::Forward,
            '-' => Strand::Reverse,
            _ => Strand::Unstranded,
        }
    }
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unstranded => '.',
        }
    }
}

impl Strand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unstranded => ".",
        }
    }
}

/// Exon structure of one transcript as fetched from the coordinate store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptModel {
    pub transcript: String,
    pub chromosome: String,
    pub strand: Strand,
    /// Sorted ascending by start.
    pub exons: Vec<ExonSpan>,
}

impl TranscriptModel {
    pub fn start(&self) -> f64 {
        self.exons.iter().map(|e| e.start).fold(f64::INFINITY, f64::min)
    }

    pub fn stop(&self) -> f64 {
        self.exons.iter().map(|e| e.stop).fold(f64::NEG_INFINITY, f64::max)
    }

    /// Summed `stop - start + 1` over all exons.
    pub fn exonic_length(&self) -> usize {
        self.exons.iter().map(ExonSpan::base_count).sum()
    }
}

/// Everything needed to draw one sub-plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub canonical: Vec<Junction>,
    pub backsplice: Vec<Junction>,
    pub coverage: Vec<f64>,
    pub colors: Vec<Rgba>,
}
