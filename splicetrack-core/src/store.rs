//! Coordinate store: per-sample exon, coverage and junction lookups.
//!
//! A sample database is an SQLite file with three tables:
//!
//! ```text
//! coverage(gene, transcript, chromosome, start, stop, strand, coverage)   -- one row per exon
//! canonical(chromosome, start, stop, strand, counts)
//! circle(chromosome, start, stop, strand, counts)
//! ```
//!
//! Every lookup opens its own read-only connection and drops it before
//! returning, so no connection outlives a single query.

use indexmap::IndexMap;
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::types::{ExonSpan, GenomicPos, Junction, JunctionKind, Strand, TranscriptModel};

/// Query contract the plotting pipeline needs from a sample database.
pub trait CoordinateStore {
    /// Exon structure of `transcript`, exons sorted by `(start, stop)`.
    fn exons(&self, transcript: &str) -> StoreResult<TranscriptModel>;

    /// Coverage values for `transcript` in storage order.
    fn coverage(&self, transcript: &str) -> StoreResult<Vec<f64>>;

    /// Junctions of one kind with `start >= start` and `stop <= stop` on the
    /// given chromosome and strand.
    fn junctions(
        &self,
        kind: JunctionKind,
        chromosome: &str,
        start: GenomicPos,
        stop: GenomicPos,
        strand: Strand,
    ) -> StoreResult<Vec<Junction>>;

    /// Transcript of `gene` with the largest summed exonic length. Ties keep
    /// the transcript encountered first.
    fn longest_transcript(&self, gene: &str) -> StoreResult<String>;
}

/// Collapse `(chromosome, start, stop, strand)` exon rows into a model.
fn build_transcript_model(
    transcript: &str,
    rows: Vec<(String, GenomicPos, GenomicPos, String)>,
) -> StoreResult<TranscriptModel> {
    let Some((chromosome, _, _, strand)) = rows.first().cloned() else {
        return Err(StoreError::TranscriptNotFound {
            transcript: transcript.to_string(),
        });
    };

    if rows.iter().any(|(c, ..)| *c != chromosome) {
        return Err(StoreError::MultipleChromosomes {
            transcript: transcript.to_string(),
            chromosomes: rows.into_iter().map(|(c, ..)| c).collect(),
        });
    }

    let mut bounds: Vec<(GenomicPos, GenomicPos)> = rows.iter().map(|&(_, s, e, _)| (s, e)).collect();
    bounds.sort_unstable();

    Ok(TranscriptModel {
        transcript: transcript.to_string(),
        chromosome,
        strand: strand.chars().next().map(Strand::from).unwrap_or(Strand::Unstranded),
        exons: bounds
            .into_iter()
            .map(|(s, e)| ExonSpan::from_genomic(s, e))
            .collect(),
    })
}

/// Pick the transcript with the greatest summed `1 + stop - start`.
fn pick_longest(gene: &str, rows: Vec<(String, GenomicPos, GenomicPos)>) -> StoreResult<String> {
    let mut lengths: IndexMap<String, GenomicPos> = IndexMap::new();
    for (transcript, start, stop) in rows {
        *lengths.entry(transcript).or_insert(0) += 1 + (stop - start);
    }

    let mut longest: Option<(&String, GenomicPos)> = None;
    for (transcript, &length) in &lengths {
        if longest.map_or(true, |(_, best)| length > best) {
            longest = Some((transcript, length));
        }
    }

    match longest {
        Some((transcript, length)) => {
            log::info!("Longest transcript of {}: {} ({} bp)", gene, transcript, length);
            Ok(transcript.clone())
        }
        None => Err(StoreError::GeneNotFound {
            gene: gene.to_string(),
        }),
    }
}

/// SQLite-backed sample database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Point at an existing database file. The file is not opened until the
    /// first query.
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(StoreError::DatabaseNotFound { path });
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display name of the sample: file name up to the first `.`, upper-cased.
    pub fn sample_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
            .split('.')
            .next()
            .unwrap_or_default()
            .to_uppercase()
    }

    fn connect(&self) -> StoreResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Ok(Connection::open_with_flags(&self.path, flags)?)
    }
}

impl CoordinateStore for SqliteStore {
    fn exons(&self, transcript: &str) -> StoreResult<TranscriptModel> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT chromosome, start, stop, strand FROM coverage WHERE transcript = ?1")?;
        let rows = stmt
            .query_map(params![transcript], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("{}: {} exon rows for {}", self.path.display(), rows.len(), transcript);
        build_transcript_model(transcript, rows)
    }

    fn coverage(&self, transcript: &str) -> StoreResult<Vec<f64>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT coverage FROM coverage WHERE transcript = ?1")?;
        let values = stmt
            .query_map(params![transcript], |row| row.get::<_, f64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    fn junctions(
        &self,
        kind: JunctionKind,
        chromosome: &str,
        start: GenomicPos,
        stop: GenomicPos,
        strand: Strand,
    ) -> StoreResult<Vec<Junction>> {
        let conn = self.connect()?;
        let query = format!(
            "SELECT start, stop, counts FROM {} \
             WHERE chromosome = ?1 AND start >= ?2 AND stop <= ?3 AND strand = ?4",
            kind.table_name()
        );
        let mut stmt = conn.prepare(&query)?;
        let junctions = stmt
            .query_map(params![chromosome, start, stop, strand.as_str()], |row| {
                let start: GenomicPos = row.get(0)?;
                let stop: GenomicPos = row.get(1)?;
                let counts: i64 = row.get(2)?;
                Ok(Junction::new(
                    start as f64,
                    stop as f64,
                    counts.clamp(0, u32::MAX as i64) as u32,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "{}: {} {} junctions in {}:{}-{}",
            self.path.display(),
            junctions.len(),
            kind.table_name(),
            chromosome,
            start,
            stop
        );
        Ok(junctions)
    }

    fn longest_transcript(&self, gene: &str) -> StoreResult<String> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT transcript, start, stop FROM coverage WHERE gene = ?1")?;
        let rows = stmt
            .query_map(params![gene], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        pick_longest(gene, rows)
    }
}

/// One exon row of an in-memory store.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct ExonRow {
    pub gene: String,
    pub transcript: String,
    pub chromosome: String,
    pub start: GenomicPos,
    pub stop: GenomicPos,
    pub strand: Strand,
    pub coverage: f64,
}

/// One junction row of an in-memory store.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionRow {
    pub kind: JunctionKind,
    pub chromosome: String,
    pub start: GenomicPos,
    pub stop: GenomicPos,
    pub strand: Strand,
    pub counts: u32,
}

/// In-memory store with the same filtering rules as [`SqliteStore`].
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub exons: Vec<ExonRow>,
    pub junctions: Vec<JunctionRow>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_exon(&mut self, row: ExonRow) -> &mut Self {
        self.exons.push(row);
        self
    }

    pub fn add_junction(&mut self, row: JunctionRow) -> &mut Self {
        self.junctions.push(row);
        self
    }
}

#[cfg(test)]
impl CoordinateStore for MemoryStore {
    fn exons(&self, transcript: &str) -> StoreResult<TranscriptModel> {
        let rows = self
            .exons
            .iter()
            .filter(|r| r.transcript == transcript)
            .map(|r| (r.chromosome.clone(), r.start, r.stop, r.strand.as_str().to_string()))
            .collect();
        build_transcript_model(transcript, rows)
    }

    fn coverage(&self, transcript: &str) -> StoreResult<Vec<f64>> {
        Ok(self
            .exons
            .iter()
            .filter(|r| r.transcript == transcript)
            .map(|r| r.coverage)
            .collect())
    }

    fn junctions(
        &self,
        kind: JunctionKind,
        chromosome: &str,
        start: GenomicPos,
        stop: GenomicPos,
        strand: Strand,
    ) -> StoreResult<Vec<Junction>> {
        Ok(self
            .junctions
            .iter()
            .filter(|r| {
                r.kind == kind
                    && r.chromosome == chromosome
                    && r.start >= start
                    && r.stop <= stop
                    && r.strand == strand
            })
            .map(|r| Junction::new(r.start as f64, r.stop as f64, r.counts))
            .collect())
    }

    fn longest_transcript(&self, gene: &str) -> StoreResult<String> {
        let rows = self
            .exons
            .iter()
            .filter(|r| r.gene == gene)
            .map(|r| (r.transcript.clone(), r.start, r.stop))
            .collect();
        pick_longest(gene, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exon(gene: &str, transcript: &str, chrom: &str, start: GenomicPos, stop: GenomicPos) -> ExonRow {
        ExonRow {
            gene: gene.into(),
            transcript: transcript.into(),
            chromosome: chrom.into(),
            start,
            stop,
            strand: Strand::Forward,
            coverage: 1.0,
        }
    }

    #[test]
    fn test_longest_transcript_by_exonic_length() {
        let mut store = MemoryStore::new();
        // T1: 500 bp, T2: 800 bp
        store
            .add_exon(exon("EGFR", "T1", "chr7", 1, 250))
            .add_exon(exon("EGFR", "T1", "chr7", 1001, 1250))
            .add_exon(exon("EGFR", "T2", "chr7", 1, 400))
            .add_exon(exon("EGFR", "T2", "chr7", 2001, 2400));
        assert_eq!(store.longest_transcript("EGFR").unwrap(), "T2");
    }

    #[test]
    fn test_longest_transcript_tie_keeps_first() {
        let mut store = MemoryStore::new();
        store
            .add_exon(exon("G", "B", "chr1", 1, 100))
            .add_exon(exon("G", "A", "chr1", 1, 100));
        assert_eq!(store.longest_transcript("G").unwrap(), "B");
    }

    #[test]
    fn test_unknown_gene() {
        let store = MemoryStore::new();
        assert!(matches!(store.longest_transcript("NOPE"), Err(StoreError::GeneNotFound { .. })));
    }

    #[test]
    fn test_exons_sorted_and_validated() {
        let mut store = MemoryStore::new();
        store
            .add_exon(exon("G", "T", "chr1", 300, 350))
            .add_exon(exon("G", "T", "chr1", 100, 150));
        let model = store.exons("T").unwrap();
        assert_eq!(model.chromosome, "chr1");
        assert_eq!(model.exons[0], ExonSpan::new(100.0, 150.0));
        assert_eq!(model.exons[1], ExonSpan::new(300.0, 350.0));

        assert!(matches!(store.exons("MISSING"), Err(StoreError::TranscriptNotFound { .. })));
    }

    #[test]
    fn test_split_chromosome_transcript_is_rejected() {
        let mut store = MemoryStore::new();
        store
            .add_exon(exon("G", "T", "chr1", 100, 150))
            .add_exon(exon("G", "T", "chr2", 300, 350));
        match store.exons("T") {
            Err(StoreError::MultipleChromosomes { chromosomes, .. }) => {
                assert_eq!(chromosomes, vec!["chr1".to_string(), "chr2".to_string()]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_memory_junction_range_filter_is_inclusive() {
        let mut store = MemoryStore::new();
        for (start, stop) in [(100, 300), (99, 300), (100, 301), (150, 200)] {
            store.add_junction(JunctionRow {
                kind: JunctionKind::Canonical,
                chromosome: "chr1".into(),
                start,
                stop,
                strand: Strand::Forward,
                counts: 2,
            });
        }
        let found = store
            .junctions(JunctionKind::Canonical, "chr1", 100, 300, Strand::Forward)
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(store
            .junctions(JunctionKind::Backsplice, "chr1", 100, 300, Strand::Forward)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_sqlite_store_requires_existing_file() {
        let missing = SqliteStore::new("/definitely/not/here.db");
        assert!(matches!(missing, Err(StoreError::DatabaseNotFound { .. })));
    }
}
