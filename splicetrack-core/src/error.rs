use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a sample database.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database: {} was not found", path.display())]
    DatabaseNotFound { path: PathBuf },

    #[error("Transcript not found: {transcript}")]
    TranscriptNotFound { transcript: String },

    #[error("No transcripts found for gene: {gene}")]
    GeneNotFound { gene: String },

    #[error("{transcript} found on more than one chromosome:\n{}", chromosomes.join("\n"))]
    MultipleChromosomes {
        transcript: String,
        chromosomes: Vec<String>,
    },

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
