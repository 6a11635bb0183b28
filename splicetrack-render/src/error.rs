use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Transcript has no exons to draw")]
    EmptyTranscript,

    #[error("No samples to plot")]
    NoSamples,

    #[error("Failed to write figure: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
