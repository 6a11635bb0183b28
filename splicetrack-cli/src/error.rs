//! Error handling for the SpliceTrack CLI

use std::path::PathBuf;
use thiserror::Error;

use splicetrack_core::StoreError;

/// Errors raised before any output is written
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Please specify a gene (-g) or transcript (-t)")]
    MissingSelector,

    #[error("Database: {} was not found", path.display())]
    DatabaseNotFound { path: PathBuf },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn database_not_found(path: PathBuf) -> Self {
        Self::DatabaseNotFound { path }
    }
}


/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::DatabaseNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the database path is correct: {}\n\
                 • Ensure you have read permissions for the file",
                path.display()
            ));
        }

        CliError::MissingSelector => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Use -t <TRANSCRIPT_ID> to plot a specific transcript\n\
                 • Use -g <GENE> to plot the gene's longest transcript",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your splicetrack.toml configuration file\n\
                 • Use 'splicetrack --print-config' to generate a sample configuration",
            );
        }

        CliError::Store(StoreError::GeneNotFound { .. })
        | CliError::Store(StoreError::TranscriptNotFound { .. }) => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Identifiers are looked up in the first database given with -d\n\
                 • Check the spelling and version suffix of the identifier",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("bad hspace");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: bad hspace");
    }

    #[test]
    fn test_database_not_found_message() {
        let err = CliError::database_not_found(PathBuf::from("ctrl.db"));
        assert_eq!(err.to_string(), "Database: ctrl.db was not found");
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("Check that the database path is correct"));
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: CliError = StoreError::TranscriptNotFound {
            transcript: "ENST0001".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            StoreError::TranscriptNotFound { transcript: "ENST0001".to_string() }.to_string()
        );
        assert!(format_error_with_suggestions(&err).contains("first database"));
    }
}
