//! Error types for reading and cleaning tables

use thiserror::Error;

/// Errors raised by the table source and the cleaning pipeline
#[derive(Debug, Error)]
pub enum CleanError {
    /// The input could not be read as a table (unsupported or corrupt)
    #[error("cannot read {source_name}: {message}")]
    SourceFormat {
        source_name: String,
        message: String,
    },

    /// A pipeline stage met a condition it cannot handle
    #[error("cleaning failed for {table}: {message}")]
    UnhandledCleaning { table: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CleanError {
    pub fn source_format(source_name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CleanError::SourceFormat {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    pub fn unhandled(table: impl Into<String>, message: impl Into<String>) -> Self {
        CleanError::UnhandledCleaning {
            table: table.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_input() {
        let err = CleanError::unhandled("sales.csv", "row 3 has 2 cells, expected 4");
        assert_eq!(
            err.to_string(),
            "cleaning failed for sales.csv: row 3 has 2 cells, expected 4"
        );

        let err = CleanError::source_format("notes.pdf", "unsupported file format: pdf");
        assert_eq!(err.to_string(), "cannot read notes.pdf: unsupported file format: pdf");
    }
}
