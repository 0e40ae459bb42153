use std::{io, path::Path};

use thiserror::Error;

/// Failures of the collaborator that holds the expense sheet.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("not authorised to access {0}")]
    Unauthorized(String),
    #[error("could not reach {location}: {reason}")]
    Transport { location: String, reason: String },
    #[error("malformed sheet data: {0}")]
    Csv(#[from] csv::Error),
}

impl SourceError {
    pub fn from_io(location: &Path, error: io::Error) -> Self {
        let location = location.display().to_string();
        match error.kind() {
            io::ErrorKind::PermissionDenied => SourceError::Unauthorized(location),
            _ => SourceError::Transport {
                location,
                reason: error.to_string(),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("invalid expense: {0}")]
    InvalidExpense(String),
    #[error("failed to write output: {0}")]
    Output(String),
}
