// Error handling for ASD processing

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AsdError>;

#[derive(Error, Debug)]
pub enum AsdError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error(
        "No input files found in {} (start index {start_index}, count {file_count})",
        .directory.display()
    )]
    NoInputFiles {
        directory: PathBuf,
        start_index: u32,
        file_count: u32,
    },

    #[error("Header too short in {}: expected {expected} bytes, got {got}", .path.display())]
    HeaderTooShort {
        path: PathBuf,
        expected: usize,
        got: usize,
    },

    #[error("Corrupted data in {}: expected {expected} bytes of band data, got {got}", .path.display())]
    CorruptedData {
        path: PathBuf,
        expected: usize,
        got: usize,
    },

    #[error("Band {band} out of range for a vector of {len} values")]
    BandOutOfRange { band: usize, len: usize },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl AsdError {
    /// Missing directories and empty sets; the caller reports these and
    /// carries on rather than treating them as bugs.
    pub fn is_not_found(&self) -> bool {
        match self {
            AsdError::DirectoryNotFound(_) | AsdError::NoInputFiles { .. } => true,
            AsdError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
