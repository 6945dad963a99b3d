//! Error types shared by the alignment engine and its ingestion edge.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AlignmentError {
    /// A vote cell held a code outside the recognised set.
    #[error("Invalid vote value: {value:?}")]
    InvalidVoteValue { value: String },

    /// A required input column is missing.
    #[error("Missing required column: {column}")]
    SchemaMismatch { column: String },

    #[error("Group must name at least one member")]
    EmptyGroup,

    #[error("Duplicate vote for voter {voter} on resolution {resolution_id}")]
    DuplicateVote { resolution_id: String, voter: String },

    #[error("Vote sequences are not aligned: {left} vs {right} resolutions")]
    LengthMismatch { left: usize, right: usize },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AlignmentError>;
