use std::path::PathBuf;
use thiserror::Error;

/// Configuration problems caught before any rendering starts.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("negative render count {count} for split {split}")]
    NegativeCount { split: String, count: i64 },

    #[error("no subjects to render but {requested} renders per subject requested")]
    NoSubjects { requested: u64 },

    #[error("{total} renders do not fit in {width}-digit file names")]
    IndexOverflow { total: u64, width: usize },
}

/// Failures surfaced by the render host while a run is in flight.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("scene object not found: {0}")]
    MissingObject(String),

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
