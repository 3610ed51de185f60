use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("IO error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output file {0} already exists")]
    OutputExists(PathBuf),

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Unknown locale '{0}', expected an ISO 3166-1 alpha-2 region code")]
    UnknownLocale(String),

    #[error("Unknown region '{0}'")]
    UnknownRegion(String),
}
