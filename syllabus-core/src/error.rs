use std::path::PathBuf;
use std::time::Duration;
use syllabus_scanner::ScanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Failed to write {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog crawl did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
