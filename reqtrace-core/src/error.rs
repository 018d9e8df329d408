use std::path::PathBuf;
use thiserror::Error;

use crate::resolver::ResolverError;

/// Errors that can occur while extracting or exporting requirements
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to open workbook {path}: {source}")]
    WorkbookOpen {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Failed to read sheet '{sheet}': {source}")]
    SheetRead {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Text selection for {id} failed: {source}")]
    Resolution {
        id: String,
        #[source]
        source: ResolverError,
    },
}
