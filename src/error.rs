//! Domain errors for dex-subset
//!
//! Everything here is fatal: the CLI reports the error once and exits with
//! status 1. Each variant is raised before the destination file is touched.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DexError {
    /// An input file (names list, source dex, explicit config) does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Reading or writing a file failed for a reason other than absence
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source dex is not a JSON array of objects
    #[error("invalid JSON in {}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record lacks a string `name`, or its `forms` is not an array
    #[error("entry #{index} in {} has no string \"name\" field or a non-array \"forms\"", path.display())]
    InvalidRecord { path: PathBuf, index: usize },

    /// A form is not an object with a string `name` and an optional string `spriteSuffix`
    #[error("form #{index} of {record} in {} must be an object with a string \"name\" and an optional string \"spriteSuffix\"", path.display())]
    InvalidForm {
        path: PathBuf,
        record: String,
        index: usize,
    },

    /// Requested names that are absent from the source dex
    #[error("not found in source dex: {}", .0.join(", "))]
    MissingNames(Vec<String>),

    /// Every form of a record was filtered out
    #[error("no forms selected for {name}")]
    NoFormsSelected { name: String },

    /// The user refused to replace an existing destination file
    #[error("{} already exists and was not overwritten", path.display())]
    OverwriteDeclined { path: PathBuf },
}

impl DexError {
    /// Map an I/O failure on `path`, singling out missing files
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            DexError::NotFound { path }
        } else {
            DexError::Io { path, source }
        }
    }
}
