use std::path::PathBuf;
use thiserror::Error;

/// Why a profile could not be loaded. Each variant maps to a distinct message in the UI.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Please upload a .cfg or .txt file (got {0})")]
    UnsupportedFile(String),

    #[error("Failed to parse config file")]
    Unreadable(#[source] std::str::Utf8Error),

    #[error("No valid config entries found in file")]
    NoValidEntries,

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
