use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by editor operations. None of them are fatal to a session:
/// the operation that produced one is abandoned and prior state is kept.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The imported text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two keys need incompatible shapes at the same path, e.g. `a` and `a.b`.
    #[error("key `{key}` conflicts with `{conflicting}`: a path cannot hold both a value and nested keys")]
    StructuralConflict { key: String, conflicting: String },

    /// An imported document has an empty object key, which would leave an
    /// empty segment in the flattened path.
    #[error("key `{0}` has an empty path segment")]
    InvalidKey(String),

    /// The persistent store could not be read or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),

    #[error("no entry with key `{0}`")]
    UnknownKey(String),

    #[error("{path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path:?} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
