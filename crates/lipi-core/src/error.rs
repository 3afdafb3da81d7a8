use std::io;
use std::path::PathBuf;

/// Unified error type for loading the engine's data files.
///
/// Covers `mapping.json`, `dictionary.json`, and `patterns.json`. Only
/// construction can fail; a built `Transliterator` never errors at call
/// time.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("mapping file not found at {0}")]
    MissingMapping(PathBuf),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("all four mapping tables are empty")]
    EmptyMapping,

    #[error("empty key in {table} table")]
    EmptyKey { table: &'static str },

    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}
