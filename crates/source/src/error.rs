use cardwright_types::EntryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading entries: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid JSON on line {line}: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Entry {index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: EntryError,
    },

    #[error("Expected a JSON array of entries or an object with an 'entries' array")]
    UnexpectedShape,
}
