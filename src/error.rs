use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ZipfError>;

/// Causes are exposed through `source()` only, so `{:#}` chains print each once.
#[derive(Debug, thiserror::Error)]
pub enum ZipfError {
    #[error("failed globbing files with {pattern}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("no files found matching {pattern}")]
    NoFilesFound { pattern: String },
    #[error("failed to extract text from {}: {message}", path.display())]
    Extract { path: PathBuf, message: String },
    #[error("nothing to chart: no words were selected")]
    EmptySelection,
    #[error("failed to render chart: {0}")]
    Chart(String),
    #[error("failed to write graph file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write results")]
    Output(#[from] io::Error),
    #[error("failed to serialize results")]
    Serialize(#[from] serde_json::Error),
}
