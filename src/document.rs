use std::path::PathBuf;

/// Text pulled out of one matched file.
///
/// A file that could not be read keeps its slot with empty `contents`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: PathBuf,
    pub contents: String,
}

impl Document {
    pub fn new(filename: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Document {
            filename: filename.into(),
            contents: contents.into(),
        }
    }

    pub fn placeholder(filename: impl Into<PathBuf>) -> Self {
        Document::new(filename, String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
