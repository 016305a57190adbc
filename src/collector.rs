use crate::config::Config;
use crate::document::Document;
use crate::error::{Result, ZipfError};
use epub::doc::EpubDoc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// wide enough that html2text never splits a word across lines
const HTML_WRAP_WIDTH: usize = 1000;

/// Expand `<files-path>/<file-pattern>` and read every match, in glob order.
///
/// A malformed pattern or an empty match set is an error. A file that fails
/// to read is logged and kept as an empty placeholder.
pub fn collect_files(config: &Config) -> Result<Vec<Document>> {
    let pattern = config.search_pattern();
    info!("Looking for files with: {}", pattern);

    let paths = glob_paths(&pattern)?;
    info!("Reading in files: {:?}", paths);
    if paths.is_empty() {
        return Err(ZipfError::NoFilesFound { pattern });
    }

    let documents = paths
        .into_iter()
        .map(|path| match process_file(&path) {
            Ok(document) => document,
            Err(e) => {
                warn!("There was an error reading {}. Moving on. ({})", path.display(), e);
                Document::placeholder(path)
            }
        })
        .collect::<Vec<Document>>();
    info!("Read {} files", documents.len());
    Ok(documents)
}

fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|source| ZipfError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => warn!("Skipping unreadable glob entry {}: {}", e.path().display(), e.error()),
        }
    }
    Ok(paths)
}

fn process_file(path: &Path) -> Result<Document> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    debug!("extracting {} as {:?}", path.display(), extension);
    match extension.as_str() {
        "pdf" => process_pdf(path),
        "epub" => process_epub(path),
        "html" | "htm" => process_html(path),
        _ => process_txt(path),
    }
}

fn extract_error(path: &Path, e: impl std::fmt::Display) -> ZipfError {
    ZipfError::Extract {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn process_pdf(path: &Path) -> Result<Document> {
    let text = pdf_extract::extract_text(path).map_err(|e| extract_error(path, e))?;
    Ok(Document::new(path, text))
}

fn process_epub(path: &Path) -> Result<Document> {
    let mut doc = EpubDoc::new(path).map_err(|e| extract_error(path, e))?;
    let mut content = String::new();
    loop {
        if let Some((chapter, _)) = doc.get_current_str() {
            content.push_str(&chapter);
        }
        if !doc.go_next() {
            break;
        }
    }
    Ok(Document::new(path, content))
}

fn process_html(path: &Path) -> Result<Document> {
    let raw_contents = fs::read(path).map_err(|e| extract_error(path, e))?;
    let text = html2text::from_read(raw_contents.as_slice(), HTML_WRAP_WIDTH);
    Ok(Document::new(path, text))
}

fn process_txt(path: &Path) -> Result<Document> {
    let raw_contents = fs::read(path).map_err(|e| extract_error(path, e))?;
    Ok(Document::new(
        path,
        String::from_utf8_lossy(&raw_contents).into_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_for(dir: &Path, pattern: &str) -> Config {
        Config {
            files_path: dir.to_path_buf(),
            file_pattern: pattern.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn reads_matches_in_glob_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "second").unwrap();
        fs::write(dir.path().join("a.txt"), "first").unwrap();
        fs::write(dir.path().join("c.md"), "ignored").unwrap();

        let documents = collect_files(&config_for(dir.path(), "*.txt")).unwrap();
        let contents: Vec<&str> = documents.iter().map(|d| d.contents.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn no_matches_is_distinguished() {
        let dir = tempdir().unwrap();
        let err = collect_files(&config_for(dir.path(), "*.txt")).unwrap_err();
        assert!(matches!(err, ZipfError::NoFilesFound { .. }));
    }

    #[test]
    fn malformed_pattern_is_rejected() {
        let dir = tempdir().unwrap();
        let err = collect_files(&config_for(dir.path(), "[*.txt")).unwrap_err();
        assert!(matches!(err, ZipfError::Pattern { .. }));
    }

    #[test]
    fn unreadable_match_leaves_empty_placeholder() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "words here").unwrap();
        fs::create_dir(dir.path().join("b.txt")).unwrap();

        let documents = collect_files(&config_for(dir.path(), "*.txt")).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].contents, "words here");
        assert!(documents[1].is_empty());
        assert_eq!(documents[1].filename, dir.path().join("b.txt"));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"caf\xff ok").unwrap();

        let documents = collect_files(&config_for(dir.path(), "*.txt")).unwrap();
        assert_eq!(documents[0].contents, "caf\u{fffd} ok");
    }

    #[test]
    fn html_is_converted_to_text() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("page.html"),
            "<html><body><p>Hello <b>world</b></p></body></html>",
        )
        .unwrap();

        let documents = collect_files(&config_for(dir.path(), "*.html")).unwrap();
        assert!(documents[0].contents.contains("Hello"));
        assert!(documents[0].contents.contains("world"));
        assert!(!documents[0].contents.contains("<p>"));
    }
}
