use crate::config::OutputFormat;
use crate::error::{Result, ZipfError};
use crate::rank::WordOccurrence;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub fn write_results<W: Write>(
    out: &mut W,
    words: &[WordOccurrence],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, words),
        OutputFormat::Json => write_json(out, words),
    }
}

/// One `word<TAB><TAB>count` line per entry, in ranked order.
pub fn write_text<W: Write>(out: &mut W, words: &[WordOccurrence]) -> Result<()> {
    for occurrence in words {
        writeln!(out, "{}\t\t{}", occurrence.word, occurrence.count)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, words: &[WordOccurrence]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, words)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write `bytes` to `path` the way a plain file write would land, but
/// without ever leaving a half-written image behind.
///
/// Regular files (and symlinks to them) are replaced through a temp file
/// beside the resolved target, keeping the old permissions. Devices and
/// pipes such as `/dev/stdout` are written in place.
pub fn write_graph(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |source| ZipfError::Write {
        path: path.to_path_buf(),
        source,
    };
    match fs::metadata(path) {
        Ok(meta) if !meta.is_file() => fs::write(path, bytes).map_err(write_error),
        Ok(meta) => {
            let target = fs::canonicalize(path).map_err(write_error)?;
            replace_file(&target, bytes, Some(meta.permissions())).map_err(write_error)
        }
        Err(_) => replace_file(path, bytes, new_file_permissions()).map_err(write_error),
    }
}

fn replace_file(
    target: &Path,
    bytes: &[u8],
    permissions: Option<fs::Permissions>,
) -> io::Result<()> {
    let parent_dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(bytes)?;
    if let Some(permissions) = permissions {
        temp_file.as_file().set_permissions(permissions)?;
    }
    temp_file.as_file().sync_all()?;
    temp_file.persist(target).map_err(|e| e.error)?;
    Ok(())
}

// NamedTempFile creates owner-only files; a fresh graph gets the usual 0644.
#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
