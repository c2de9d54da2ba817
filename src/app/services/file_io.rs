use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::Result;

pub const DEFAULT_EXTENSION: &str = "txt";

/// Read a file as text. The whole file replaces the buffer, so there is no
/// partial read.
pub fn read_text_file(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "opened file");
    Ok(content)
}

/// Write `text` verbatim, replacing whatever is at `path`.
pub fn write_text_file(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "saved file");
    Ok(())
}

/// Append the default `.txt` extension when the chosen name has none.
pub fn with_default_extension(path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// True when the default extension turned the chosen name into a different
/// path that already exists.
pub fn default_extension_would_overwrite(chosen: &str, path: &Path) -> bool {
    Path::new(chosen) != path && path.exists()
}
