use crate::config::NotewiseConfig;
use crate::error::{NotewiseError, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reads an importable file as text.
///
/// Content is decoded as lossy UTF-8. PDF files are accepted but not parsed:
/// their raw bytes are decoded like any other file.
pub fn read_file(path: &Path, config: &NotewiseConfig) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if !config.accepts_extension(&ext) {
        return Err(NotewiseError::Validation(format!(
            "Unsupported file type for {} (accepted: {})",
            path.display(),
            config.import_extensions.join(", ")
        )));
    }

    let bytes = fs::read(path).map_err(NotewiseError::Io)?;
    if ext == "pdf" {
        warn!(path = %path.display(), "PDF text is not extracted, importing raw content");
    }
    debug!(path = %path.display(), bytes = bytes.len(), "imported file");

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
