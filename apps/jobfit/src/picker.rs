//! File Picker: loads a resume from disk, accepting PDFs only.

use std::path::Path;

use tracing::debug;

use crate::errors::PickError;
use crate::models::ResumeFile;

/// Reads `path` into a `ResumeFile`. Only `.pdf` files (any case) are accepted.
pub async fn pick(path: &Path) -> Result<ResumeFile, PickError> {
    if !has_pdf_extension(path) {
        return Err(PickError::NotPdf(path.to_path_buf()));
    }

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| PickError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
    if !metadata.is_file() {
        return Err(PickError::NotAFile(path.to_path_buf()));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| PickError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string());

    debug!("Picked {} ({} bytes)", path.display(), bytes.len());
    Ok(ResumeFile::new(file_name, bytes))
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
