//! ZIP ingestion for bulk uploads.

use codedrop_common::{has_image_extension, DropError, Result};
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;

/// Upper bound on the total uncompressed size accepted from one archive.
pub const MAX_EXTRACTED_BYTES: u64 = 256 * 1024 * 1024;

/// Reduces an archive entry path to its final component.
///
/// Both `/` and `\` count as separators. Returns `None` when nothing usable
/// is left (empty, `.` or `..`), so an entry like `../../evil.png` becomes
/// `evil.png` and can only ever land inside the target directory.
pub fn sanitize_entry_name(raw: &str) -> Option<String> {
    let base = raw.rsplit(|c| c == '/' || c == '\\').next()?;
    match base {
        "" | "." | ".." => None,
        _ => Some(base.to_string()),
    }
}

fn invalid_archive(err: impl std::fmt::Display) -> DropError {
    DropError::invalid_field(format!("That file is not a valid ZIP: {err}"), "archive")
}

/// Extracts every image entry of `bytes` into `target_dir`, flattened to its
/// base name and overwriting existing files. Non-image entries are skipped.
///
/// The whole archive is read and checked before anything is written, so a
/// corrupt archive leaves the directory untouched.
pub fn extract_images(bytes: &[u8], target_dir: &Path) -> Result<usize> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(invalid_archive)?;

    let mut staged: Vec<(String, Vec<u8>)> = Vec::new();
    let mut total: u64 = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(invalid_archive)?;
        if entry.is_dir() {
            continue;
        }

        let raw_name = entry.name().to_string();
        let Some(file_name) = sanitize_entry_name(&raw_name) else {
            debug!("Skipping archive entry with no usable name: {:?}", raw_name);
            continue;
        };
        if !has_image_extension(&file_name) {
            debug!("Skipping non-image archive entry {:?}", raw_name);
            continue;
        }

        let remaining = MAX_EXTRACTED_BYTES.saturating_sub(total);
        let mut data = Vec::new();
        (&mut entry)
            .take(remaining + 1)
            .read_to_end(&mut data)
            .map_err(invalid_archive)?;
        total += data.len() as u64;
        if total > MAX_EXTRACTED_BYTES {
            return Err(DropError::invalid_field(
                format!("Archive expands to more than {} MiB", MAX_EXTRACTED_BYTES / (1024 * 1024)),
                "archive",
            ));
        }

        if raw_name != file_name {
            debug!("Flattened archive entry {:?} to {:?}", raw_name, file_name);
        }
        staged.push((file_name, data));
    }

    fs::create_dir_all(target_dir)?;
    for (file_name, data) in &staged {
        fs::write(target_dir.join(file_name), data)?;
    }

    info!("Extracted {} image(s) into {}", staged.len(), target_dir.display());
    Ok(staged.len())
}
