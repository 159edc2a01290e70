//! Zip extraction for downloaded library archives.

use crate::core::IonicError;
use std::fs;
use std::io;
use std::path::Path;

/// Extract every entry of the zip at `archive` into `dest`.
///
/// Entries whose names would escape `dest` (absolute paths, `..`) abort the
/// extraction. Returns the number of files written.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<usize, IonicError> {
    let archive_error = |reason: String| IonicError::ArchiveError {
        path: archive.display().to_string(),
        reason,
    };

    let file = fs::File::open(archive).map_err(|e| archive_error(e.to_string()))?;
    let mut zip = zip::ZipArchive::new(io::BufReader::new(file))
        .map_err(|e| archive_error(format!("Failed to open zip archive: {e}")))?;

    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry =
            zip.by_index(i).map_err(|e| archive_error(format!("Failed to read zip entry: {e}")))?;

        let Some(relative) = entry.enclosed_name() else {
            return Err(archive_error(format!("Unsafe entry path '{}'", entry.name())));
        };
        let outpath = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath).map_err(|e| archive_error(e.to_string()))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).map_err(|e| archive_error(e.to_string()))?;
        }
        let mut outfile = fs::File::create(&outpath).map_err(|e| archive_error(e.to_string()))?;
        io::copy(&mut entry, &mut outfile).map_err(|e| archive_error(e.to_string()))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&outpath, fs::Permissions::from_mode(mode & 0o777))
                .map_err(|e| archive_error(e.to_string()))?;
        }

        written += 1;
    }

    Ok(written)
}

/// [`extract_zip`] on the blocking thread pool.
pub async fn extract_zip_async(archive: &Path, dest: &Path) -> Result<usize, IonicError> {
    let archive_path = archive.to_path_buf();
    let dest = dest.to_path_buf();
    tokio::task::spawn_blocking(move || extract_zip(&archive_path, &dest)).await.map_err(|e| {
        IonicError::ArchiveError {
            path: archive.display().to_string(),
            reason: format!("extraction task failed: {e}"),
        }
    })?
}
