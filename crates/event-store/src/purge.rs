//! Directory purging shared by the event store and the audio directory.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// File names that are never deleted by a purge.
pub const RESERVED_ENTRIES: &[&str] = &[".gitkeep"];

/// Delete every regular file in `dir` except the reserved placeholders.
///
/// Subdirectories are left alone. A missing directory counts as already
/// empty. Files that vanish or cannot be removed mid-purge are logged and
/// skipped. Returns the number of files removed.
pub fn purge_directory(dir: &Path) -> Result<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(StoreError::io(dir, e)),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };

        let name = entry.file_name();
        if name.to_str().is_some_and(|n| RESERVED_ENTRIES.contains(&n)) {
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                removed += 1;
                debug!(path = %path.display(), "Deleted");
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete file"),
        }
    }

    Ok(removed)
}
