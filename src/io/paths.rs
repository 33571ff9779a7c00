//! Output-path resolution and input discovery.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Resolves a non-clobbering output path.
///
/// Returns the candidate unchanged if nothing exists there; otherwise
/// appends `_(1)`, `_(2)`, ... to the file stem until a free name is found.
#[must_use]
pub fn save_filename(candidate: &Path) -> PathBuf {
    if !candidate.exists() {
        return candidate.to_path_buf();
    }
    let stem = candidate
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = candidate
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut counter = 1u32;
    loop {
        let next = candidate.with_file_name(format!("{stem}_({counter}).{extension}"));
        if !next.exists() {
            return next;
        }
        counter += 1;
    }
}

/// Finds the most recently modified `.xlsx` or `.csv` file in a directory.
///
/// Used as the input fallback when no file is given on the command line.
/// Returns `None` if the directory holds no candidate (or cannot be read).
#[must_use]
pub fn most_recent_input(dir: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("xlsx" | "csv")
            )
        })
        .max_by_key(|path| {
            std::fs::metadata(path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_save_filename_passes_free_names_through() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = dir.path().join("bookmarks.csv");
        assert_eq!(save_filename(&candidate), candidate);
    }

    #[test]
    fn test_save_filename_counts_up_on_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = dir.path().join("bookmarks.csv");
        fs::write(&candidate, "x").unwrap();
        let first = save_filename(&candidate);
        assert_eq!(first, dir.path().join("bookmarks_(1).csv"));

        fs::write(&first, "x").unwrap();
        assert_eq!(save_filename(&candidate), dir.path().join("bookmarks_(2).csv"));
    }

    #[test]
    fn test_most_recent_input_ignores_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        assert_eq!(most_recent_input(dir.path()), None);

        fs::write(dir.path().join("bookmarks.csv"), "x").unwrap();
        assert_eq!(
            most_recent_input(dir.path()),
            Some(dir.path().join("bookmarks.csv"))
        );
    }
}
