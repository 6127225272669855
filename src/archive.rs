//! Archive creation
//!
//! Packages a staged submission into a single zip file. Archives are
//! canonical: entries are emitted in sorted path order with normalized
//! timestamps and permissions, so identical staging contents produce
//! identical archive bytes.
//!
//! The zip is assembled in memory and written to its destination in one
//! step at the end, so a failed run never leaves a partial archive behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// Errors for archive operations
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("path is not within the staging root: {}", .0.display())]
    PathNotInRoot(PathBuf),
}

/// Build canonical zip bytes for the contents of `root`.
///
/// Entry paths are relative to `root`, forward-slash separated, sorted.
/// Directory entries carry mode 0755, files 0644, and every entry uses the
/// zip format's epoch timestamp.
pub fn build_archive(root: &Path) -> Result<Vec<u8>, ArchiveError> {
    let mut entries = BTreeMap::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = entry?;
        let rel_path = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| ArchiveError::PathNotInRoot(entry.path().to_path_buf()))?;

        // Skip root itself
        if rel_path.as_os_str().is_empty() {
            continue;
        }

        entries.insert(rel_path.to_path_buf(), entry.file_type().is_dir());
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    // BTreeMap iteration gives sorted order
    for (rel_path, is_dir) in &entries {
        let name = zip_entry_name(rel_path);

        if *is_dir {
            let options = SimpleFileOptions::default()
                .last_modified_time(zip::DateTime::default())
                .unix_permissions(0o755);
            writer.add_directory(name, options)?;
        } else {
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(zip::DateTime::default())
                .unix_permissions(0o644);
            writer.start_file(name, options)?;
            let contents = fs::read(root.join(rel_path))?;
            writer.write_all(&contents)?;
        }
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Archive the contents of `root` to `dest_dir/<name>.zip`.
///
/// This is the terminal step of a run: the archive appears at its final
/// path only once it is complete. Returns the archive path.
pub fn archive_dir(root: &Path, dest_dir: &Path, name: &str) -> Result<PathBuf, ArchiveError> {
    let bytes = build_archive(root)?;
    let archive_path = dest_dir.join(format!("{}.zip", name));
    fs::write(&archive_path, &bytes)?;
    Ok(archive_path)
}

fn zip_entry_name(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn create_staged_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::create_dir_all(dir.path().join("hw2/src/index")).unwrap();
        fs::write(dir.path().join("hw2/src/index/Tree.java"), "class Tree {}").unwrap();
        fs::write(dir.path().join("hw2/notes.txt"), "notes").unwrap();

        dir
    }

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_archive_contains_all_entries() {
        let dir = create_staged_dir();
        let bytes = build_archive(dir.path()).unwrap();

        let names = entry_names(&bytes);
        assert!(names.contains(&"hw2/".to_string()));
        assert!(names.contains(&"hw2/notes.txt".to_string()));
        assert!(names.contains(&"hw2/src/index/Tree.java".to_string()));
    }

    #[test]
    fn test_entries_are_sorted() {
        let dir = create_staged_dir();
        let bytes = build_archive(dir.path()).unwrap();

        let names: Vec<String> = entry_names(&bytes)
            .into_iter()
            .map(|n| n.trim_end_matches('/').to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_file_contents_survive_round_trip() {
        let dir = create_staged_dir();
        let bytes = build_archive(dir.path()).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("hw2/src/index/Tree.java").unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "class Tree {}");
    }

    #[test]
    fn test_identical_contents_produce_identical_bytes() {
        let dir1 = create_staged_dir();
        let dir2 = create_staged_dir();

        let bytes1 = build_archive(dir1.path()).unwrap();
        let bytes2 = build_archive(dir2.path()).unwrap();

        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn test_archive_dir_names_output_after_assignment() {
        let dir = create_staged_dir();
        let dest = TempDir::new().unwrap();

        let path = archive_dir(dir.path(), dest.path(), "hw2").unwrap();

        assert_eq!(path, dest.path().join("hw2.zip"));
        assert!(path.is_file());
    }

    #[test]
    fn test_empty_root_produces_valid_empty_archive() {
        let dir = TempDir::new().unwrap();
        let bytes = build_archive(dir.path()).unwrap();

        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
