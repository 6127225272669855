//! Staging tree construction and file collection
//!
//! A staged submission lives in a fresh temporary directory owned by one
//! pipeline run. The tree mirrors the manifest's relative paths, so two
//! required files sharing a basename can never collide. Every function here
//! takes the staging directory explicitly; nothing reaches into an
//! enclosing scope for it.

mod manifest;

pub use manifest::{StagedFile, SubmissionManifest, SCHEMA_ID, SCHEMA_VERSION};

use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::manifest::AssignmentManifest;

/// Filename of the JSON manifest written next to the staged files
pub const SUBMISSION_MANIFEST_FILE: &str = "submission_manifest.json";

/// Errors for staging operations
#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("creating directory {} failed: {}", path.display(), source)]
    DirCreation { path: PathBuf, source: io::Error },

    #[error("could not find file at {}", path.display())]
    MissingSourceFile { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Create the directory structure implied by the manifest's relative paths.
///
/// Every distinct parent directory (with its ancestors) is created under
/// `assignment_dir`, which is itself created first. Existing directories are
/// left alone, so calling this twice is harmless.
pub fn build_tree(
    assignment_dir: &Path,
    manifest: &AssignmentManifest,
) -> Result<(), StagingError> {
    create_dir_checked(assignment_dir)?;

    for rel in manifest.files {
        if let Some(parent) = Path::new(rel).parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_checked(&assignment_dir.join(parent))?;
            }
        }
    }

    Ok(())
}

fn create_dir_checked(path: &Path) -> Result<(), StagingError> {
    fs::create_dir_all(path).map_err(|source| StagingError::DirCreation {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy every manifest file from the student's working tree into the staging
/// tree, preserving relative paths.
///
/// Fails fast on the first missing file, naming the full path that was
/// expected; no further entries are attempted. Sources are read, never
/// moved. Returns one record per collected file with its size and SHA-256.
pub fn collect_files(
    source_base: &Path,
    manifest: &AssignmentManifest,
    assignment_dir: &Path,
) -> Result<Vec<StagedFile>, StagingError> {
    let mut staged = Vec::with_capacity(manifest.files.len());

    for rel in manifest.files {
        let source_path = source_base.join(rel);
        if !source_path.is_file() {
            return Err(StagingError::MissingSourceFile { path: source_path });
        }

        let contents = fs::read(&source_path)?;
        let sha256 = {
            let mut hasher = Sha256::new();
            hasher.update(&contents);
            hex::encode(hasher.finalize())
        };

        fs::write(assignment_dir.join(rel), &contents)?;

        staged.push(StagedFile {
            path: (*rel).to_string(),
            size: contents.len() as u64,
            sha256,
        });
    }

    Ok(staged)
}
