//! Submission pipeline orchestration
//!
//! Chains the stages of a packaging run:
//! - Validate the student ID
//! - Resolve the assignment manifest
//! - Build the staging tree in a fresh temporary directory
//! - Collect the required files
//! - Write the submission manifest
//! - Seal the identity metadata
//! - Archive the staging tree
//!
//! Each stage is a precondition for the next; the first error aborts the
//! run. The staging directory is a scoped resource that is removed on
//! every exit path, so a failed run leaves nothing behind but its
//! diagnostic.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;

use crate::archive::{self, ArchiveError};
use crate::identity::{self, IdentityError};
use crate::manifest::{self, ManifestError};
use crate::seal::{SealError, Sealer};
use crate::staging::{self, StagingError, SubmissionManifest, SUBMISSION_MANIFEST_FILE};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{0}")]
    Identity(#[from] IdentityError),

    #[error("{0}")]
    Manifest(#[from] ManifestError),

    #[error("staging error: {0}")]
    Staging(#[from] StagingError),

    #[error("sealing error: {0}")]
    Seal(#[from] SealError),

    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PipelineError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Identity(_) => 2,
            PipelineError::Manifest(_) => 3,
            PipelineError::Staging(_) => 4,
            PipelineError::Seal(_) => 5,
            PipelineError::Archive(_) => 6,
            PipelineError::Io(_) => 1,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Configuration for one packaging run
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// Student ID to seal into the submission
    pub student_id: String,

    /// Assignment key selecting the manifest
    pub assignment: String,

    /// Directory the manifest paths are resolved against
    pub source_dir: PathBuf,

    /// Directory the finished archive is written to
    pub dest_dir: PathBuf,

    /// Public key file used to seal the metadata
    pub public_key: PathBuf,

    /// Encryption tool executable
    pub gpg_program: String,
}

impl SubmitConfig {
    /// Create a config rooted at `base_dir`: sources, output, and
    /// `public.key` all live there, as they do for a student running the
    /// tool from their project checkout.
    pub fn new(
        student_id: impl Into<String>,
        assignment: impl Into<String>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        let base_dir = base_dir.into();
        Self {
            student_id: student_id.into(),
            assignment: assignment.into(),
            source_dir: base_dir.clone(),
            dest_dir: base_dir.clone(),
            public_key: base_dir.join("public.key"),
            gpg_program: "gpg".to_string(),
        }
    }
}

/// Run the full packaging pipeline.
///
/// On success the archive exists at `dest_dir/<assignment>.zip` and its
/// path is returned. On failure nothing is left in the destination
/// directory; the staging directory is removed either way.
pub fn run(config: &SubmitConfig) -> PipelineResult<PathBuf> {
    identity::validate_student_id(&config.student_id)?;
    let manifest = manifest::resolve(&config.assignment)?;

    // Staging root lives on this frame; dropped (and deleted) on every
    // return path below.
    let staging = TempDir::new()?;
    let assignment_dir = staging.path().join(manifest.key);

    staging::build_tree(&assignment_dir, manifest)?;
    let staged = staging::collect_files(&config.source_dir, manifest, &assignment_dir)?;

    let submission_manifest = SubmissionManifest::new(manifest.key, staged);
    submission_manifest.write_to_file(&assignment_dir.join(SUBMISSION_MANIFEST_FILE))?;

    let sealer = Sealer::new(&config.public_key).with_gpg_program(config.gpg_program.clone());
    sealer.seal(&config.student_id, &assignment_dir)?;

    let archive_path = archive::archive_dir(staging.path(), &config.dest_dir, manifest.key)?;
    Ok(archive_path)
}

/// Check whether a destination already holds an archive for `assignment`.
pub fn archive_exists(dest_dir: &Path, assignment: &str) -> bool {
    dest_dir.join(format!("{}.zip", assignment)).exists()
}
