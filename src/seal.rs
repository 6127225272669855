//! Identity metadata sealing
//!
//! Writes the student's identity record into the staged submission and
//! encrypts it to the course staff with GnuPG. The plaintext record is
//! deleted as soon as the sealed file exists, so no readable identity data
//! survives into the archive.
//!
//! GnuPG is a black box here: each invocation either exits zero or the run
//! is dead.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Plaintext metadata filename, removed before archiving
pub const PLAINTEXT_FILE: &str = "submission_info.txt";

/// Sealed metadata filename, bundled into the archive
pub const SEALED_FILE: &str = "submission_info.gpg";

/// Recipient the metadata is encrypted to
pub const DEFAULT_RECIPIENT: &str = "CS186 Staff";

/// The identity record sealed into a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionInfo {
    pub student_id: String,
}

/// Errors for sealing operations
#[derive(Debug, thiserror::Error)]
pub enum SealError {
    #[error("missing the public key file at {}", path.display())]
    MissingPublicKey { path: PathBuf },

    #[error("failed to run '{program}': {source}")]
    Spawn { program: String, source: io::Error },

    #[error("key import exited with {status}")]
    Import { status: ExitStatus },

    #[error("encryption exited with {status}")]
    Encrypt { status: ExitStatus },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Seals an identity record into a staged submission
pub struct Sealer {
    public_key: PathBuf,
    gpg_program: String,
    recipient: String,
}

impl Sealer {
    /// Create a sealer using the given public key file
    pub fn new(public_key: impl Into<PathBuf>) -> Self {
        Self {
            public_key: public_key.into(),
            gpg_program: "gpg".to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
        }
    }

    /// Override the gpg executable (used by tests to inject a stub)
    pub fn with_gpg_program(mut self, program: impl Into<String>) -> Self {
        self.gpg_program = program.into();
        self
    }

    /// Override the encryption recipient
    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    /// Seal the identity record into `assignment_dir`.
    ///
    /// Writes `submission_info.txt`, imports the public key, encrypts the
    /// record to the recipient under the always-trust model, then deletes
    /// the plaintext. Returns the path of the sealed file.
    pub fn seal(&self, student_id: &str, assignment_dir: &Path) -> Result<PathBuf, SealError> {
        let record = SubmissionInfo {
            student_id: student_id.to_string(),
        };
        let plaintext_path = assignment_dir.join(PLAINTEXT_FILE);
        fs::write(&plaintext_path, serde_json::to_string(&record)?)?;

        if !self.public_key.is_file() {
            return Err(SealError::MissingPublicKey {
                path: self.public_key.clone(),
            });
        }

        let status = self
            .run_gpg(|cmd| {
                cmd.arg("--import").arg(&self.public_key);
            })?;
        if !status.success() {
            return Err(SealError::Import { status });
        }

        let sealed_path = assignment_dir.join(SEALED_FILE);
        let status = self.run_gpg(|cmd| {
            cmd.arg("--output")
                .arg(&sealed_path)
                .args(["--trust-model", "always", "-e", "-r"])
                .arg(&self.recipient)
                .arg(&plaintext_path);
        })?;
        if !status.success() {
            return Err(SealError::Encrypt { status });
        }

        fs::remove_file(&plaintext_path)?;
        Ok(sealed_path)
    }

    fn run_gpg(&self, configure: impl FnOnce(&mut Command)) -> Result<ExitStatus, SealError> {
        let mut cmd = Command::new(&self.gpg_program);
        configure(&mut cmd);
        cmd.status().map_err(|source| SealError::Spawn {
            program: self.gpg_program.clone(),
            source,
        })
    }
}
