//! Submission manifest for staged files
//!
//! Records every file collected into a staged submission with its size and
//! content hash. Written as `submission_manifest.json` next to the staged
//! files and bundled into the final archive. Carries no identity data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Schema version for submission_manifest.json
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "turnin/submission_manifest@1";

/// A single collected file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedFile {
    /// Relative path within the staged submission
    pub path: String,

    /// Size in bytes
    pub size: u64,

    /// SHA-256 hash of file contents, hex-encoded
    pub sha256: String,
}

/// Submission manifest (submission_manifest.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionManifest {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When the manifest was created
    pub created_at: DateTime<Utc>,

    /// Assignment key this submission is for
    pub assignment: String,

    /// All collected files, in manifest order
    pub entries: Vec<StagedFile>,
}

impl SubmissionManifest {
    /// Create a manifest for the given assignment and collected files
    pub fn new(assignment: &str, entries: Vec<StagedFile>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            assignment: assignment.to_string(),
            entries,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write to file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e)))?;
        fs::write(path, json)
    }

    /// Load from file
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e)))
    }

    /// Get total size of all collected files
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Find an entry by path
    pub fn find_entry(&self, path: &str) -> Option<&StagedFile> {
        self.entries.iter().find(|e| e.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_manifest() -> SubmissionManifest {
        SubmissionManifest::new(
            "hw2",
            vec![
                StagedFile {
                    path: "src/main/java/edu/berkeley/cs186/database/index/BPlusTree.java"
                        .to_string(),
                    size: 4096,
                    sha256: "hash1".to_string(),
                },
                StagedFile {
                    path: "src/main/java/edu/berkeley/cs186/database/index/LeafNode.java"
                        .to_string(),
                    size: 512,
                    sha256: "hash2".to_string(),
                },
            ],
        )
    }

    #[test]
    fn test_serialization() {
        let manifest = sample_manifest();
        let json = manifest.to_json().unwrap();

        assert!(json.contains("\"schema_version\": 1"));
        assert!(json.contains("\"assignment\": \"hw2\""));
        assert!(json.contains("BPlusTree.java"));
    }

    #[test]
    fn test_deserialization() {
        let manifest = sample_manifest();
        let json = manifest.to_json().unwrap();

        let parsed = SubmissionManifest::from_json(&json).unwrap();
        assert_eq!(parsed.assignment, manifest.assignment);
        assert_eq!(parsed.entries, manifest.entries);
    }

    #[test]
    fn test_total_size() {
        let manifest = sample_manifest();
        assert_eq!(manifest.total_size(), 4608);
    }

    #[test]
    fn test_find_entry() {
        let manifest = sample_manifest();

        assert!(manifest
            .find_entry("src/main/java/edu/berkeley/cs186/database/index/LeafNode.java")
            .is_some());
        assert!(manifest.find_entry("nonexistent").is_none());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("submission_manifest.json");

        let manifest = sample_manifest();
        manifest.write_to_file(&path).unwrap();

        let loaded = SubmissionManifest::from_file(&path).unwrap();
        assert_eq!(loaded.schema_id, SCHEMA_ID);
        assert_eq!(loaded.entries, manifest.entries);
    }
}
