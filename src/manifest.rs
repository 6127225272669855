//! Assignment manifests
//!
//! Maps each known assignment key to the ordered list of files a student
//! must submit for it. The table is policy data: adding an assignment means
//! adding one entry here, nothing in the pipeline changes.
//!
//! Paths are relative to the student's working tree, forward-slash
//! separated, and are preserved as-is inside the staged submission.

/// Errors for manifest resolution
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("unknown assignment '{key}' (expected one of: {known})")]
    UnknownAssignment { key: String, known: String },
}

/// The fixed list of files required for one assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentManifest {
    /// Assignment key, e.g. "hw1"
    pub key: &'static str,

    /// Required files, relative to the student's working tree
    pub files: &'static [&'static str],
}

const ASSIGNMENTS: &[AssignmentManifest] = &[
    AssignmentManifest {
        key: "hw1",
        files: &["hw1.sql"],
    },
    AssignmentManifest {
        key: "hw2",
        files: &[
            "src/main/java/edu/berkeley/cs186/database/index/BPlusTree.java",
            "src/main/java/edu/berkeley/cs186/database/index/BPlusNode.java",
            "src/main/java/edu/berkeley/cs186/database/index/InnerNode.java",
            "src/main/java/edu/berkeley/cs186/database/index/LeafNode.java",
        ],
    },
    AssignmentManifest {
        key: "hw3",
        files: &[
            "src/main/java/edu/berkeley/cs186/database/table/Table.java",
            "src/main/java/edu/berkeley/cs186/database/query/PNLJOperator.java",
            "src/main/java/edu/berkeley/cs186/database/query/BNLJOperator.java",
            "src/main/java/edu/berkeley/cs186/database/query/SortOperator.java",
            "src/main/java/edu/berkeley/cs186/database/query/SortMergeOperator.java",
        ],
    },
    AssignmentManifest {
        key: "hw4",
        files: &[
            "src/main/java/edu/berkeley/cs186/database/query/QueryPlan.java",
            "src/main/java/edu/berkeley/cs186/database/table/stats/Histogram.java",
        ],
    },
    AssignmentManifest {
        key: "hw5",
        files: &[
            "src/main/java/edu/berkeley/cs186/database/concurrency/LockType.java",
            "src/main/java/edu/berkeley/cs186/database/concurrency/LockManager.java",
            "src/main/java/edu/berkeley/cs186/database/concurrency/LockContext.java",
            "src/main/java/edu/berkeley/cs186/database/concurrency/LockUtil.java",
            "src/main/java/edu/berkeley/cs186/database/index/BPlusTree.java",
            "src/main/java/edu/berkeley/cs186/database/io/Page.java",
            "src/main/java/edu/berkeley/cs186/database/io/PageAllocator.java",
            "src/main/java/edu/berkeley/cs186/database/table/Table.java",
            "src/main/java/edu/berkeley/cs186/database/Database.java",
        ],
    },
];

/// Resolve an assignment key to its manifest.
pub fn resolve(assignment: &str) -> Result<&'static AssignmentManifest, ManifestError> {
    ASSIGNMENTS
        .iter()
        .find(|m| m.key == assignment)
        .ok_or_else(|| ManifestError::UnknownAssignment {
            key: assignment.to_string(),
            known: known_keys().join(", "),
        })
}

/// All assignment keys the resolver knows about, in table order.
pub fn known_keys() -> Vec<&'static str> {
    ASSIGNMENTS.iter().map(|m| m.key).collect()
}
