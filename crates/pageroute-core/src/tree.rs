//! Summary statistics for scanned trees.

use serde::{Deserialize, Serialize};

use crate::node::ScanNode;

/// Summary statistics for a scanned tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories, the root excluded.
    pub total_dirs: u64,
    /// Maximum depth reached (top-level entries are depth 1).
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute stats for the top-level entries returned by a scan.
    pub fn from_entries(entries: &[ScanNode]) -> Self {
        let mut stats = Self::new();
        for entry in entries {
            stats.record(entry, 1);
        }
        stats
    }

    fn record(&mut self, node: &ScanNode, depth: u32) {
        self.max_depth = self.max_depth.max(depth);
        match node {
            ScanNode::File(_) => self.total_files += 1,
            ScanNode::Dir(dir) => {
                self.total_dirs += 1;
                for child in &dir.children {
                    self.record(child, depth + 1);
                }
            }
        }
    }
}
