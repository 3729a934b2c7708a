//! Page directory scanner for pageroute.
//!
//! Walks a page root into an ordered tree of [`ScanNode`]s. Sibling entries
//! are scanned concurrently and re-assembled in directory-listing order.
//!
//! - Entries whose name starts with `.` are skipped, and hidden directories
//!   are never read
//! - Files are filtered by include/exclude regexes matched against their
//!   full on-disk path
//! - Symlinks and special files are dropped
//!
//! # Example
//!
//! ```rust,no_run
//! use pageroute_scan::{DirScanner, ScanConfig};
//!
//! # async fn run() -> Result<(), pageroute_scan::ScanError> {
//! let config = ScanConfig::new("src/pages").exclude(r"/components/");
//! let tree = DirScanner::new().scan(&config).await?;
//!
//! for node in &tree {
//!     println!("{}", node.path());
//! }
//! # Ok(())
//! # }
//! ```

mod filter;
mod scanner;

pub use filter::PathFilter;
pub use scanner::{DirScanner, MAX_OPEN_HANDLES};

// Re-export core types for convenience
pub use pageroute_core::{DirNode, FileNode, ScanConfig, ScanError, ScanNode, TreeStats};
