//! Route building for pageroute.
//!
//! Folds the tree produced by the scanner into a nested route configuration.
//! Directories only organize files: nesting in the output comes exclusively
//! from layout files, which wrap every route of their directory level
//! (sub-directories included) as children.
//!
//! ```rust
//! use pageroute_core::{FileNode, ScanNode};
//! use pageroute_routes::{RouteBuilder, RouteOptions};
//!
//! let tree: Vec<ScanNode> = vec![
//!     FileNode::from_path("index.js").into(),
//!     FileNode::from_path("_layout.js").into(),
//!     FileNode::from_path("about.js").into(),
//! ];
//!
//! let routes = RouteBuilder::with_options(RouteOptions::default()).build(&tree);
//! assert_eq!(routes.len(), 1);
//! assert_eq!(routes[0].path, "/");
//! assert_eq!(routes[0].children.as_ref().map(Vec::len), Some(2));
//! ```

mod builder;
mod options;

pub use builder::{RouteBuilder, build_routes};
pub use options::{
    DEFAULT_COMPONENT_PREFIX, DEFAULT_EXTENSIONS, DEFAULT_INDEX_NAME, DEFAULT_LAYOUT_NAME,
    RouteOptions, normalize_extension,
};

// Re-export core types
pub use pageroute_core::{FileNode, RouteNode, RouteValue, ScanNode};
