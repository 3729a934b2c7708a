//! Core types for pageroute.
//!
//! This crate provides the data structures shared by the scanner, the route
//! builder and the output pipeline: scanned file/directory nodes, route
//! nodes with their field values, scan configuration and errors.

mod config;
mod error;
mod node;
mod route;
mod tree;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::ScanError;
pub use node::{DirNode, FileNode, ScanNode};
pub use route::{RouteNode, RouteValue, SCRIPT_PREFIX, SCRIPT_SUFFIX};
pub use tree::TreeStats;
