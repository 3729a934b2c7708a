//! Output pipeline for pageroute.
//!
//! Ties the scanner and the route builder to their collaborators:
//!
//! - **Rendering** - JSON with two-space indentation, raw code fragments
//!   emitted unquoted
//! - **Templating** - a single `@routeConfig` placeholder, inline or loaded
//!   from a file
//! - **Sinks** - stdout, a generated file, or a callback; unchanged output
//!   is never rewritten
//! - **Watching** - re-run on file changes under the page root, debounced
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use pageroute_pipeline::{PipelineConfig, PipelineRunner};
//!
//! # async fn run() -> Result<(), pageroute_pipeline::PipelineError> {
//! let config = PipelineConfig::builder()
//!     .page_root("src/pages")
//!     .output(PathBuf::from("src/routes.js"))
//!     .build()
//!     .expect("valid config");
//!
//! let mut runner = PipelineRunner::new(config)?;
//! runner.run_once().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod render;
mod runner;
mod sink;
mod template;
mod watch;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::PipelineError;
pub use render::{DEFAULT_CHILDREN_KEY, render_routes};
pub use runner::{PipelineRunner, RunOutcome};
pub use sink::{OUTPUT_HEADER, OutputSink};
pub use template::{DEFAULT_TEMPLATE, ROUTE_PLACEHOLDER, fill_template, resolve_template};
pub use watch::{debounce_runs, watch, watch_until};

// Re-export core types
pub use pageroute_core::{RouteNode, RouteValue};
