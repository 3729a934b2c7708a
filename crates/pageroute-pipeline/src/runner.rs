//! One-shot and repeated pipeline runs.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use pageroute_routes::{RouteBuilder, RouteOptions};
use pageroute_scan::DirScanner;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::render::render_routes;
use crate::sink::OutputSink;
use crate::template::resolve_template;

/// Result of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Output changed and was delivered to the sink.
    Written {
        /// Number of routes, nested ones included.
        routes: usize,
    },
    /// Output matched the previous run; nothing was written.
    Unchanged,
}

/// Long-lived pipeline state for one run configuration.
///
/// Remembers the last rendered output so that identical results are not
/// written again. Dropping the runner discards that memo.
#[derive(Debug)]
pub struct PipelineRunner {
    config: PipelineConfig,
    scanner: DirScanner,
    builder: RouteBuilder,
    sink: OutputSink,
    last_output: Option<String>,
}

impl PipelineRunner {
    /// Create a runner, checking that the page root exists.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        if !config.page_root.exists() {
            return Err(PipelineError::InvalidPageRoot {
                path: config.page_root.clone(),
            });
        }

        Ok(Self {
            builder: RouteBuilder::with_options(config.route_options()),
            sink: OutputSink::for_output(config.output.clone()),
            scanner: DirScanner::new(),
            last_output: None,
            config,
        })
    }

    /// Replace the route options derived from the config.
    pub fn with_route_options(mut self, options: RouteOptions) -> Self {
        self.builder = RouteBuilder::with_options(options);
        self
    }

    /// Replace the sink derived from the config.
    pub fn with_sink(mut self, sink: OutputSink) -> Self {
        self.sink = sink;
        self
    }

    /// Configuration of this runner.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Debounce delay for watch mode.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.debounce_ms)
    }

    /// Rendered output of the last delivered run.
    pub fn last_output(&self) -> Option<&str> {
        self.last_output.as_deref()
    }

    /// Scan, build, render and deliver once.
    pub async fn run_once(&mut self) -> Result<RunOutcome, PipelineError> {
        let start = Instant::now();

        let tree = self.scanner.scan(&self.config.scan_config()).await?;
        let routes = self.builder.build(&tree);
        let rendered = render_routes(&routes, &self.config.children_key);

        if self.last_output.as_deref() == Some(rendered.as_str()) {
            debug!("routes unchanged, skipping write");
            return Ok(RunOutcome::Unchanged);
        }

        let template =
            resolve_template(&self.config.template, self.config.template_file.as_deref()).await;
        self.sink.emit(&rendered, &template).await?;
        self.last_output = Some(rendered);

        let count: usize = routes.iter().map(|r| r.route_count()).sum();
        debug!(
            routes = count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "routes delivered"
        );
        if let Some(tips) = self.config.success_message() {
            info!("{tips}");
        }

        Ok(RunOutcome::Written { routes: count })
    }
}
