//! pageroute - Generate a route configuration from a directory of pages.
//!
//! Usage:
//!   pageroute routes [PAGE_ROOT]     Generate routes once
//!   pageroute routes --watch         Regenerate on every change
//!   pageroute scan [PATH]            Print the scanned page tree as JSON
//!   pageroute --help                 Show help

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use pageroute_core::TreeStats;
use pageroute_pipeline::{PipelineConfig, PipelineRunner, RunOutcome};
use pageroute_scan::{DirScanner, ScanConfig};

#[derive(Parser)]
#[command(
    name = "pageroute",
    version,
    about = "Turn a directory of page files into a nested route configuration",
    long_about = "pageroute scans a page directory and writes a route configuration.\n\n\
                  Layout files (`_layout.*`) wrap the routes of their directory as \
                  children; everything else becomes a flat list of pages."
)]
struct Cli {
    /// TOML config file; command-line flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the route configuration
    Routes {
        /// Page root (defaults to the config value, then src/pages)
        page_root: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        patterns: PatternArgs,

        /// Routable extension such as `.vue` or `vue` (repeatable)
        #[arg(long = "ext", value_name = "EXT")]
        extensions: Vec<String>,

        /// Route every extension
        #[arg(long, conflicts_with = "extensions")]
        any_extension: bool,

        /// Inline template; `@routeConfig` is replaced by the routes
        #[arg(long)]
        template: Option<String>,

        /// Template file, preferred over --template
        #[arg(long)]
        template_file: Option<PathBuf>,

        /// Keep running and regenerate on changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Print the scanned page tree as JSON
    Scan {
        /// Directory to scan
        #[arg(default_value = "src/pages")]
        path: PathBuf,

        #[command(flatten)]
        patterns: PatternArgs,
    },
}

#[derive(Args)]
struct PatternArgs {
    /// Regex a file path must match (repeatable)
    #[arg(short, long = "include", value_name = "REGEX")]
    includes: Vec<String>,

    /// Regex a file path must not match (repeatable)
    #[arg(short, long = "exclude", value_name = "REGEX")]
    excludes: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .wrap_err_with(|| format!("Failed to load {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Command::Routes {
            page_root,
            output,
            patterns,
            extensions,
            any_extension,
            template,
            template_file,
            watch,
        } => {
            let mut config = config;
            if let Some(page_root) = page_root {
                config.page_root = page_root;
            }
            if output.is_some() {
                config.output = output;
            }
            config.includes.extend(patterns.includes);
            config.excludes.extend(patterns.excludes);
            if any_extension {
                config.extensions.clear();
            } else if !extensions.is_empty() {
                config.extensions = extensions;
            }
            if let Some(template) = template {
                config.template = template;
            }
            if template_file.is_some() {
                config.template_file = template_file;
            }

            run_routes(config, watch).await?;
        }
        Command::Scan { path, patterns } => {
            run_scan(path, patterns).await?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Generate routes once, or keep regenerating in watch mode.
async fn run_routes(config: PipelineConfig, watch: bool) -> Result<()> {
    let mut runner = PipelineRunner::new(config).context("Invalid page root")?;

    if watch {
        pageroute_pipeline::watch(&mut runner)
            .await
            .context("Watch failed")?;
    } else {
        match runner.run_once().await.context("Route generation failed")? {
            RunOutcome::Written { routes } => tracing::debug!(routes, "done"),
            RunOutcome::Unchanged => {}
        }
    }

    Ok(())
}

/// Scan a directory and print the tree.
async fn run_scan(path: PathBuf, patterns: PatternArgs) -> Result<()> {
    let config = ScanConfig::builder()
        .root(path.clone())
        .includes(patterns.includes)
        .excludes(patterns.excludes)
        .build()
        .wrap_err("Invalid scan options")?;

    eprintln!("Scanning {}...", path.display());

    let tree = DirScanner::new()
        .scan(&config)
        .await
        .context("Scan failed")?;
    let stats = TreeStats::from_entries(&tree);

    println!("{}", serde_json::to_string_pretty(&tree)?);
    eprintln!(
        "{} files, {} directories, depth {}",
        stats.total_files, stats.total_dirs, stats.max_depth
    );

    Ok(())
}
