//! Concurrent async directory scanner.

use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, try_join_all};
use tokio::fs;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, trace};

use pageroute_core::{DirNode, FileNode, ScanConfig, ScanError, ScanNode, TreeStats};

use crate::filter::PathFilter;

/// Upper bound on directory listings and metadata calls in flight at once.
pub const MAX_OPEN_HANDLES: usize = 32;

/// Scanner that walks a page root into a tree of [`ScanNode`]s.
///
/// Each directory level fans out one future per entry and joins them in
/// listing order, so completion order never leaks into the result. File
/// system calls share [`MAX_OPEN_HANDLES`] permits per scan; a permit is
/// never held while recursing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirScanner;

impl DirScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self
    }

    /// Scan the configured root and return its top-level entries.
    ///
    /// Returns an empty sequence when the root exists but is not a
    /// directory. Any I/O failure aborts the whole scan.
    pub async fn scan(&self, config: &ScanConfig) -> Result<Vec<ScanNode>, ScanError> {
        let start = Instant::now();
        let filter = PathFilter::from_config(config)?;
        let root = config.root.as_path();

        // The root itself may be a symlink to the real page directory.
        let metadata = fs::metadata(root)
            .await
            .map_err(|e| ScanError::io(root, e))?;
        if !metadata.is_dir() {
            debug!(root = %root.display(), "scan root is not a directory");
            return Ok(Vec::new());
        }

        let ctx = ScanContext {
            root: root.to_path_buf(),
            root_display: slash_root(root),
            filter,
            io_permits: Semaphore::new(MAX_OPEN_HANDLES),
        };
        let entries = scan_children(&ctx, "").await?;

        let stats = TreeStats::from_entries(&entries);
        debug!(
            root = %root.display(),
            files = stats.total_files,
            dirs = stats.total_dirs,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "scan complete"
        );

        Ok(entries)
    }
}

/// Read-only state shared by every branch of one scan.
struct ScanContext {
    root: PathBuf,
    root_display: String,
    filter: PathFilter,
    io_permits: Semaphore,
}

impl ScanContext {
    fn disk_path(&self, rel: &str) -> PathBuf {
        if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }

    /// Full path used for pattern matching, always `/` separated.
    fn match_path(&self, rel: &str) -> String {
        match self.root_display.as_str() {
            "" => rel.to_string(),
            root if root.ends_with('/') => format!("{root}{rel}"),
            root => format!("{root}/{rel}"),
        }
    }

    async fn permit(&self, path: &Path) -> Result<SemaphorePermit<'_>, ScanError> {
        // The semaphore is never closed while a scan is running.
        self.io_permits
            .acquire()
            .await
            .map_err(|e| ScanError::io(path, std::io::Error::other(e)))
    }
}

/// List a directory and scan all of its entries concurrently.
async fn scan_children(ctx: &ScanContext, rel: &str) -> Result<Vec<ScanNode>, ScanError> {
    let names = list_dir(ctx, &ctx.disk_path(rel)).await?;
    let results = try_join_all(names.into_iter().map(|name| scan_entry(ctx, rel, name))).await?;
    Ok(results.into_iter().flatten().collect())
}

/// Entry names of one directory, in listing order.
///
/// The directory handle and its permit are released on return.
async fn list_dir(ctx: &ScanContext, dir_path: &Path) -> Result<Vec<String>, ScanError> {
    let _permit = ctx.permit(dir_path).await?;
    let mut read_dir = fs::read_dir(dir_path)
        .await
        .map_err(|e| ScanError::io(dir_path, e))?;

    let mut names = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .map_err(|e| ScanError::io(dir_path, e))?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}

/// Scan one entry of the directory at `dir`.
///
/// Boxed because directories recurse back through [`scan_children`].
fn scan_entry<'a>(
    ctx: &'a ScanContext,
    dir: &'a str,
    name: String,
) -> BoxFuture<'a, Result<Option<ScanNode>, ScanError>> {
    async move {
        if name.starts_with('.') {
            return Ok(None);
        }

        let rel = join_rel(dir, &name);
        let disk_path = ctx.disk_path(&rel);
        let metadata = {
            let _permit = ctx.permit(&disk_path).await?;
            fs::symlink_metadata(&disk_path)
                .await
                .map_err(|e| ScanError::io(&disk_path, e))?
        };
        let file_type = metadata.file_type();

        if file_type.is_file() {
            if !ctx.filter.matches(&ctx.match_path(&rel)) {
                trace!(path = %rel, "file filtered out");
                return Ok(None);
            }
            Ok(Some(FileNode::from_path(rel).into()))
        } else if file_type.is_dir() {
            let children = scan_children(ctx, &rel).await?;
            Ok(Some(DirNode::new(rel, name, children).into()))
        } else {
            trace!(path = %rel, "skipping non-regular entry");
            Ok(None)
        }
    }
    .boxed()
}

fn join_rel(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Root as it appears in match paths: `/` separated, without `.` segments
/// or trailing slashes.
fn slash_root(root: &Path) -> String {
    let display = root.to_string_lossy().replace('\\', "/");
    let joined = display
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect::<Vec<_>>()
        .join("/");

    if display.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        stdfs::create_dir_all(root.join("blog/drafts")).unwrap();
        stdfs::create_dir(root.join(".git")).unwrap();

        stdfs::write(root.join("index.js"), "").unwrap();
        stdfs::write(root.join("_layout.js"), "").unwrap();
        stdfs::write(root.join(".env"), "").unwrap();
        stdfs::write(root.join("blog/index.js"), "").unwrap();
        stdfs::write(root.join("blog/drafts/wip.md"), "").unwrap();
        stdfs::write(root.join(".git/config"), "").unwrap();

        temp
    }

    fn find<'a>(nodes: &'a [ScanNode], path: &str) -> Option<&'a ScanNode> {
        for node in nodes {
            if node.path() == path {
                return Some(node);
            }
            if let ScanNode::Dir(dir) = node {
                if let Some(found) = find(&dir.children, path) {
                    return Some(found);
                }
            }
        }
        None
    }

    #[tokio::test]
    async fn test_basic_scan() {
        let temp = create_test_tree();
        let tree = DirScanner::new()
            .scan(&ScanConfig::new(temp.path()))
            .await
            .unwrap();

        let stats = TreeStats::from_entries(&tree);
        assert_eq!(stats.total_files, 4);
        assert_eq!(stats.total_dirs, 2);

        let wip = find(&tree, "blog/drafts/wip.md").and_then(ScanNode::as_file).unwrap();
        assert_eq!(wip.name, "wip");
        assert_eq!(wip.extension, ".md");

        let drafts = find(&tree, "blog/drafts").and_then(ScanNode::as_dir).unwrap();
        assert_eq!(drafts.name, "drafts");
    }

    #[tokio::test]
    async fn test_hidden_entries_pruned() {
        let temp = create_test_tree();
        let tree = DirScanner::new()
            .scan(&ScanConfig::new(temp.path()))
            .await
            .unwrap();

        assert!(find(&tree, ".env").is_none());
        assert!(find(&tree, ".git").is_none());
        assert!(find(&tree, ".git/config").is_none());
    }

    #[tokio::test]
    async fn test_exclude_pattern_matches_full_path() {
        let temp = create_test_tree();
        let config = ScanConfig::new(temp.path()).exclude(r"/drafts/");
        let tree = DirScanner::new().scan(&config).await.unwrap();

        // Directory survives, its excluded file does not.
        let drafts = find(&tree, "blog/drafts").and_then(ScanNode::as_dir).unwrap();
        assert!(drafts.children.is_empty());
        assert!(find(&tree, "blog/index.js").is_some());
    }

    #[tokio::test]
    async fn test_include_pattern() {
        let temp = create_test_tree();
        let config = ScanConfig::new(temp.path()).include(r"\.js$");
        let tree = DirScanner::new().scan(&config).await.unwrap();

        assert!(find(&tree, "blog/drafts/wip.md").is_none());
        assert_eq!(TreeStats::from_entries(&tree).total_files, 3);
    }

    #[tokio::test]
    async fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let config = ScanConfig::new(temp.path().join("nope"));
        let err = DirScanner::new().scan(&config).await.unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_file_root_yields_empty() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("page.js");
        stdfs::write(&file, "").unwrap();

        let tree = DirScanner::new().scan(&ScanConfig::new(&file)).await.unwrap();
        assert!(tree.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinks_dropped() {
        let temp = create_test_tree();
        std::os::unix::fs::symlink(temp.path().join("index.js"), temp.path().join("alias.js"))
            .unwrap();

        let tree = DirScanner::new()
            .scan(&ScanConfig::new(temp.path()))
            .await
            .unwrap();
        assert!(find(&tree, "alias.js").is_none());
        assert!(find(&tree, "index.js").is_some());
    }

    #[test]
    fn test_slash_root_drops_dot_segments() {
        assert_eq!(slash_root(Path::new("./pages")), "pages");
        assert_eq!(slash_root(Path::new("././src/./pages/")), "src/pages");
        assert_eq!(slash_root(Path::new(".")), "");
        assert_eq!(slash_root(Path::new("/srv/pages/")), "/srv/pages");
        assert_eq!(slash_root(Path::new("/")), "/");
    }

    #[test]
    fn test_match_path_for_relative_roots() {
        let ctx = |root: &str| ScanContext {
            root: PathBuf::from(root),
            root_display: slash_root(Path::new(root)),
            filter: PathFilter::from_config(&ScanConfig::new(root)).unwrap(),
            io_permits: Semaphore::new(1),
        };

        assert_eq!(ctx("./pages").match_path("blog/index.js"), "pages/blog/index.js");
        assert_eq!(ctx(".").match_path("index.js"), "index.js");
        assert_eq!(ctx("/").match_path("index.js"), "/index.js");

        let filter = PathFilter::from_config(&ScanConfig::new("./pages").exclude(r"^pages/blog/"))
            .unwrap();
        assert!(!filter.matches(&ctx("./pages").match_path("blog/index.js")));
        assert!(filter.matches(&ctx("./pages").match_path("index.js")));
    }

    #[tokio::test]
    async fn test_single_permit_does_not_deadlock() {
        let temp = create_test_tree();
        let ctx = ScanContext {
            root: temp.path().to_path_buf(),
            root_display: slash_root(temp.path()),
            filter: PathFilter::from_config(&ScanConfig::new(temp.path())).unwrap(),
            io_permits: Semaphore::new(1),
        };

        let tree = scan_children(&ctx, "").await.unwrap();
        assert_eq!(TreeStats::from_entries(&tree).total_files, 4);
        assert_eq!(ctx.io_permits.available_permits(), 1);
    }

    #[test]
    fn test_join_rel() {
        assert_eq!(join_rel("", "a"), "a");
        assert_eq!(join_rel("a/b", "c.js"), "a/b/c.js");
    }
}
