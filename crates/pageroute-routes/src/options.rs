//! Route builder policies and their defaults.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use pageroute_core::{FileNode, RouteNode, RouteValue};

/// Extensions routed by default.
pub const DEFAULT_EXTENSIONS: [&str; 5] = [".js", ".jsx", ".ts", ".tsx", ".vue"];

/// File name (extension stripped) that marks a layout.
pub const DEFAULT_LAYOUT_NAME: &str = "_layout";

/// File name (extension stripped) that maps to its directory's path.
pub const DEFAULT_INDEX_NAME: &str = "index";

/// Prefix of default component references.
pub const DEFAULT_COMPONENT_PREFIX: &str = "@/pages/";

/// Extension in the form file nodes carry: `js` becomes `.js`.
///
/// The empty string is kept as is; it matches files without an extension.
pub fn normalize_extension(ext: impl Into<String>) -> String {
    let ext = ext.into();
    if ext.is_empty() || ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

type Predicate = Arc<dyn Fn(&FileNode) -> bool + Send + Sync>;
type ComponentFn = Arc<dyn Fn(&FileNode) -> RouteValue + Send + Sync>;
type RoutePathFn = Arc<dyn Fn(&FileNode) -> String + Send + Sync>;
type ModifyPathFn = Arc<dyn Fn(String, &FileNode) -> String + Send + Sync>;
type FormatterFn = Arc<dyn Fn(RouteNode, &FileNode) -> RouteNode + Send + Sync>;

/// Policies used when folding a scanned tree into routes.
///
/// Every policy has a default; custom hooks replace the default policy
/// entirely. Options are cheap to clone since hooks are reference counted.
#[derive(Clone)]
pub struct RouteOptions {
    /// Routable extensions, dot included. Empty disables the check.
    pub extensions: HashSet<String>,
    /// Name marking a layout file for the default layout policy.
    pub layout_name: String,
    /// Name marking an index file for the default route path policy.
    pub index_name: String,
    /// Prefix for the default component reference.
    pub component_prefix: String,
    filter: Option<Predicate>,
    is_layout: Option<Predicate>,
    component_path: Option<ComponentFn>,
    route_path: Option<RoutePathFn>,
    modify_route_path: Option<ModifyPathFn>,
    formatter: Option<FormatterFn>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            layout_name: DEFAULT_LAYOUT_NAME.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            component_prefix: DEFAULT_COMPONENT_PREFIX.to_string(),
            filter: None,
            is_layout: None,
            component_path: None,
            route_path: None,
            modify_route_path: None,
            formatter: None,
        }
    }
}

impl fmt::Debug for RouteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteOptions")
            .field("extensions", &self.extensions)
            .field("layout_name", &self.layout_name)
            .field("index_name", &self.index_name)
            .field("component_prefix", &self.component_prefix)
            .field("filter", &self.filter.is_some())
            .field("is_layout", &self.is_layout.is_some())
            .field("component_path", &self.component_path.is_some())
            .field("route_path", &self.route_path.is_some())
            .field("modify_route_path", &self.modify_route_path.is_some())
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl RouteOptions {
    /// Create options with every default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extension allow-list. A missing leading dot is added.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.into()))
            .collect();
        self
    }

    /// Route every extension.
    pub fn with_any_extension(mut self) -> Self {
        self.extensions.clear();
        self
    }

    /// Set the layout marker name.
    pub fn with_layout_name(mut self, name: impl Into<String>) -> Self {
        self.layout_name = name.into();
        self
    }

    /// Set the index marker name.
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    /// Set the prefix of default component references.
    pub fn with_component_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.component_prefix = prefix.into();
        self
    }

    /// Decide which files take part in routing.
    pub fn with_filter(mut self, f: impl Fn(&FileNode) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(f));
        self
    }

    /// Decide which files are layouts.
    pub fn with_is_layout(
        mut self,
        f: impl Fn(&FileNode) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_layout = Some(Arc::new(f));
        self
    }

    /// Derive component references.
    pub fn with_component_path<V>(
        mut self,
        f: impl Fn(&FileNode) -> V + Send + Sync + 'static,
    ) -> Self
    where
        V: Into<RouteValue>,
    {
        self.component_path = Some(Arc::new(move |file| f(file).into()));
        self
    }

    /// Derive route paths.
    pub fn with_route_path(
        mut self,
        f: impl Fn(&FileNode) -> String + Send + Sync + 'static,
    ) -> Self {
        self.route_path = Some(Arc::new(f));
        self
    }

    /// Post-process every derived route path.
    pub fn with_modify_route_path(
        mut self,
        f: impl Fn(String, &FileNode) -> String + Send + Sync + 'static,
    ) -> Self {
        self.modify_route_path = Some(Arc::new(f));
        self
    }

    /// Rewrite each route node once it has been created.
    ///
    /// Layout nodes are passed before their children are attached.
    pub fn with_formatter(
        mut self,
        f: impl Fn(RouteNode, &FileNode) -> RouteNode + Send + Sync + 'static,
    ) -> Self {
        self.formatter = Some(Arc::new(f));
        self
    }

    /// Whether the extension allow-list admits this file.
    pub fn allows_extension(&self, file: &FileNode) -> bool {
        self.extensions.is_empty() || self.extensions.contains(file.extension.as_str())
    }

    /// Whether the filter admits this file.
    pub fn accepts(&self, file: &FileNode) -> bool {
        self.filter.as_ref().is_none_or(|f| f(file))
    }

    /// Whether this file is a layout.
    pub fn is_layout(&self, file: &FileNode) -> bool {
        match &self.is_layout {
            Some(f) => f(file),
            None => file.name == self.layout_name.as_str(),
        }
    }

    /// Component reference for this file.
    pub fn component_path(&self, file: &FileNode) -> RouteValue {
        match &self.component_path {
            Some(f) => f(file),
            None => RouteValue::Str(format!("{}{}", self.component_prefix, file.path)),
        }
    }

    /// Route path for this file, after `modify_route_path`.
    pub fn route_path(&self, file: &FileNode) -> String {
        let path = match &self.route_path {
            Some(f) => f(file),
            None => self.default_route_path(file),
        };
        match &self.modify_route_path {
            Some(f) => f(path, file),
            None => path,
        }
    }

    /// Apply the formatter, if any.
    pub fn format(&self, route: RouteNode, file: &FileNode) -> RouteNode {
        match &self.formatter {
            Some(f) => f(route, file),
            None => route,
        }
    }

    /// Layout and index files map to their directory, anything else to the
    /// directory joined with the file name. The root directory is `/`.
    fn default_route_path(&self, file: &FileNode) -> String {
        let dir = file.parent_dir();
        let is_marker = file.name == self.layout_name.as_str()
            || file.name == self.index_name.as_str();

        let route = if is_marker {
            dir.to_string()
        } else if dir == "." {
            file.name.to_string()
        } else {
            format!("{dir}/{}", file.name)
        };

        if route == "." {
            "/".to_string()
        } else {
            format!("/{route}")
        }
    }
}
