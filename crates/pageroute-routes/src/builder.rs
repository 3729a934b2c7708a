//! Recursive fold from scanned trees to route nodes.

use tracing::debug;

use pageroute_core::{FileNode, RouteNode, ScanNode};

use crate::options::RouteOptions;

/// Builds route configurations from scanned trees.
#[derive(Debug, Clone, Default)]
pub struct RouteBuilder {
    options: RouteOptions,
}

impl RouteBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom options.
    pub fn with_options(options: RouteOptions) -> Self {
        Self { options }
    }

    /// Options used by this builder.
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    /// Fold the top-level entries of a scan into routes.
    pub fn build(&self, tree: &[ScanNode]) -> Vec<RouteNode> {
        let mut routes = Vec::new();
        self.fold_level(tree, &mut routes);

        debug!(
            top_level = routes.len(),
            total = routes.iter().map(RouteNode::route_count).sum::<usize>(),
            "routes built"
        );
        routes
    }

    /// Fold one directory level, appending its routes to `out`.
    fn fold_level(&self, children: &[ScanNode], out: &mut Vec<RouteNode>) {
        let mut sub_routes = Vec::new();
        let mut layout_route: Option<RouteNode> = None;

        for child in children {
            match child {
                ScanNode::File(file) => {
                    if !self.options.allows_extension(file) || !self.options.accepts(file) {
                        continue;
                    }
                    if self.options.is_layout(file) {
                        // Last layout of a level wins.
                        layout_route = Some(self.layout_route(file));
                    } else {
                        sub_routes.push(self.page_route(file));
                    }
                }
                ScanNode::Dir(dir) => self.fold_level(&dir.children, &mut sub_routes),
            }
        }

        match layout_route {
            Some(mut layout) => {
                layout.children = Some(sub_routes);
                out.push(layout);
            }
            None => out.append(&mut sub_routes),
        }
    }

    fn page_route(&self, file: &FileNode) -> RouteNode {
        let route = RouteNode::page(
            self.options.route_path(file),
            self.options.component_path(file),
        );
        self.options.format(route, file)
    }

    fn layout_route(&self, file: &FileNode) -> RouteNode {
        let route = RouteNode::layout(
            self.options.route_path(file),
            self.options.component_path(file),
        );
        let mut route = self.options.format(route, file);
        // Formatters may not turn a layout into a leaf.
        route.exact = false;
        route
    }
}

/// Fold a scanned tree into routes with the given options.
pub fn build_routes(tree: &[ScanNode], options: &RouteOptions) -> Vec<RouteNode> {
    RouteBuilder::with_options(options.clone()).build(tree)
}
