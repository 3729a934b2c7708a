//! Route configuration nodes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix of the legacy tagged form for raw code fragments.
pub const SCRIPT_PREFIX: &str = "script$";

/// Suffix of the legacy tagged form for raw code fragments.
pub const SCRIPT_SUFFIX: &str = "$";

/// Value of a route field.
///
/// Strings are rendered as quoted JSON strings. Raw fragments are rendered
/// verbatim, which lets a route carry identifiers or function expressions
/// such as `() => import('./pages/index')`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RouteValue {
    /// Plain string literal.
    Str(String),
    /// Code fragment emitted unquoted.
    Raw(String),
}

impl RouteValue {
    /// Create a string value.
    pub fn string(value: impl Into<String>) -> Self {
        RouteValue::Str(value.into())
    }

    /// Create a raw code fragment.
    pub fn script(code: impl Into<String>) -> Self {
        RouteValue::Raw(code.into())
    }

    /// Parse a string that may use the tagged `script$<code>$` form.
    ///
    /// A tagged string becomes [`RouteValue::Raw`] holding everything between
    /// the first 7 and the last character; anything else stays a string.
    pub fn parse(value: &str) -> Self {
        if value.len() > SCRIPT_PREFIX.len()
            && value.starts_with(SCRIPT_PREFIX)
            && value.ends_with(SCRIPT_SUFFIX)
        {
            let code = &value[SCRIPT_PREFIX.len()..value.len() - SCRIPT_SUFFIX.len()];
            RouteValue::Raw(code.to_string())
        } else {
            RouteValue::Str(value.to_string())
        }
    }

    /// Text carried by the value, without quoting.
    pub fn as_str(&self) -> &str {
        match self {
            RouteValue::Str(s) | RouteValue::Raw(s) => s,
        }
    }

    /// Check if this is a raw code fragment.
    pub fn is_raw(&self) -> bool {
        matches!(self, RouteValue::Raw(_))
    }
}

impl From<String> for RouteValue {
    fn from(value: String) -> Self {
        RouteValue::Str(value)
    }
}

impl From<&str> for RouteValue {
    fn from(value: &str) -> Self {
        RouteValue::Str(value.to_string())
    }
}

/// One entry in the nested route configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// Absolute route path, always starting with `/`.
    pub path: String,
    /// True for leaf pages, false for layouts.
    pub exact: bool,
    /// Reference to the backing component.
    pub component: RouteValue,
    /// Additional fields, rendered after `component` in insertion order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, RouteValue>,
    /// Nested routes; present only on layout nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RouteNode>>,
}

impl RouteNode {
    /// Create a leaf page route.
    pub fn page(path: impl Into<String>, component: impl Into<RouteValue>) -> Self {
        Self {
            path: path.into(),
            exact: true,
            component: component.into(),
            extra: IndexMap::new(),
            children: None,
        }
    }

    /// Create a layout route with no children yet.
    pub fn layout(path: impl Into<String>, component: impl Into<RouteValue>) -> Self {
        Self {
            path: path.into(),
            exact: false,
            component: component.into(),
            extra: IndexMap::new(),
            children: Some(Vec::new()),
        }
    }

    /// Add an extra field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<RouteValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Check if this route is a layout.
    pub fn is_layout(&self) -> bool {
        self.children.is_some()
    }

    /// Total number of routes in this subtree, this one included.
    pub fn route_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(RouteNode::route_count)
            .sum::<usize>()
    }
}
