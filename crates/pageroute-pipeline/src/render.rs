//! JSON rendering of route trees.
//!
//! Output follows two-space indented JSON, except that
//! [`RouteValue::Raw`] fragments are written verbatim without quotes, so
//! the result is meant to be embedded in source code rather than parsed
//! back as JSON.

use pageroute_core::{RouteNode, RouteValue};

/// Key under which nested routes are rendered by default.
pub const DEFAULT_CHILDREN_KEY: &str = "children";

const INDENT: &str = "  ";

/// Render routes as an indented array literal.
pub fn render_routes(routes: &[RouteNode], children_key: &str) -> String {
    let mut out = String::new();
    write_routes(&mut out, routes, children_key, 0);
    out
}

fn write_routes(out: &mut String, routes: &[RouteNode], children_key: &str, depth: usize) {
    if routes.is_empty() {
        out.push_str("[]");
        return;
    }

    out.push_str("[\n");
    for (i, route) in routes.iter().enumerate() {
        push_indent(out, depth + 1);
        write_route(out, route, children_key, depth + 1);
        if i + 1 < routes.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, depth);
    out.push(']');
}

fn write_route(out: &mut String, route: &RouteNode, children_key: &str, depth: usize) {
    out.push_str("{\n");

    let inner = depth + 1;
    write_key(out, "path", inner);
    out.push_str(&quote(&route.path));

    out.push_str(",\n");
    write_key(out, "exact", inner);
    out.push_str(if route.exact { "true" } else { "false" });

    out.push_str(",\n");
    write_key(out, "component", inner);
    write_value(out, &route.component);

    for (key, value) in &route.extra {
        out.push_str(",\n");
        write_key(out, key, inner);
        write_value(out, value);
    }

    if let Some(children) = &route.children {
        out.push_str(",\n");
        write_key(out, children_key, inner);
        write_routes(out, children, children_key, inner);
    }

    out.push('\n');
    push_indent(out, depth);
    out.push('}');
}

fn write_key(out: &mut String, key: &str, depth: usize) {
    push_indent(out, depth);
    out.push_str(&quote(key));
    out.push_str(": ");
}

fn write_value(out: &mut String, value: &RouteValue) {
    match value {
        RouteValue::Str(s) => out.push_str(&quote(s)),
        RouteValue::Raw(code) => out.push_str(code),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// JSON string literal for `s`.
fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render_routes(&[], DEFAULT_CHILDREN_KEY), "[]");
    }

    #[test]
    fn test_render_matches_json_layout() {
        let mut layout = RouteNode::layout("/", "@/pages/_layout.js");
        layout.children = Some(vec![RouteNode::page("/", "@/pages/index.js")]);

        let expected = r#"[
  {
    "path": "/",
    "exact": false,
    "component": "@/pages/_layout.js",
    "children": [
      {
        "path": "/",
        "exact": true,
        "component": "@/pages/index.js"
      }
    ]
  }
]"#;
        assert_eq!(render_routes(&[layout], DEFAULT_CHILDREN_KEY), expected);
    }

    #[test]
    fn test_plain_output_is_valid_json() {
        let mut layout = RouteNode::layout("/", "@/pages/_layout.js");
        layout.children = Some(vec![
            RouteNode::page("/a\"b", "@/pages/a\"b.js").with_field("title", "Tab\there"),
        ]);

        let rendered = render_routes(&[layout.clone()], DEFAULT_CHILDREN_KEY);
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["children"][0]["path"], "/a\"b");
        assert_eq!(parsed[0]["children"][0]["title"], "Tab\there");
    }

    #[test]
    fn test_raw_fragments_unquoted() {
        let route = RouteNode::page("/", RouteValue::script("() => import('./index')"))
            .with_field("icon", RouteValue::parse("script$HomeIcon$"));

        let rendered = render_routes(&[route], DEFAULT_CHILDREN_KEY);
        assert!(rendered.contains(r#""component": () => import('./index')"#));
        assert!(rendered.contains(r#""icon": HomeIcon"#));
        assert!(!rendered.contains("script$"));
    }

    #[test]
    fn test_custom_children_key() {
        let layout = RouteNode::layout("/", "x");
        let rendered = render_routes(&[layout], "routes");
        assert!(rendered.contains(r#""routes": []"#));
        assert!(!rendered.contains("children"));
    }
}
