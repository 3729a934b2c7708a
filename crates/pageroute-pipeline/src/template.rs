//! Output templates.

use std::path::Path;

use tokio::fs;
use tracing::error;

/// Token replaced by the rendered routes.
pub const ROUTE_PLACEHOLDER: &str = "@routeConfig";

/// Template used when none is configured.
pub const DEFAULT_TEMPLATE: &str = "export default @routeConfig;";

/// Replace every placeholder in `template` with the rendered routes.
pub fn fill_template(template: &str, rendered: &str) -> String {
    template.replace(ROUTE_PLACEHOLDER, rendered)
}

/// Pick the template for a run.
///
/// A template file wins over the inline template. If it cannot be read the
/// failure is logged and the inline template is used instead.
pub async fn resolve_template(inline: &str, file: Option<&Path>) -> String {
    let Some(file) = file else {
        return inline.to_string();
    };

    match fs::read_to_string(file).await {
        Ok(template) => template,
        Err(err) => {
            error!(path = %file.display(), error = %err, "failed to read template file");
            inline.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fill_replaces_every_placeholder() {
        let filled = fill_template("const a = @routeConfig;\nconst b = @routeConfig;", "[]");
        assert_eq!(filled, "const a = [];\nconst b = [];");
    }

    #[test]
    fn test_fill_default_template() {
        assert_eq!(fill_template(DEFAULT_TEMPLATE, "[]"), "export default [];");
    }

    #[tokio::test]
    async fn test_template_file_preferred() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("routes.tpl");
        std::fs::write(&file, "module.exports = @routeConfig;").unwrap();

        let template = resolve_template(DEFAULT_TEMPLATE, Some(&file)).await;
        assert_eq!(template, "module.exports = @routeConfig;");
    }

    #[tokio::test]
    async fn test_unreadable_template_falls_back() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.tpl");

        let template = resolve_template("inline @routeConfig", Some(&missing)).await;
        assert_eq!(template, "inline @routeConfig");
    }

    #[tokio::test]
    async fn test_no_template_file() {
        assert_eq!(resolve_template(DEFAULT_TEMPLATE, None).await, DEFAULT_TEMPLATE);
    }
}
