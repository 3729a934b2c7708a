//! Pipeline configuration.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use pageroute_core::{RouteValue, ScanConfig};
use pageroute_routes::{
    DEFAULT_COMPONENT_PREFIX, DEFAULT_EXTENSIONS, DEFAULT_INDEX_NAME, DEFAULT_LAYOUT_NAME,
    RouteOptions,
};

use crate::error::PipelineError;
use crate::render::DEFAULT_CHILDREN_KEY;
use crate::template::DEFAULT_TEMPLATE;

/// Placeholder for the file path in `component_template`.
const PATH_PLACEHOLDER: &str = "{path}";

/// Configuration for a route generation run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the page files.
    #[builder(default = "default_page_root()")]
    pub page_root: PathBuf,

    /// Regex patterns a file path must match (empty = all).
    #[builder(default)]
    pub includes: Vec<String>,

    /// Regex patterns a file path must not match.
    #[builder(default)]
    pub excludes: Vec<String>,

    /// Routable extensions; a missing leading dot is added (empty = all).
    #[builder(default = "default_extensions()")]
    pub extensions: Vec<String>,

    /// File name marking a layout.
    #[builder(default = "DEFAULT_LAYOUT_NAME.to_string()")]
    pub layout_name: String,

    /// File name mapped to its directory's route.
    #[builder(default = "DEFAULT_INDEX_NAME.to_string()")]
    pub index_name: String,

    /// Prefix of component references.
    #[builder(default = "DEFAULT_COMPONENT_PREFIX.to_string()")]
    pub component_prefix: String,

    /// Component reference template with a `{path}` placeholder.
    ///
    /// Takes precedence over `component_prefix`. The tagged form
    /// `script$...$` yields raw code fragments.
    #[builder(default)]
    pub component_template: Option<String>,

    /// Key under which nested routes are rendered.
    #[builder(default = "DEFAULT_CHILDREN_KEY.to_string()")]
    pub children_key: String,

    /// Inline output template.
    #[builder(default = "DEFAULT_TEMPLATE.to_string()")]
    pub template: String,

    /// Template file, preferred over `template` when readable.
    #[builder(default)]
    pub template_file: Option<PathBuf>,

    /// Output file (None = stdout).
    #[builder(default)]
    pub output: Option<PathBuf>,

    /// Message logged after each write. Empty disables it.
    #[builder(default = "default_success_tips()")]
    pub success_tips: Option<String>,

    /// Delay used to coalesce bursts of file changes, in milliseconds.
    #[builder(default = "200")]
    pub debounce_ms: u64,
}

fn default_page_root() -> PathBuf {
    PathBuf::from("src/pages")
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

fn default_success_tips() -> Option<String> {
    Some("[Success] Routes updated.".to_string())
}

impl PipelineConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.page_root {
            if root.as_os_str().is_empty() {
                return Err("Page root cannot be empty".to_string());
            }
        }
        if let Some(ref key) = self.children_key {
            if key.is_empty() {
                return Err("Children key cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_root: default_page_root(),
            includes: Vec::new(),
            excludes: Vec::new(),
            extensions: default_extensions(),
            layout_name: DEFAULT_LAYOUT_NAME.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            component_prefix: DEFAULT_COMPONENT_PREFIX.to_string(),
            component_template: None,
            children_key: DEFAULT_CHILDREN_KEY.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            template_file: None,
            output: None,
            success_tips: default_success_tips(),
            debounce_ms: 200,
        }
    }
}

impl PipelineConfig {
    /// Create a new config builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Load a config from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PipelineError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| PipelineError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Message to log after a write, if any.
    pub fn success_message(&self) -> Option<&str> {
        self.success_tips.as_deref().filter(|tips| !tips.is_empty())
    }

    /// Scan configuration for the page root.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            root: self.page_root.clone(),
            includes: self.includes.clone(),
            excludes: self.excludes.clone(),
        }
    }

    /// Route builder options derived from this config.
    pub fn route_options(&self) -> RouteOptions {
        let options = RouteOptions::default()
            .with_extensions(self.extensions.iter().cloned())
            .with_layout_name(self.layout_name.clone())
            .with_index_name(self.index_name.clone())
            .with_component_prefix(self.component_prefix.clone());

        match &self.component_template {
            Some(template) => {
                let template = template.clone();
                options.with_component_path(move |file| {
                    RouteValue::parse(&template.replace(PATH_PLACEHOLDER, &file.path))
                })
            }
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageroute_core::FileNode;

    #[test]
    fn test_config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.page_root, PathBuf::from("src/pages"));
        assert_eq!(config.extensions.len(), 5);
        assert_eq!(config.template, "export default @routeConfig;");
        assert_eq!(config.debounce_ms, 200);
        assert!(config.output.is_none());
    }

    #[test]
    fn test_empty_success_tips_disable_message() {
        let config: PipelineConfig = toml::from_str("success_tips = \"\"").unwrap();
        assert_eq!(config.success_tips.as_deref(), Some(""));
        assert_eq!(config.success_message(), None);

        let config = PipelineConfig::default();
        assert_eq!(config.success_message(), Some("[Success] Routes updated."));
    }

    #[test]
    fn test_extensions_without_dot_from_toml() {
        let config: PipelineConfig = toml::from_str("extensions = [\"js\"]").unwrap();
        let options = config.route_options();
        assert!(options.allows_extension(&FileNode::from_path("a/index.js")));
        assert!(!options.allows_extension(&FileNode::from_path("a/index.vue")));
    }

    #[test]
    fn test_builder_matches_default() {
        let built = PipelineConfig::builder().build().unwrap();
        let default = PipelineConfig::default();
        assert_eq!(built.page_root, default.page_root);
        assert_eq!(built.children_key, default.children_key);
        assert_eq!(built.success_tips, default.success_tips);
    }

    #[test]
    fn test_builder_rejects_empty_children_key() {
        assert!(PipelineConfig::builder().children_key("").build().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: PipelineConfig = toml::from_str(
            r#"
            page_root = "app/pages"
            excludes = ["/components/"]
            output = "app/routes.js"
            "#,
        )
        .unwrap();

        assert_eq!(config.page_root, PathBuf::from("app/pages"));
        assert_eq!(config.excludes, vec!["/components/"]);
        assert_eq!(config.output, Some(PathBuf::from("app/routes.js")));
        assert_eq!(config.layout_name, "_layout");
    }

    #[test]
    fn test_component_template_yields_raw_fragments() {
        let config = PipelineConfig {
            component_template: Some("script$() => import('@/pages/{path}')$".to_string()),
            ..PipelineConfig::default()
        };
        let options = config.route_options();
        let component = options.component_path(&FileNode::from_path("a/index.js"));
        assert_eq!(component, RouteValue::Raw("() => import('@/pages/a/index.js')".to_string()));
    }

    #[test]
    fn test_scan_config_carries_patterns() {
        let config = PipelineConfig {
            includes: vec![r"\.js$".to_string()],
            ..PipelineConfig::default()
        };
        let scan = config.scan_config();
        assert_eq!(scan.root, PathBuf::from("src/pages"));
        assert_eq!(scan.includes, vec![r"\.js$"]);
    }
}
