//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Regex patterns a file's full path must match (empty = match all).
    #[builder(default)]
    #[serde(default)]
    pub includes: Vec<String>,

    /// Regex patterns a file's full path must not match.
    #[builder(default)]
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }

        let patterns = self.includes.iter().chain(self.excludes.iter()).flatten();
        for pattern in patterns {
            if let Err(err) = Regex::new(pattern) {
                return Err(format!("Invalid pattern `{pattern}`: {err}"));
            }
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            includes: Vec::new(),
            excludes: Vec::new(),
        }
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.includes.push(pattern.into());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.excludes.push(pattern.into());
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
