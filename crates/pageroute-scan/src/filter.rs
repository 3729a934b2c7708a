//! Include/exclude path filtering.

use regex::Regex;

use pageroute_core::{ScanConfig, ScanError};

/// Compiled include/exclude patterns.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    includes: Vec<Regex>,
    excludes: Vec<Regex>,
}

impl PathFilter {
    /// Compile the patterns of a scan config.
    pub fn from_config(config: &ScanConfig) -> Result<Self, ScanError> {
        Ok(Self {
            includes: compile(&config.includes)?,
            excludes: compile(&config.excludes)?,
        })
    }

    /// Check whether a file with this full path should be kept.
    ///
    /// With no include patterns every path is included.
    pub fn matches(&self, full_path: &str) -> bool {
        let included =
            self.includes.is_empty() || self.includes.iter().any(|re| re.is_match(full_path));
        included && !self.excludes.iter().any(|re| re.is_match(full_path))
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>, ScanError> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).map_err(|e| ScanError::invalid_pattern(pattern, e)))
        .collect()
}
