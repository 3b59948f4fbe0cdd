//! Extension filters for file entries

use serde::{Deserialize, Serialize};

/// Include/exclude suffix lists. Applied to files only; directories are always
/// descended into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionFilter {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ExtensionFilter {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// Build from comma-separated lists such as `.py,.md`. Blank items are dropped.
    pub fn from_csv(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: include.map(parse_csv).unwrap_or_default(),
            exclude: exclude.map(parse_csv).unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Whether a file with this name survives the filter.
    ///
    /// Exclusion wins; an empty include list admits everything not excluded.
    pub fn allows(&self, file_name: &str) -> bool {
        if self.exclude.iter().any(|ext| file_name.ends_with(ext.as_str())) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
