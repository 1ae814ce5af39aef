use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const ENV_DEFAULT_ROWS: &str = "FILTER_DEFAULT_ROWS";
pub const ENV_DEFAULT_FIRST: &str = "FILTER_DEFAULT_FIRST";

/// Paging defaults and keyword typing used by the filter accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Page size assumed when a filter has no `rows` term.
    pub default_rows: i64,
    /// Start index assumed when a filter has no `first` term.
    pub default_first: i64,
    /// Keywords whose values `get` returns as numbers.
    pub numeric_keywords: Vec<String>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            default_rows: 10,
            default_first: 1,
            numeric_keywords: ["first", "rows", "min_qod", "apply_overrides", "autofp"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl FilterSettings {
    pub fn from_json(source: &str) -> Result<Self, FilterError> {
        let settings: FilterSettings = serde_json::from_str(source)?;
        settings.validate()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FilterError> {
        let path = path.as_ref();
        debug!("Loading filter settings from {}", path.display());
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Apply `FILTER_DEFAULT_ROWS` / `FILTER_DEFAULT_FIRST` from the environment.
    pub fn with_env_overrides(self) -> Result<Self, FilterError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, FilterError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_DEFAULT_ROWS) {
            self.default_rows = parse_override(ENV_DEFAULT_ROWS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_DEFAULT_FIRST) {
            self.default_first = parse_override(ENV_DEFAULT_FIRST, &raw)?;
        }
        self.validate()
    }

    pub fn validate(self) -> Result<Self, FilterError> {
        if self.default_rows <= 0 {
            return Err(FilterError::InvalidSettings(format!(
                "default_rows must be positive, got {}",
                self.default_rows
            )));
        }
        if self.default_first < 1 {
            return Err(FilterError::InvalidSettings(format!(
                "default_first must be at least 1, got {}",
                self.default_first
            )));
        }
        Ok(self)
    }

    pub fn is_numeric(&self, keyword: &str) -> bool {
        self.numeric_keywords.iter().any(|k| k == keyword)
    }
}

fn parse_override(name: &str, raw: &str) -> Result<i64, FilterError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| FilterError::InvalidSettings(format!("{} is not a number: '{}'", name, raw)))
}
