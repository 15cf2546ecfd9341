//! Disambiguator configuration
//!
//! Loads filter thresholds, filter stage order, the entity URI decoding rule
//! and subgraph settings from YAML, with environment overrides.
//!
//! ```yaml
//! filters:
//!   min_support: 50
//!   best_k_prior: 10
//!   order: [min_support, best_k_prior, best_k_support]
//! uri_decoding: percent
//! subgraph:
//!   max_distance: 2
//! ```
//!
//! Every threshold is optional; a missing or non-positive threshold disables
//! its stage.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::error::ConfigError;

/// Env var holding the path of the YAML config file
pub const CONFIG_PATH_ENV: &str = "COLLECTIVE_CONFIG";
pub const MIN_SUPPORT_ENV: &str = "COLLECTIVE_MIN_SUPPORT";
pub const BEST_K_SUPPORT_ENV: &str = "COLLECTIVE_BEST_K_SUPPORT";
pub const BEST_K_PRIOR_ENV: &str = "COLLECTIVE_BEST_K_PRIOR";
pub const FILTER_ORDER_ENV: &str = "COLLECTIVE_FILTER_ORDER";
pub const URI_DECODING_ENV: &str = "COLLECTIVE_URI_DECODING";

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisambiguatorConfig {
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default)]
    pub uri_decoding: UriDecoding,
    /// Escapes decoded by [`UriDecoding::Selective`]; empty means the built-in set
    #[serde(default)]
    pub selective_escapes: Vec<String>,
    #[serde(default)]
    pub subgraph: SubgraphConfig,
}

/// Candidate filter thresholds and stage order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Drop candidates with support below this value
    #[serde(default)]
    pub min_support: Option<i64>,
    /// Keep at most this many candidates per mention, ranked by support
    #[serde(default)]
    pub best_k_support: Option<i64>,
    /// Keep at most this many candidates per mention, ranked by prior
    #[serde(default)]
    pub best_k_prior: Option<i64>,
    /// Order the enabled stages run in
    #[serde(default = "default_order")]
    pub order: Vec<FilterKind>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_support: None,
            best_k_support: None,
            best_k_prior: None,
            order: default_order(),
        }
    }
}

fn default_order() -> Vec<FilterKind> {
    vec![
        FilterKind::MinSupport,
        FilterKind::BestKPrior,
        FilterKind::BestKSupport,
    ]
}

impl FilterConfig {
    /// Threshold for a stage, or None when the stage is disabled
    pub fn threshold(&self, kind: FilterKind) -> Option<u64> {
        let raw = match kind {
            FilterKind::MinSupport => self.min_support,
            FilterKind::BestKSupport => self.best_k_support,
            FilterKind::BestKPrior => self.best_k_prior,
        };
        raw.filter(|v| *v > 0).map(|v| v as u64)
    }
}

/// Filter stage kinds selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    MinSupport,
    BestKSupport,
    BestKPrior,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::MinSupport => "min_support",
            FilterKind::BestKSupport => "best_k_support",
            FilterKind::BestKPrior => "best_k_prior",
        }
    }
}

impl FromStr for FilterKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "min_support" => Ok(FilterKind::MinSupport),
            "best_k_support" => Ok(FilterKind::BestKSupport),
            "best_k_prior" => Ok(FilterKind::BestKPrior),
            other => Err(ConfigError::UnknownStage(other.to_string())),
        }
    }
}

/// How entity URIs are canonicalised before graph lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UriDecoding {
    /// Full percent-decoding
    #[default]
    Percent,
    /// Only decode a fixed set of escapes (parentheses, apostrophe, ...)
    Selective,
    /// Hand URIs to the graph unchanged
    #[serde(rename = "none")]
    Verbatim,
}

impl FromStr for UriDecoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "percent" => Ok(UriDecoding::Percent),
            "selective" => Ok(UriDecoding::Selective),
            "none" => Ok(UriDecoding::Verbatim),
            other => Err(ConfigError::UnknownDecoding(other.to_string())),
        }
    }
}

/// Settings for the reference path-based subgraph construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphConfig {
    /// Maximum path length (in edges) explored between candidate senses
    #[serde(default = "default_max_distance")]
    pub max_distance: usize,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            max_distance: default_max_distance(),
        }
    }
}

fn default_max_distance() -> usize {
    2
}

impl DisambiguatorConfig {
    /// Load from a YAML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading disambiguator configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::load_from_str(&content)
    }

    /// Load from a YAML string
    pub fn load_from_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `COLLECTIVE_CONFIG` (or defaults), then apply env overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Override filter and decoding settings from a key lookup (normally the process env)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_threshold = |key: &str| -> Result<Option<i64>, ConfigError> {
            match lookup(key) {
                None => Ok(None),
                Some(value) => value
                    .trim()
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|_| ConfigError::InvalidEnv {
                        key: key.to_string(),
                        value,
                    }),
            }
        };

        if let Some(v) = parse_threshold(MIN_SUPPORT_ENV)? {
            self.filters.min_support = Some(v);
        }
        if let Some(v) = parse_threshold(BEST_K_SUPPORT_ENV)? {
            self.filters.best_k_support = Some(v);
        }
        if let Some(v) = parse_threshold(BEST_K_PRIOR_ENV)? {
            self.filters.best_k_prior = Some(v);
        }
        if let Some(order) = lookup(FILTER_ORDER_ENV) {
            self.filters.order = order
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(FilterKind::from_str)
                .collect::<Result<Vec<_>, _>>()?;
        }
        if let Some(decoding) = lookup(URI_DECODING_ENV) {
            self.uri_decoding = decoding.parse()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_disable_all_stages() {
        let config = DisambiguatorConfig::default();
        assert_eq!(config.filters.threshold(FilterKind::MinSupport), None);
        assert_eq!(config.filters.threshold(FilterKind::BestKPrior), None);
        assert_eq!(config.filters.order.len(), 3);
        assert_eq!(config.uri_decoding, UriDecoding::Percent);
        assert_eq!(config.subgraph.max_distance, 2);
    }

    #[test]
    fn test_non_positive_threshold_disables_stage() {
        let filters = FilterConfig {
            min_support: Some(0),
            best_k_support: Some(-3),
            best_k_prior: Some(5),
            ..FilterConfig::default()
        };
        assert_eq!(filters.threshold(FilterKind::MinSupport), None);
        assert_eq!(filters.threshold(FilterKind::BestKSupport), None);
        assert_eq!(filters.threshold(FilterKind::BestKPrior), Some(5));
    }

    #[test]
    fn test_load_from_str() {
        let yaml = r#"
filters:
  min_support: 50
  best_k_support: 3
  order: [best_k_support, min_support]
uri_decoding: none
subgraph:
  max_distance: 3
"#;
        let config = DisambiguatorConfig::load_from_str(yaml).unwrap();
        assert_eq!(config.filters.min_support, Some(50));
        assert_eq!(
            config.filters.order,
            vec![FilterKind::BestKSupport, FilterKind::MinSupport]
        );
        assert_eq!(config.uri_decoding, UriDecoding::Verbatim);
        assert_eq!(config.subgraph.max_distance, 3);
    }

    #[test]
    fn test_load_rejects_unknown_stage() {
        let yaml = "filters:\n  order: [min_support, best_k_magic]\n";
        let err = DisambiguatorConfig::load_from_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "filters:\n  best_k_prior: 7").unwrap();

        let config = DisambiguatorConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.filters.threshold(FilterKind::BestKPrior), Some(7));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DisambiguatorConfig::load_from_file(Path::new("/nonexistent/collective.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (MIN_SUPPORT_ENV, "20"),
            (FILTER_ORDER_ENV, "best_k_prior, min_support"),
            (URI_DECODING_ENV, "none"),
        ]
        .into_iter()
        .collect();

        let mut config = DisambiguatorConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.filters.min_support, Some(20));
        assert_eq!(
            config.filters.order,
            vec![FilterKind::BestKPrior, FilterKind::MinSupport]
        );
        assert_eq!(config.uri_decoding, UriDecoding::Verbatim);
    }

    #[test]
    fn test_overrides_reject_garbage() {
        let mut config = DisambiguatorConfig::default();
        let err = config
            .apply_overrides(|key| (key == BEST_K_SUPPORT_ENV).then(|| "three".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));

        let err = config
            .apply_overrides(|key| (key == FILTER_ORDER_ENV).then(|| "top_k".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStage(_)));

        let err = config
            .apply_overrides(|key| (key == URI_DECODING_ENV).then(|| "base64".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDecoding(_)));
    }
}
