//! Configuration layer
//!
//! Loads the YAML configuration that drives scoring:
//!
//! ```yaml
//! categories:
//!   - name: extra small
//!     lte: 10
//!   - name: extra large
//! scoring:
//!   formula: "- - + additions deletions comments whitespace"
//!   aliases:
//!     churn: "+ additions deletions"
//! testFilePatterns:
//!   - "*_test.rb"
//! ignoredFilePatterns:
//!   - "*.lock"
//! ```
//!
//! A user-supplied file replaces the built-in defaults per top-level key;
//! there is no deep merging. A top-level `diffsize:` wrapper key is
//! accepted and unwrapped, so the configuration can live inside a larger
//! file.

use crate::categories::{Category, Label};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// The scoring section of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    /// A prefix-notation expression combining features into a score
    pub formula: String,
    /// Named shorthands usable in the formula, each expanding to another
    /// prefix-notation expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<BTreeMap<String, String>>,
}

/// The full configuration surface, as read from a file. Every section is
/// optional; missing sections fall back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<Scoring>,
    /// Globs matching files that should count as tests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_file_patterns: Option<Vec<String>>,
    /// Globs matching files that are excluded from scoring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignored_file_patterns: Option<Vec<String>>,
}

impl Configuration {
    /// Fill every missing section from the built-in defaults.
    pub fn resolve(self) -> ResolvedConfiguration {
        let defaults = default_configuration();
        let scoring = self.scoring.unwrap_or(defaults.scoring);
        ResolvedConfiguration {
            categories: self.categories.unwrap_or(defaults.categories),
            formula: scoring.formula,
            aliases: scoring.aliases.unwrap_or_default(),
            test_file_patterns: self
                .test_file_patterns
                .unwrap_or(defaults.test_file_patterns),
            ignored_file_patterns: self
                .ignored_file_patterns
                .unwrap_or(defaults.ignored_file_patterns),
        }
    }
}

/// A configuration with every section populated, ready to drive an
/// evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfiguration {
    pub categories: Vec<Category>,
    pub formula: String,
    pub aliases: BTreeMap<String, String>,
    pub test_file_patterns: Vec<String>,
    pub ignored_file_patterns: Vec<String>,
}

/// The defaults used for any section the user's configuration omits.
struct Defaults {
    categories: Vec<Category>,
    scoring: Scoring,
    test_file_patterns: Vec<String>,
    ignored_file_patterns: Vec<String>,
}

fn default_configuration() -> Defaults {
    let category = |name: &str, label: &str, color: &str, lte: Option<f64>, threshold: bool| {
        Category {
            name: name.to_string(),
            label: Some(Label {
                name: label.to_string(),
                description: None,
                color: Some(color.to_string()),
            }),
            lte,
            threshold,
        }
    };

    Defaults {
        categories: vec![
            category("extra small", "xs", "3cbf00", Some(10.0), false),
            category("small", "s", "5d9801", Some(30.0), false),
            category("medium", "m", "7f7203", Some(100.0), false),
            category("large", "l", "a14c05", Some(500.0), true),
            category("extra large", "xl", "c32607", None, false),
        ],
        scoring: Scoring {
            formula: "- - + additions deletions comments whitespace".to_string(),
            aliases: None,
        },
        test_file_patterns: vec![
            "*_test.rb".to_string(),
            "*-test.js".to_string(),
            "*-test.jsx".to_string(),
            "*-test.ts".to_string(),
            "*-test.tsx".to_string(),
            "test/*.yml".to_string(),
            "test/*.yaml".to_string(),
        ],
        ignored_file_patterns: vec![
            "*.rbi".to_string(),
            "CODEOWNERS".to_string(),
            "SERVICEOWNERS".to_string(),
        ],
    }
}

/// Load a configuration from a YAML file. A top-level `diffsize:` key is
/// unwrapped when present.
pub fn load(path: &Path) -> Result<Configuration, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let configuration = parse(&contents).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded configuration");
    Ok(configuration)
}

fn parse(contents: &str) -> Result<Configuration, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
    let unwrapped = value.get("diffsize").cloned();
    serde_yaml::from_value(unwrapped.unwrap_or(value))
}
