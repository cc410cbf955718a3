//! Configuration types for prose-lint.

use crate::enumerator::FileSet;
use crate::exclusion::Exclusion;
use crate::resolver::RenderSource;
use crate::rule::RuleScope;
use crate::types::Severity;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for prose-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Severity threshold for a failing run (default: "error").
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Where rendered text comes from.
    #[serde(default)]
    pub render: RenderConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Resolves the failure threshold.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown severity name.
    pub fn fail_on(&self) -> Result<Severity, ConfigError> {
        match self.fail_on.as_deref() {
            None => Ok(Severity::Error),
            Some(name) => Severity::parse(name).ok_or_else(|| ConfigError::Invalid {
                message: format!(
                    "unknown fail_on severity `{name}`, expected: error, warning, info"
                ),
            }),
        }
    }

    /// Applies per-rule overrides to a rule's default scope.
    #[must_use]
    pub fn rule_scope(&self, rule_name: &str, default: RuleScope) -> RuleScope {
        match self.rules.get(rule_name) {
            Some(rule_config) => rule_config.apply_scope(default),
            None => default,
        }
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Documentation directories, relative to the root.
    #[serde(default = "default_docs")]
    pub docs: Vec<PathBuf>,

    /// Documentation file extensions (empty keeps every file).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether the documentation walk respects `.gitignore` files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Exclusions applied to every rule.
    #[serde(default)]
    pub exclude: Vec<Exclusion>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            docs: default_docs(),
            extensions: default_extensions(),
            respect_gitignore: true,
            exclude: Vec::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_docs() -> Vec<PathBuf> {
    vec![PathBuf::from("doc")]
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

fn default_true() -> bool {
    true
}

/// Rendered-text source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Directory holding `<identifier>.<extension>` renderings, relative to the root.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Extension of cache entries (default: "txt").
    #[serde(default = "default_cache_extension")]
    pub extension: String,

    /// Command printing the rendering of the path given as last argument.
    #[serde(default)]
    pub command: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            extension: default_cache_extension(),
            command: Vec::new(),
        }
    }
}

fn default_cache_extension() -> String {
    "txt".to_string()
}

impl RenderConfig {
    /// Converts the configuration into a [`RenderSource`].
    ///
    /// # Errors
    ///
    /// Returns an error if both `cache_dir` and `command` are set.
    pub fn source(&self) -> Result<RenderSource, ConfigError> {
        match (&self.cache_dir, self.command.split_first()) {
            (Some(_), Some(_)) => Err(ConfigError::Invalid {
                message: "render: set either `cache_dir` or `command`, not both".to_string(),
            }),
            (Some(dir), None) => Ok(RenderSource::Cache {
                dir: dir.clone(),
                extension: self.extension.clone(),
            }),
            (None, Some((program, args))) => Ok(RenderSource::Command {
                program: program.clone(),
                args: args.to_vec(),
            }),
            (None, None) => Ok(RenderSource::None),
        }
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Check every tracked file instead of documentation files only.
    #[serde(default)]
    pub include_all_tracked_files: Option<bool>,

    /// Skip the rule when the root is not a version-control checkout.
    #[serde(default)]
    pub require_vcs_checkout: Option<bool>,

    /// Replaces the rule's default exclusions.
    #[serde(default)]
    pub exclude: Option<Vec<Exclusion>>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Overrides the fields of `scope` that this configuration sets.
    #[must_use]
    pub fn apply_scope(&self, mut scope: RuleScope) -> RuleScope {
        if let Some(all) = self.include_all_tracked_files {
            scope.file_set = if all {
                FileSet::Tracked
            } else {
                FileSet::Documentation
            };
        }
        if let Some(require) = self.require_vcs_checkout {
            scope.require_vcs_checkout = require;
        }
        if let Some(exclude) = &self.exclude {
            scope.exclude.clone_from(exclude);
        }
        scope
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(prose_lint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(prose_lint::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Semantically invalid configuration.
    #[error("Invalid config: {message}")]
    #[diagnostic(code(prose_lint::config::invalid))]
    Invalid {
        /// What is wrong.
        message: String,
    },
}
