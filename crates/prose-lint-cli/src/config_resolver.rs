//! Configuration file discovery.
//!
//! Priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `prose-lint.toml` or `.prose-lint.toml` in the start directory or the
//!    nearest ancestor, without leaving the enclosing git checkout
//! 3. `config.toml` in the global directory (`$PROSE_LINT_CONFIG_DIR`, else
//!    `~/.prose-lint/`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project tree.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for the global fallback.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }

    /// Directory that a relative `[analyzer] root` is resolved against.
    ///
    /// Project and explicit configs anchor the root next to themselves.
    /// Global configs and defaults leave it relative to the working directory.
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) => p.parent(),
            Self::Global(_) | Self::Default => None,
        }
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["prose-lint.toml", ".prose-lint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for a run started in `start_dir`.
#[must_use]
pub fn resolve(start_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    let start = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());
    resolve_inner(&start, explicit, global_config_dir())
}

/// Takes the global directory as a parameter so tests avoid env var races.
fn resolve_inner(start_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(start_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.is_file() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Searches `start_dir` and its ancestors, stopping at a checkout root.
fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Returns the global config directory: `$PROSE_LINT_CONFIG_DIR`, else
/// `~/.prose-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("PROSE_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".prose-lint"))
}
