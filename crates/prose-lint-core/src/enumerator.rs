//! Candidate document enumeration.
//!
//! Produces a sorted, deduplicated list of documents for a [`FileSet`],
//! filtered by an [`ExclusionSet`]. Two sources back the file sets:
//!
//! - [`FileSet::Tracked`]: the version-control file listing ([`VcsSource`])
//! - [`FileSet::Documentation`]: a walk of the configured documentation
//!   directories, keeping only the configured extensions

use crate::exclusion::ExclusionSet;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Which candidate files to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSet {
    /// Every file tracked by version control.
    Tracked,
    /// Documentation content files only.
    Documentation,
}

impl std::fmt::Display for FileSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tracked => write!(f, "tracked files"),
            Self::Documentation => write!(f, "documentation files"),
        }
    }
}

/// A candidate document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Document {
    /// Identifier: `/`-separated path relative to the root.
    pub identifier: String,
    /// Path on disk.
    pub path: PathBuf,
}

impl Document {
    /// Creates a document from a root and a `/`-separated identifier.
    #[must_use]
    pub fn new(root: &Path, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let path = root.join(&identifier);
        Self { identifier, path }
    }
}

/// Errors from candidate enumeration.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum EnumerateError {
    /// The source of truth for the file set does not exist.
    ///
    /// Reported as a skipped rule, never as a pass.
    #[error("no candidate files: {reason}")]
    #[diagnostic(code(prose_lint::enumerate::unavailable))]
    Unavailable {
        /// Why the source is unavailable.
        reason: String,
    },

    /// The version-control listing failed.
    #[error("git ls-files failed in {root}: {detail}")]
    #[diagnostic(
        code(prose_lint::enumerate::git),
        help("make sure `git` is installed and the checkout is not corrupted")
    )]
    Git {
        /// Repository root.
        root: PathBuf,
        /// Error detail.
        detail: String,
    },

    /// Walking the documentation directories failed.
    #[error("failed to walk {path}: {source}")]
    #[diagnostic(code(prose_lint::enumerate::walk))]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying error.
        source: ignore::Error,
    },
}

/// Source of the version-control file listing.
pub trait VcsSource: Send + Sync {
    /// Returns true if `root` lies inside a version-control working copy.
    fn is_checkout(&self, root: &Path) -> bool;

    /// Lists tracked files as `/`-separated paths relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerateError::Unavailable`] when `root` is not a checkout,
    /// or [`EnumerateError::Git`] when the listing itself fails.
    fn tracked_files(&self, root: &Path) -> Result<Vec<String>, EnumerateError>;
}

/// [`VcsSource`] backed by the `git` command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl VcsSource for GitCli {
    fn is_checkout(&self, root: &Path) -> bool {
        // `.git` may be a directory or, in worktrees and submodules, a file.
        root.ancestors().any(|dir| dir.join(".git").exists())
    }

    fn tracked_files(&self, root: &Path) -> Result<Vec<String>, EnumerateError> {
        if !self.is_checkout(root) {
            return Err(EnumerateError::Unavailable {
                reason: format!("{} is not a git checkout", root.display()),
            });
        }

        let output = Command::new("git")
            .args(["ls-files", "-z"])
            .current_dir(root)
            .output()
            .map_err(|e| EnumerateError::Git {
                root: root.to_path_buf(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(EnumerateError::Git {
                root: root.to_path_buf(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        output
            .stdout
            .split(|b| *b == 0)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                String::from_utf8(entry.to_vec()).map_err(|e| EnumerateError::Git {
                    root: root.to_path_buf(),
                    detail: format!("non-UTF-8 path in listing: {e}"),
                })
            })
            .collect()
    }
}

/// Enumerates candidate documents under a root.
pub struct FileEnumerator {
    root: PathBuf,
    docs: Vec<PathBuf>,
    extensions: Vec<String>,
    respect_gitignore: bool,
    vcs: Box<dyn VcsSource>,
}

impl FileEnumerator {
    /// Creates an enumerator with the `git` listing and no documentation dirs.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            docs: Vec::new(),
            extensions: Vec::new(),
            respect_gitignore: true,
            vcs: Box::new(GitCli),
        }
    }

    /// Sets the documentation directories (relative to the root).
    #[must_use]
    pub fn docs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.docs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the documentation file extensions (without the dot).
    /// An empty list keeps every file.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether the documentation walk honors `.gitignore`.
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    /// Replaces the version-control source.
    #[must_use]
    pub fn vcs(mut self, vcs: Box<dyn VcsSource>) -> Self {
        self.vcs = vcs;
        self
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if the root is a version-control checkout.
    #[must_use]
    pub fn is_checkout(&self) -> bool {
        self.vcs.is_checkout(&self.root)
    }

    /// Lists the documents of a file set, minus excluded identifiers.
    ///
    /// The result is sorted by identifier and free of duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerateError::Unavailable`] when the file set's source does
    /// not exist, and other variants when listing fails.
    pub fn enumerate(
        &self,
        kind: FileSet,
        exclusions: &ExclusionSet,
    ) -> Result<Vec<Document>, EnumerateError> {
        let mut identifiers = match kind {
            FileSet::Tracked => self.tracked()?,
            FileSet::Documentation => self.documentation()?,
        };

        identifiers.sort();
        identifiers.dedup();

        let documents = identifiers
            .into_iter()
            .filter(|id| {
                let excluded = exclusions.matches(id);
                if excluded {
                    debug!("Excluding: {id}");
                }
                !excluded
            })
            .map(|id| Document::new(&self.root, id))
            .collect();

        Ok(documents)
    }

    fn tracked(&self) -> Result<Vec<String>, EnumerateError> {
        let listed = self.vcs.tracked_files(&self.root)?;
        Ok(listed
            .into_iter()
            .filter(|id| {
                let is_file = self.root.join(id).is_file();
                if !is_file {
                    debug!("Skipping non-file tracked entry: {id}");
                }
                is_file
            })
            .collect())
    }

    fn documentation(&self) -> Result<Vec<String>, EnumerateError> {
        let dirs: Vec<PathBuf> = self
            .docs
            .iter()
            .map(|d| self.root.join(d))
            .filter(|d| d.is_dir())
            .collect();

        if dirs.is_empty() {
            return Err(EnumerateError::Unavailable {
                reason: format!(
                    "no documentation directory found under {} (looked for {})",
                    self.root.display(),
                    self.docs
                        .iter()
                        .map(|d| d.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            });
        }

        let mut identifiers = Vec::new();
        for dir in dirs {
            let mut builder = ignore::WalkBuilder::new(&dir);
            builder
                .hidden(false)
                .git_ignore(self.respect_gitignore)
                .require_git(false)
                .sort_by_file_name(|a, b| a.cmp(b));

            for entry in builder.build() {
                let entry = entry.map_err(|source| EnumerateError::Walk {
                    path: dir.clone(),
                    source,
                })?;
                let path = entry.path();
                if !path.is_file() || !self.has_doc_extension(path) {
                    continue;
                }
                match self.identifier_for(path) {
                    Some(id) => identifiers.push(id),
                    None => debug!("Skipping non-UTF-8 path: {}", path.display()),
                }
            }
        }

        Ok(identifiers)
    }

    fn has_doc_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn identifier_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Option<Vec<&str>> = relative
            .components()
            .map(|c| match c {
                std::path::Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect();
        parts.map(|p| p.join("/"))
    }
}
