//! Content resolution: the checkable text for a document.
//!
//! Raw text comes straight from disk. Rendered text comes from an external
//! renderer, either a cache directory of pre-rendered plain text or a
//! command that prints the rendering on stdout. Its output is opaque here.

use crate::enumerator::Document;
use crate::rule::TextInput;

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Errors resolving a document's text. Always fatal to a run.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ResolveError {
    /// The source file could not be read.
    #[error("failed to read {identifier}: {source}")]
    #[diagnostic(code(prose_lint::resolve::io))]
    Io {
        /// Document identifier.
        identifier: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// No cached rendering exists for the document.
    #[error("no rendered text for {identifier}: cache entry {cache_path} is missing")]
    #[diagnostic(
        code(prose_lint::resolve::cache_miss),
        help("render the documentation before running prose-lint")
    )]
    CacheMiss {
        /// Document identifier.
        identifier: String,
        /// Expected cache entry.
        cache_path: PathBuf,
    },

    /// Rendered text was not valid UTF-8.
    #[error("rendered text for {identifier} is not valid UTF-8")]
    #[diagnostic(code(prose_lint::resolve::encoding))]
    Encoding {
        /// Document identifier.
        identifier: String,
    },

    /// The render command failed.
    #[error("render command `{program}` failed for {identifier}: {detail}")]
    #[diagnostic(code(prose_lint::resolve::command))]
    Command {
        /// Document identifier.
        identifier: String,
        /// Program that was run.
        program: String,
        /// Error detail.
        detail: String,
    },

    /// Rendered text was requested but no render source is configured.
    #[error("rule needs rendered text for {identifier} but no render source is configured")]
    #[diagnostic(
        code(prose_lint::resolve::unconfigured),
        help("set `render.cache_dir` or `render.command` in prose-lint.toml")
    )]
    NoRenderSource {
        /// Document identifier.
        identifier: String,
    },
}

/// Supplies the checkable text for a document.
pub trait ContentResolver: Send + Sync {
    /// Returns the document's text in the requested representation.
    ///
    /// # Errors
    ///
    /// Returns an error when the document has no such content.
    fn resolve(&self, document: &Document, input: TextInput) -> Result<String, ResolveError>;
}

/// Where rendered text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderSource {
    /// No renderer configured; rendered lookups fail.
    #[default]
    None,
    /// `<dir>/<identifier>.<extension>` holds the rendered text.
    Cache {
        /// Cache directory.
        dir: PathBuf,
        /// Extension appended to the identifier.
        extension: String,
    },
    /// `program args... <path>` prints the rendered text.
    Command {
        /// Program to run.
        program: String,
        /// Arguments placed before the document path.
        args: Vec<String>,
    },
}

/// [`ContentResolver`] reading raw files from disk and rendered text from a
/// [`RenderSource`].
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
    render: RenderSource,
}

impl FsResolver {
    /// Creates a resolver for documents under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, render: RenderSource) -> Self {
        Self {
            root: root.into(),
            render,
        }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn raw(document: &Document) -> Result<String, ResolveError> {
        let bytes = std::fs::read(&document.path).map_err(|source| ResolveError::Io {
            identifier: document.identifier.clone(),
            source,
        })?;
        // Lossy so binary assets still expose their tab and newline bytes.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn cached(
        &self,
        document: &Document,
        dir: &Path,
        extension: &str,
    ) -> Result<String, ResolveError> {
        let cache_path = self
            .root
            .join(dir)
            .join(format!("{}.{extension}", document.identifier));
        debug!("Reading rendered text from {}", cache_path.display());

        let bytes = match std::fs::read(&cache_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ResolveError::CacheMiss {
                    identifier: document.identifier.clone(),
                    cache_path,
                });
            }
            Err(source) => {
                return Err(ResolveError::Io {
                    identifier: document.identifier.clone(),
                    source,
                });
            }
        };

        String::from_utf8(bytes).map_err(|_| ResolveError::Encoding {
            identifier: document.identifier.clone(),
        })
    }

    fn command(
        &self,
        document: &Document,
        program: &str,
        args: &[String],
    ) -> Result<String, ResolveError> {
        let command_error = |detail: String| ResolveError::Command {
            identifier: document.identifier.clone(),
            program: program.to_string(),
            detail,
        };

        let output = Command::new(program)
            .args(args)
            .arg(&document.path)
            .current_dir(&self.root)
            .output()
            .map_err(|e| command_error(e.to_string()))?;

        if !output.status.success() {
            return Err(command_error(format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|_| ResolveError::Encoding {
            identifier: document.identifier.clone(),
        })
    }
}

impl ContentResolver for FsResolver {
    fn resolve(&self, document: &Document, input: TextInput) -> Result<String, ResolveError> {
        match (input, &self.render) {
            (TextInput::Raw, _) => Self::raw(document),
            (TextInput::Rendered, RenderSource::Cache { dir, extension }) => {
                self.cached(document, dir, extension)
            }
            (TextInput::Rendered, RenderSource::Command { program, args }) => {
                self.command(document, program, args)
            }
            (TextInput::Rendered, RenderSource::None) => Err(ResolveError::NoRenderSource {
                identifier: document.identifier.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("doc")).unwrap();
        fs::create_dir_all(tmp.path().join("cache/doc")).unwrap();
        fs::write(tmp.path().join("doc/a.md"), "# Title\n\tindented\n").unwrap();
        fs::write(tmp.path().join("cache/doc/a.md.txt"), "Title\nindented\n").unwrap();
        tmp
    }

    fn cache_source() -> RenderSource {
        RenderSource::Cache {
            dir: PathBuf::from("cache"),
            extension: "txt".to_string(),
        }
    }

    #[test]
    fn raw_returns_file_content_unmodified() {
        let tmp = setup();
        let resolver = FsResolver::new(tmp.path(), RenderSource::None);
        let doc = Document::new(tmp.path(), "doc/a.md");
        assert_eq!(
            resolver.resolve(&doc, TextInput::Raw).unwrap(),
            "# Title\n\tindented\n"
        );
    }

    #[test]
    fn raw_tolerates_binary_content() {
        let tmp = setup();
        fs::write(tmp.path().join("doc/logo.bin"), [0xff, b'\t', 0xfe, b'\n']).unwrap();
        let resolver = FsResolver::new(tmp.path(), RenderSource::None);
        let text = resolver
            .resolve(&Document::new(tmp.path(), "doc/logo.bin"), TextInput::Raw)
            .unwrap();
        assert!(text.contains('\t'));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn raw_missing_file_is_an_error() {
        let tmp = setup();
        let resolver = FsResolver::new(tmp.path(), RenderSource::None);
        let err = resolver
            .resolve(&Document::new(tmp.path(), "doc/missing.md"), TextInput::Raw)
            .unwrap_err();
        assert!(matches!(err, ResolveError::Io { .. }));
    }

    #[test]
    fn rendered_reads_cache_entry() {
        let tmp = setup();
        let resolver = FsResolver::new(tmp.path(), cache_source());
        let doc = Document::new(tmp.path(), "doc/a.md");
        assert_eq!(
            resolver.resolve(&doc, TextInput::Rendered).unwrap(),
            "Title\nindented\n"
        );
    }

    #[test]
    fn rendered_cache_miss_is_an_error() {
        let tmp = setup();
        fs::write(tmp.path().join("doc/b.md"), "b\n").unwrap();
        let resolver = FsResolver::new(tmp.path(), cache_source());
        let err = resolver
            .resolve(&Document::new(tmp.path(), "doc/b.md"), TextInput::Rendered)
            .unwrap_err();
        match err {
            ResolveError::CacheMiss {
                identifier,
                cache_path,
            } => {
                assert_eq!(identifier, "doc/b.md");
                assert!(cache_path.ends_with("cache/doc/b.md.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rendered_without_source_is_an_error() {
        let tmp = setup();
        let resolver = FsResolver::new(tmp.path(), RenderSource::None);
        let err = resolver
            .resolve(&Document::new(tmp.path(), "doc/a.md"), TextInput::Rendered)
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoRenderSource { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn rendered_via_command_captures_stdout() {
        let tmp = setup();
        let resolver = FsResolver::new(
            tmp.path(),
            RenderSource::Command {
                program: "cat".to_string(),
                args: vec![],
            },
        );
        let doc = Document::new(tmp.path(), "doc/a.md");
        assert_eq!(
            resolver.resolve(&doc, TextInput::Rendered).unwrap(),
            "# Title\n\tindented\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn failing_render_command_is_an_error() {
        let tmp = setup();
        let resolver = FsResolver::new(
            tmp.path(),
            RenderSource::Command {
                program: "false".to_string(),
                args: vec![],
            },
        );
        let err = resolver
            .resolve(&Document::new(tmp.path(), "doc/a.md"), TextInput::Rendered)
            .unwrap_err();
        assert!(matches!(err, ResolveError::Command { .. }));
    }
}
