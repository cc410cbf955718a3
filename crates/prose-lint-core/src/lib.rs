//! # prose-lint-core
//!
//! Core framework for documentation style linting.
//!
//! This crate provides the foundational traits and types for checking
//! house-style conventions across a documentation tree. It includes:
//!
//! - [`Rule`] trait for per-document text rules
//! - [`FileEnumerator`] for listing candidate documents
//! - [`ContentResolver`] for obtaining raw or rendered text
//! - [`Reporter`] and [`ReportSink`] for recording outcomes
//! - [`Analyzer`] for orchestrating a run
//!
//! ## Example
//!
//! ```ignore
//! use prose_lint_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./docs-site")
//!     .config(Config::from_file("prose-lint.toml".as_ref())?)
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let (report, status) = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod enumerator;
mod exclusion;
mod reporter;
mod resolver;
mod rule;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RenderConfig, RuleConfig};
pub use context::DocumentContext;
pub use enumerator::{Document, EnumerateError, FileEnumerator, FileSet, GitCli, VcsSource};
pub use exclusion::{Exclusion, ExclusionSet};
pub use reporter::{NullSink, ReportSink, Reporter};
pub use resolver::{ContentResolver, FsResolver, RenderSource, ResolveError};
pub use rule::{evaluate, Rule, RuleBox, RuleScope, TextInput};
pub use types::{CheckRecord, Diagnostic, RunReport, RunStatus, Severity, SkippedRule, Verdict};
