//! Core analyzer for orchestrating lint runs.

use crate::config::{Config, ConfigError};
use crate::enumerator::{Document, EnumerateError, FileEnumerator, VcsSource};
use crate::exclusion::{Exclusion, ExclusionSet};
use crate::reporter::{NullSink, ReportSink, Reporter};
use crate::resolver::{ContentResolver, FsResolver, ResolveError};
use crate::rule::{evaluate, Rule, RuleBox};
use crate::types::{CheckRecord, RunReport, RunStatus, Severity, SkippedRule};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a run. Rule violations are never errors.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum AnalyzerError {
    /// IO error determining the root or writing the report.
    #[error("IO error: {0}")]
    #[diagnostic(code(prose_lint::io))]
    Io(#[from] std::io::Error),

    /// Candidate enumeration failed for a rule.
    #[error("Failed to enumerate files for {rule}: {source}")]
    #[diagnostic(code(prose_lint::enumerate))]
    Enumerate {
        /// Rule whose file set was being listed.
        rule: String,
        /// Underlying error.
        source: EnumerateError,
    },

    /// A listed document has no checkable text.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    /// Invalid exclusion glob.
    #[error("Invalid exclusion pattern: {0}")]
    #[diagnostic(code(prose_lint::exclusion))]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude: Vec<Exclusion>,
    config: Option<Config>,
    resolver: Option<Box<dyn ContentResolver>>,
    vcs: Option<Box<dyn VcsSource>>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclusion applied to every rule.
    #[must_use]
    pub fn exclude(mut self, exclusion: Exclusion) -> Self {
        self.exclude.push(exclusion);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the content resolver (default: [`FsResolver`] from config).
    #[must_use]
    pub fn resolver(mut self, resolver: Box<dyn ContentResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Replaces the version-control source (default: `git`).
    #[must_use]
    pub fn vcs(mut self, vcs: Box<dyn VcsSource>) -> Self {
        self.vcs = Some(vcs);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory is unavailable or the
    /// configuration is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let fail_on = config.fail_on()?;

        let mut exclude = config.analyzer.exclude.clone();
        exclude.extend(self.exclude);

        let resolver: Box<dyn ContentResolver> = match self.resolver {
            Some(resolver) => resolver,
            None => Box::new(FsResolver::new(&root, config.render.source()?)),
        };

        let mut enumerator = FileEnumerator::new(&root)
            .docs(config.analyzer.docs.iter().cloned())
            .extensions(config.analyzer.extensions.iter().cloned())
            .respect_gitignore(config.analyzer.respect_gitignore);
        if let Some(vcs) = self.vcs {
            enumerator = enumerator.vcs(vcs);
        }

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude,
            config,
            fail_on,
            enumerator,
            resolver,
        })
    }
}

/// A rule with the documents it will be applied to.
struct PlannedRule<'a> {
    rule: &'a dyn Rule,
    severity: Severity,
    documents: Vec<Document>,
}

/// The main analyzer that orchestrates lint runs.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude: Vec<Exclusion>,
    config: Config,
    fail_on: Severity,
    enumerator: FileEnumerator,
    resolver: Box<dyn ContentResolver>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the failure threshold.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on
    }

    /// Runs every rule without streaming output.
    ///
    /// # Errors
    ///
    /// Returns an error on environment failures (enumeration, resolution).
    pub fn analyze(&self) -> Result<(RunReport, RunStatus), AnalyzerError> {
        self.run(&mut NullSink)
    }

    /// Runs every rule, streaming outcomes to `sink`.
    ///
    /// Rules run in registration order; each rule's documents run in
    /// enumeration order. Violations never abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error on environment failures (enumeration, resolution)
    /// or when the sink fails to write.
    pub fn run(&self, sink: &mut dyn ReportSink) -> Result<(RunReport, RunStatus), AnalyzerError> {
        info!("Starting run at {:?}", self.root);

        let mut reporter = Reporter::new(sink, self.fail_on);
        let (plan, skipped) = self.plan()?;

        for skip in skipped {
            info!("Skipping {}: {}", skip.rule, skip.reason);
            reporter.skip(skip)?;
        }

        let total: usize = plan.iter().map(|p| p.documents.len()).sum();
        info!("Planned {} check(s) across {} rule(s)", total, plan.len());
        reporter.begin(total)?;

        for planned in &plan {
            let rule = planned.rule;
            let input = rule.input();
            for document in &planned.documents {
                debug!("Checking {} with {}", document.identifier, rule.name());
                let text = self.resolver.resolve(document, input)?;
                let verdict = evaluate(rule, &document.identifier, &text);
                reporter.record(CheckRecord {
                    document: document.identifier.clone(),
                    rule: rule.name().to_string(),
                    code: rule.code().to_string(),
                    severity: planned.severity,
                    verdict,
                })?;
            }
        }

        let (report, status) = reporter.finish()?;
        let (passed, failed) = report.count_outcomes();
        info!(
            "Run complete: {} passed, {} failed, {} rule(s) skipped; status {}",
            passed,
            failed,
            report.skipped.len(),
            status
        );

        Ok((report, status))
    }

    /// Determines each rule's documents, or why it is skipped.
    fn plan(&self) -> Result<(Vec<PlannedRule<'_>>, Vec<SkippedRule>), AnalyzerError> {
        let mut plan = Vec::new();
        let mut skipped = Vec::new();

        for rule in &self.rules {
            let name = rule.name();
            if !self.config.is_rule_enabled(name) {
                debug!("Skipping disabled rule: {}", name);
                continue;
            }

            let skip = |reason: String| SkippedRule {
                rule: name.to_string(),
                code: rule.code().to_string(),
                reason,
            };

            let scope = self.config.rule_scope(name, rule.default_scope());

            if scope.require_vcs_checkout && !self.enumerator.is_checkout() {
                skipped.push(skip("not inside a version-control checkout".to_string()));
                continue;
            }

            let exclusions = ExclusionSet::compile(self.exclude.iter().chain(&scope.exclude))?;

            let documents = match self.enumerator.enumerate(scope.file_set, &exclusions) {
                Ok(documents) => documents,
                Err(e @ EnumerateError::Unavailable { .. }) => {
                    skipped.push(skip(e.to_string()));
                    continue;
                }
                Err(source) => {
                    return Err(AnalyzerError::Enumerate {
                        rule: name.to_string(),
                        source,
                    })
                }
            };

            if documents.is_empty() {
                skipped.push(skip(format!(
                    "no candidate files: every one of the {} is excluded",
                    scope.file_set
                )));
                continue;
            }

            debug!("{} applies to {} document(s)", name, documents.len());
            plan.push(PlannedRule {
                rule: rule.as_ref(),
                severity: self
                    .config
                    .rule_severity(name)
                    .unwrap_or_else(|| rule.default_severity()),
                documents,
            });
        }

        Ok((plan, skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DocumentContext;
    use crate::rule::{RuleScope, TextInput};
    use crate::types::{Diagnostic, Verdict};
    use std::fs;
    use tempfile::TempDir;

    struct NoFoo;

    impl Rule for NoFoo {
        fn name(&self) -> &'static str {
            "no-foo"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn input(&self) -> TextInput {
            TextInput::Raw
        }
        fn default_scope(&self) -> RuleScope {
            RuleScope::documentation()
        }
        fn check(&self, ctx: &DocumentContext) -> Verdict {
            if ctx.text.contains("foo") {
                Verdict::Fail(vec![Diagnostic::new("found foo")])
            } else {
                Verdict::Pass
            }
        }
    }

    fn docs_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("doc")).unwrap();
        fs::write(tmp.path().join("doc/a.md"), "fine\n").unwrap();
        fs::write(tmp.path().join("doc/b.md"), "foo\n").unwrap();
        tmp
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .rule(NoFoo)
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 1);
        assert_eq!(analyzer.fail_on(), Severity::Error);
    }

    #[test]
    fn run_records_every_document_in_order() {
        let tmp = docs_tree();
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .rule(NoFoo)
            .build()
            .unwrap();

        let (report, status) = analyzer.analyze().unwrap();
        assert_eq!(status, RunStatus::Failed);
        let docs: Vec<_> = report.records.iter().map(|r| r.document.as_str()).collect();
        assert_eq!(docs, vec!["doc/a.md", "doc/b.md"]);
        assert!(report.records[0].verdict.is_pass());
        assert!(!report.records[1].verdict.is_pass());
    }

    #[test]
    fn excluding_everything_skips_instead_of_passing() {
        let tmp = docs_tree();
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .rule(NoFoo)
            .exclude(Exclusion::Contains("doc/".into()))
            .build()
            .unwrap();

        let (report, status) = analyzer.analyze().unwrap();
        assert_eq!(status, RunStatus::Skipped);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.starts_with("no candidate files"));
    }

    #[test]
    fn disabled_rule_does_not_run() {
        let tmp = docs_tree();
        let config = Config::parse("[rules.no-foo]\nenabled = false\n").unwrap();
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .config(config)
            .rule(NoFoo)
            .build()
            .unwrap();

        let (report, status) = analyzer.analyze().unwrap();
        assert_eq!(status, RunStatus::Skipped);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn severity_override_below_threshold_passes() {
        let tmp = docs_tree();
        let config = Config::parse("[rules.no-foo]\nseverity = \"warning\"\n").unwrap();
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .config(config)
            .rule(NoFoo)
            .build()
            .unwrap();

        let (report, status) = analyzer.analyze().unwrap();
        assert_eq!(status, RunStatus::Passed);
        assert_eq!(report.records[1].severity, Severity::Warning);
    }

    #[test]
    fn vcs_gate_skips_rule_outside_checkout() {
        let tmp = docs_tree();
        let config = Config::parse("[rules.no-foo]\nrequire_vcs_checkout = true\n").unwrap();
        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .config(config)
            .rule(NoFoo)
            .build()
            .unwrap();

        let (report, status) = analyzer.analyze().unwrap();
        assert_eq!(status, RunStatus::Skipped);
        assert_eq!(
            report.skipped[0].reason,
            "not inside a version-control checkout"
        );
    }
}
