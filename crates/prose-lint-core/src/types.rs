//! Core types for verdicts, check records and run reports.

use serde::{Deserialize, Serialize};

/// Severity level attached to a rule's failing verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail the run.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl Severity {
    /// Parses a severity name (`error`, `warning`, `info`).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single finding attached to a failing verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Line number in the checked text (1-indexed), when the finding has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Human-readable message, usually quoting the offending text.
    pub message: String,
    /// Optional hint on how to fix the finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Creates a diagnostic without a line number.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            line: None,
            message: message.into(),
            help: None,
        }
    }

    /// Sets the line number this diagnostic points at.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a fix hint.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Outcome of applying one rule to one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "diagnostics", rename_all = "lowercase")]
pub enum Verdict {
    /// The document satisfies the rule.
    Pass,
    /// The document violates the rule.
    Fail(Vec<Diagnostic>),
}

impl Verdict {
    /// Builds a verdict from collected diagnostics: `Pass` when there are none.
    #[must_use]
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            Self::Pass
        } else {
            Self::Fail(diagnostics)
        }
    }

    /// Returns true for `Pass`.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Diagnostics attached to a failing verdict (empty for `Pass`).
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Pass => &[],
            Self::Fail(diagnostics) => diagnostics,
        }
    }
}

/// One executed check: a rule applied to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    /// Document identifier (path relative to the analysis root).
    pub document: String,
    /// Rule name (e.g., "no-tabs").
    pub rule: String,
    /// Rule code (e.g., "PL004").
    pub code: String,
    /// Severity applied to a failing verdict.
    pub severity: Severity,
    /// The verdict.
    pub verdict: Verdict,
}

impl CheckRecord {
    /// Short description used by reporters, e.g. `no-tabs: doc/intro.md`.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{}: {}", self.rule, self.document)
    }

    /// Returns true if the verdict failed at or above `threshold`.
    #[must_use]
    pub fn fails_at(&self, threshold: Severity) -> bool {
        !self.verdict.is_pass() && self.severity >= threshold
    }
}

/// A rule that did not run at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRule {
    /// Rule name.
    pub rule: String,
    /// Rule code.
    pub code: String,
    /// Why the rule was skipped.
    pub reason: String,
}

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// At least one check ran and none failed.
    Passed,
    /// At least one check failed at or above the failure threshold.
    Failed,
    /// Nothing was checked.
    Skipped,
}

impl RunStatus {
    /// Returns true unless the run failed. Skipped runs are not failures.
    #[must_use]
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Result of a lint run: every check in execution order plus skipped rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Executed checks, in execution order.
    pub records: Vec<CheckRecord>,
    /// Rules that were skipped before any of their checks ran.
    pub skipped: Vec<SkippedRule>,
}

impl RunReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of checks executed.
    #[must_use]
    pub fn checks_run(&self) -> usize {
        self.records.len()
    }

    /// Records with a failing verdict, regardless of severity.
    pub fn failures(&self) -> impl Iterator<Item = &CheckRecord> {
        self.records.iter().filter(|r| !r.verdict.is_pass())
    }

    /// Derives the run status against a failure threshold.
    #[must_use]
    pub fn status(&self, fail_on: Severity) -> RunStatus {
        if self.records.iter().any(|r| r.fails_at(fail_on)) {
            RunStatus::Failed
        } else if self.records.is_empty() {
            RunStatus::Skipped
        } else {
            RunStatus::Passed
        }
    }

    /// Counts passing and failing checks.
    #[must_use]
    pub fn count_outcomes(&self) -> (usize, usize) {
        let failed = self.failures().count();
        (self.records.len() - failed, failed)
    }

    /// Formats failures as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()` messages
    /// in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self, fail_on: Severity) -> String {
        use std::fmt::Write;

        let failing: Vec<&CheckRecord> =
            self.records.iter().filter(|r| r.fails_at(fail_on)).collect();

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== prose-lint: {} failing check(s) ===\n",
            failing.len()
        );

        for record in &failing {
            let _ = writeln!(
                report,
                "{} [{}] in {}",
                record.rule, record.code, record.document
            );
            for diagnostic in record.verdict.diagnostics() {
                let _ = writeln!(report, "  {}: {diagnostic}", record.severity);
                if let Some(help) = &diagnostic.help {
                    let _ = writeln!(report, "  = help: {help}");
                }
            }
            let _ = writeln!(report);
        }

        let (passed, failed) = self.count_outcomes();
        let _ = writeln!(
            report,
            "Total: {} check(s), {passed} passed, {failed} failed, {} rule(s) skipped",
            self.checks_run(),
            self.skipped.len()
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(document: &str, verdict: Verdict, severity: Severity) -> CheckRecord {
        CheckRecord {
            document: document.to_string(),
            rule: "no-tabs".to_string(),
            code: "PL004".to_string(),
            severity,
            verdict,
        }
    }

    fn failing() -> Verdict {
        Verdict::Fail(vec![Diagnostic::new("tab characters on lines [3, 7]")])
    }

    #[test]
    fn from_diagnostics_empty_is_pass() {
        assert_eq!(Verdict::from_diagnostics(vec![]), Verdict::Pass);
        assert!(!Verdict::from_diagnostics(vec![Diagnostic::new("x")]).is_pass());
    }

    #[test]
    fn diagnostic_display_includes_line() {
        let d = Diagnostic::new("See foo.. bar").at_line(4);
        assert_eq!(d.to_string(), "line 4: See foo.. bar");
        assert_eq!(Diagnostic::new("no newline").to_string(), "no newline");
    }

    #[test]
    fn empty_report_is_skipped_not_passed() {
        let report = RunReport::new();
        assert_eq!(report.status(Severity::Error), RunStatus::Skipped);
        assert!(report.status(Severity::Error).is_success());
    }

    #[test]
    fn any_error_failure_fails_the_run() {
        let mut report = RunReport::new();
        report.records.push(record("a.md", Verdict::Pass, Severity::Error));
        assert_eq!(report.status(Severity::Error), RunStatus::Passed);

        report.records.push(record("b.md", failing(), Severity::Error));
        assert_eq!(report.status(Severity::Error), RunStatus::Failed);
        assert!(!RunStatus::Failed.is_success());
    }

    #[test]
    fn warnings_below_threshold_do_not_fail() {
        let mut report = RunReport::new();
        report.records.push(record("b.md", failing(), Severity::Warning));
        assert_eq!(report.status(Severity::Error), RunStatus::Passed);
        assert_eq!(report.status(Severity::Warning), RunStatus::Failed);
    }

    #[test]
    fn format_test_report_lists_every_diagnostic() {
        let mut report = RunReport::new();
        report.records.push(record(
            "doc/a.md",
            Verdict::Fail(vec![
                Diagnostic::new("first").at_line(1),
                Diagnostic::new("second").with_help("fix it"),
            ]),
            Severity::Error,
        ));
        report.records.push(record("doc/b.md", Verdict::Pass, Severity::Error));

        let text = report.format_test_report(Severity::Error);
        assert!(text.contains("1 failing check(s)"));
        assert!(text.contains("no-tabs [PL004] in doc/a.md"));
        assert!(text.contains("error: line 1: first"));
        assert!(text.contains("error: second"));
        assert!(text.contains("= help: fix it"));
        assert!(text.contains("2 check(s), 1 passed, 1 failed"));
    }

    #[test]
    fn format_test_report_layout() {
        let mut report = RunReport::new();
        report.records.push(record(
            "doc/a.md",
            Verdict::Fail(vec![Diagnostic::new("tab characters on lines [3, 7]")
                .at_line(3)
                .with_help("replace tabs with spaces")]),
            Severity::Error,
        ));
        report.records.push(record("doc/b.md", failing(), Severity::Warning));
        report.skipped.push(SkippedRule {
            rule: "stray-double-dot".to_string(),
            code: "PL001".to_string(),
            reason: "no candidate files".to_string(),
        });

        insta::assert_snapshot!(report.format_test_report(Severity::Error).trim(), @r"
        === prose-lint: 1 failing check(s) ===

        no-tabs [PL004] in doc/a.md
          error: line 3: tab characters on lines [3, 7]
          = help: replace tabs with spaces

        Total: 2 check(s), 0 passed, 2 failed, 1 rule(s) skipped
        ");
    }

    #[test]
    fn severity_parse() {
        assert_eq!(Severity::parse("warning"), Some(Severity::Warning));
        assert_eq!(Severity::parse("fatal"), None);
    }
}
