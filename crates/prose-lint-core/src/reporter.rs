//! Run reporting: records check outcomes and derives the run status.
//!
//! The [`Reporter`] owns the [`RunReport`] for the duration of a run and
//! streams every event to a [`ReportSink`], which decides how it is rendered.

use crate::types::{CheckRecord, RunReport, RunStatus, Severity, SkippedRule};

use std::io;
use tracing::warn;

/// Receives report events as the run progresses.
pub trait ReportSink {
    /// Called once, before any check, with the number of planned checks.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    fn begin(&mut self, _total: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called for each rule skipped before evaluation.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    fn skip_rule(&mut self, _skipped: &SkippedRule) -> io::Result<()> {
        Ok(())
    }

    /// Called for each executed check. `index` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    fn record(&mut self, index: usize, record: &CheckRecord) -> io::Result<()>;

    /// Called once after the last check.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    fn finish(&mut self, _report: &RunReport, _status: RunStatus) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn record(&mut self, _index: usize, _record: &CheckRecord) -> io::Result<()> {
        Ok(())
    }
}

/// Records check outcomes for a single run.
pub struct Reporter<'s> {
    sink: &'s mut dyn ReportSink,
    report: RunReport,
    fail_on: Severity,
    expected: usize,
}

impl<'s> Reporter<'s> {
    /// Creates a reporter writing to `sink`, failing on `fail_on` and above.
    pub fn new(sink: &'s mut dyn ReportSink, fail_on: Severity) -> Self {
        Self {
            sink,
            report: RunReport::new(),
            fail_on,
            expected: 0,
        }
    }

    /// Records that a rule was skipped as a whole.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to write.
    pub fn skip(&mut self, skipped: SkippedRule) -> io::Result<()> {
        self.sink.skip_rule(&skipped)?;
        self.report.skipped.push(skipped);
        Ok(())
    }

    /// Announces the number of checks about to run.
    ///
    /// A total of zero puts the run in the skipped state.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to write.
    pub fn begin(&mut self, total_expected_checks: usize) -> io::Result<()> {
        self.expected = total_expected_checks;
        self.sink.begin(total_expected_checks)
    }

    /// Records one executed check.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to write.
    pub fn record(&mut self, record: CheckRecord) -> io::Result<()> {
        let index = self.report.records.len() + 1;
        self.sink.record(index, &record)?;
        self.report.records.push(record);
        Ok(())
    }

    /// Completes the run and returns the report with its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to write.
    pub fn finish(self) -> io::Result<(RunReport, RunStatus)> {
        if self.report.checks_run() != self.expected {
            warn!(
                "Planned {} check(s) but recorded {}",
                self.expected,
                self.report.checks_run()
            );
        }
        let status = self.report.status(self.fail_on);
        self.sink.finish(&self.report, status)?;
        Ok((self.report, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Diagnostic, Verdict};

    #[derive(Default)]
    struct Recording {
        events: Vec<String>,
    }

    impl ReportSink for Recording {
        fn begin(&mut self, total: usize) -> io::Result<()> {
            self.events.push(format!("begin {total}"));
            Ok(())
        }

        fn skip_rule(&mut self, skipped: &SkippedRule) -> io::Result<()> {
            self.events.push(format!("skip {}", skipped.rule));
            Ok(())
        }

        fn record(&mut self, index: usize, record: &CheckRecord) -> io::Result<()> {
            self.events.push(format!(
                "record {index} {} {}",
                record.document,
                record.verdict.diagnostics().len()
            ));
            Ok(())
        }

        fn finish(&mut self, _report: &RunReport, status: RunStatus) -> io::Result<()> {
            self.events.push(format!("finish {status}"));
            Ok(())
        }
    }

    fn check(document: &str, verdict: Verdict) -> CheckRecord {
        CheckRecord {
            document: document.to_string(),
            rule: "trailing-newline".to_string(),
            code: "PL003".to_string(),
            severity: Severity::Error,
            verdict,
        }
    }

    #[test]
    fn zero_checks_is_skipped() {
        let mut sink = Recording::default();
        let mut reporter = Reporter::new(&mut sink, Severity::Error);
        reporter.begin(0).unwrap();
        let (report, status) = reporter.finish().unwrap();
        assert_eq!(status, RunStatus::Skipped);
        assert_eq!(report.checks_run(), 0);
        assert_eq!(sink.events, vec!["begin 0", "finish skipped"]);
    }

    #[test]
    fn records_stream_in_order_with_all_diagnostics() {
        let mut sink = Recording::default();
        let mut reporter = Reporter::new(&mut sink, Severity::Error);
        reporter
            .skip(SkippedRule {
                rule: "no-tabs".into(),
                code: "PL004".into(),
                reason: "not a git checkout".into(),
            })
            .unwrap();
        reporter.begin(2).unwrap();
        reporter.record(check("a.md", Verdict::Pass)).unwrap();
        reporter
            .record(check(
                "b.md",
                Verdict::Fail(vec![Diagnostic::new("one"), Diagnostic::new("two")]),
            ))
            .unwrap();
        let (report, status) = reporter.finish().unwrap();

        assert_eq!(status, RunStatus::Failed);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(
            sink.events,
            vec![
                "skip no-tabs",
                "begin 2",
                "record 1 a.md 0",
                "record 2 b.md 2",
                "finish failed",
            ]
        );
    }

    #[test]
    fn all_pass_is_passed() {
        let mut sink = NullSink;
        let mut reporter = Reporter::new(&mut sink, Severity::Error);
        reporter.begin(1).unwrap();
        reporter.record(check("a.md", Verdict::Pass)).unwrap();
        let (_, status) = reporter.finish().unwrap();
        assert_eq!(status, RunStatus::Passed);
    }
}
