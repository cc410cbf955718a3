//! Report sinks for each output format.

use prose_lint_core::{CheckRecord, ReportSink, RunReport, RunStatus, Severity, SkippedRule};
use serde::Serialize;
use std::io::{self, Write};

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Creates a sink writing `format` to stdout.
pub fn stdout_sink(
    format: OutputFormat,
    fail_on: Severity,
    verbose: bool,
) -> Box<dyn ReportSink> {
    let out = io::stdout();
    match format {
        OutputFormat::Text => Box::new(TextSink::new(out).show_passes(verbose)),
        OutputFormat::Compact => Box::new(CompactSink::new(out)),
        OutputFormat::Json => Box::new(JsonSink::new(out)),
        OutputFormat::Tap => Box::new(TapSink::new(out, fail_on)),
    }
}

fn location(record: &CheckRecord, line: Option<usize>) -> String {
    match line {
        Some(line) => format!("{}:{line}", record.document),
        None => record.document.clone(),
    }
}

/// Human-readable output: failures with help, then a summary.
pub struct TextSink<W> {
    out: W,
    show_passes: bool,
}

impl<W: Write> TextSink<W> {
    /// Creates a text sink.
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_passes: false,
        }
    }

    /// Also prints an `ok` line for every passing check.
    #[must_use]
    pub fn show_passes(mut self, show: bool) -> Self {
        self.show_passes = show;
        self
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn skip_rule(&mut self, skipped: &SkippedRule) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {} skipped: {}",
            skipped.code, skipped.rule, skipped.reason
        )
    }

    fn record(&mut self, _index: usize, record: &CheckRecord) -> io::Result<()> {
        if record.verdict.is_pass() {
            if self.show_passes {
                writeln!(
                    self.out,
                    "{GREEN}ok{RESET} {} {}",
                    record.code,
                    record.description()
                )?;
            }
            return Ok(());
        }

        let severity_indicator = match record.severity {
            Severity::Error => format!("{RED}error{RESET}"),
            Severity::Warning => format!("{YELLOW}warning{RESET}"),
            Severity::Info => format!("{BLUE}info{RESET}"),
        };

        for diagnostic in record.verdict.diagnostics() {
            writeln!(
                self.out,
                "{} {} at {}",
                record.code,
                record.rule,
                location(record, diagnostic.line)
            )?;
            writeln!(self.out, "  {severity_indicator}: {}", diagnostic.message)?;
            if let Some(help) = &diagnostic.help {
                writeln!(self.out, "  = help: {help}")?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn finish(&mut self, report: &RunReport, status: RunStatus) -> io::Result<()> {
        let (passed, failed) = report.count_outcomes();
        let summary_color = match status {
            RunStatus::Failed => RED,
            RunStatus::Skipped => YELLOW,
            RunStatus::Passed if failed > 0 => YELLOW,
            RunStatus::Passed => GREEN,
        };

        writeln!(
            self.out,
            "{summary_color}{status}: {} check(s), {passed} passed, {failed} failed, {} rule(s) skipped{RESET}",
            report.checks_run(),
            report.skipped.len()
        )
    }
}

/// One line per diagnostic: `doc:line: severity [code] message`.
pub struct CompactSink<W> {
    out: W,
}

impl<W: Write> CompactSink<W> {
    /// Creates a compact sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ReportSink for CompactSink<W> {
    fn record(&mut self, _index: usize, record: &CheckRecord) -> io::Result<()> {
        for diagnostic in record.verdict.diagnostics() {
            writeln!(
                self.out,
                "{}: {} [{}] {}",
                location(record, diagnostic.line),
                record.severity,
                record.code,
                diagnostic.message,
            )?;
        }
        Ok(())
    }
}

/// Writes the whole report as one JSON document when the run finishes.
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    /// Creates a JSON sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: RunStatus,
    #[serde(flatten)]
    report: &'a RunReport,
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn record(&mut self, _index: usize, _record: &CheckRecord) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, report: &RunReport, status: RunStatus) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, &JsonReport { status, report })?;
        writeln!(self.out)
    }
}

/// Test Anything Protocol output.
///
/// Failing checks below the failure threshold are marked `# TODO` so TAP
/// consumers do not count them.
pub struct TapSink<W> {
    out: W,
    fail_on: Severity,
}

impl<W: Write> TapSink<W> {
    /// Creates a TAP sink.
    pub fn new(out: W, fail_on: Severity) -> Self {
        Self { out, fail_on }
    }
}

impl<W: Write> ReportSink for TapSink<W> {
    fn begin(&mut self, total: usize) -> io::Result<()> {
        if total == 0 {
            writeln!(self.out, "1..0 # SKIP nothing to check")
        } else {
            writeln!(self.out, "1..{total}")
        }
    }

    fn skip_rule(&mut self, skipped: &SkippedRule) -> io::Result<()> {
        writeln!(self.out, "# skipped {}: {}", skipped.rule, skipped.reason)
    }

    fn record(&mut self, index: usize, record: &CheckRecord) -> io::Result<()> {
        if record.verdict.is_pass() {
            return writeln!(self.out, "ok {index} - {}", record.description());
        }

        if record.fails_at(self.fail_on) {
            writeln!(self.out, "not ok {index} - {}", record.description())?;
        } else {
            writeln!(
                self.out,
                "not ok {index} - {} # TODO {}",
                record.description(),
                record.severity
            )?;
        }
        for diagnostic in record.verdict.diagnostics() {
            writeln!(self.out, "# {diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prose_lint_core::{Diagnostic, Verdict};

    fn record(document: &str, verdict: Verdict, severity: Severity) -> CheckRecord {
        CheckRecord {
            document: document.to_string(),
            rule: "no-tabs".to_string(),
            code: "PL004".to_string(),
            severity,
            verdict,
        }
    }

    fn tabs() -> Verdict {
        Verdict::Fail(vec![Diagnostic::new("tab characters on lines [3, 7]")
            .at_line(3)
            .with_help("replace tabs with spaces")])
    }

    fn drive(sink: &mut dyn ReportSink, records: &[CheckRecord], skipped: &[SkippedRule]) {
        let mut report = RunReport::new();
        for skip in skipped {
            sink.skip_rule(skip).expect("write");
            report.skipped.push(skip.clone());
        }
        sink.begin(records.len()).expect("write");
        for (i, r) in records.iter().enumerate() {
            sink.record(i + 1, r).expect("write");
            report.records.push(r.clone());
        }
        let status = report.status(Severity::Error);
        sink.finish(&report, status).expect("write");
    }

    fn tap(records: &[CheckRecord], skipped: &[SkippedRule]) -> String {
        let mut out = Vec::new();
        drive(&mut TapSink::new(&mut out, Severity::Error), records, skipped);
        String::from_utf8(out).expect("utf-8")
    }

    #[test]
    fn tap_plan_results_and_diagnostics() {
        let output = tap(
            &[
                record("doc/a.md", Verdict::Pass, Severity::Error),
                record("doc/b.md", tabs(), Severity::Error),
                record("doc/c.md", tabs(), Severity::Warning),
            ],
            &[SkippedRule {
                rule: "stray-double-dot".to_string(),
                code: "PL001".to_string(),
                reason: "no candidate files".to_string(),
            }],
        );
        insta::assert_snapshot!(output, @r"
        # skipped stray-double-dot: no candidate files
        1..3
        ok 1 - no-tabs: doc/a.md
        not ok 2 - no-tabs: doc/b.md
        # line 3: tab characters on lines [3, 7]
        not ok 3 - no-tabs: doc/c.md # TODO warning
        # line 3: tab characters on lines [3, 7]
        ");
    }

    #[test]
    fn tap_empty_run_is_a_skip_plan() {
        assert_eq!(tap(&[], &[]), "1..0 # SKIP nothing to check\n");
    }

    #[test]
    fn compact_prints_one_line_per_diagnostic() {
        let mut out = Vec::new();
        drive(
            &mut CompactSink::new(&mut out),
            &[
                record("doc/a.md", Verdict::Pass, Severity::Error),
                record("doc/b.md", tabs(), Severity::Error),
            ],
            &[],
        );
        assert_eq!(
            String::from_utf8(out).expect("utf-8"),
            "doc/b.md:3: error [PL004] tab characters on lines [3, 7]\n"
        );
    }

    #[test]
    fn json_includes_status_and_records() {
        let mut out = Vec::new();
        drive(
            &mut JsonSink::new(&mut out),
            &[record("doc/b.md", tabs(), Severity::Error)],
            &[],
        );
        let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(value["status"], "failed");
        assert_eq!(value["records"][0]["document"], "doc/b.md");
        assert_eq!(value["records"][0]["verdict"]["outcome"], "fail");
        assert_eq!(value["records"][0]["verdict"]["diagnostics"][0]["line"], 3);
        assert_eq!(value["skipped"], serde_json::json!([]));
    }

    #[test]
    fn text_shows_failures_and_summary() {
        let mut out = Vec::new();
        drive(
            &mut TextSink::new(&mut out),
            &[
                record("doc/a.md", Verdict::Pass, Severity::Error),
                record("doc/b.md", tabs(), Severity::Error),
            ],
            &[],
        );
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains("PL004 no-tabs at doc/b.md:3"));
        assert!(text.contains("= help: replace tabs with spaces"));
        assert!(!text.contains("doc/a.md"));
        assert!(text.contains("failed: 2 check(s), 1 passed, 1 failed, 0 rule(s) skipped"));
    }

    #[test]
    fn text_lists_passing_checks_when_asked() {
        let mut out = Vec::new();
        drive(
            &mut TextSink::new(&mut out).show_passes(true),
            &[
                record("doc/a.md", Verdict::Pass, Severity::Error),
                record("doc/b.md", tabs(), Severity::Error),
            ],
            &[],
        );
        let text = String::from_utf8(out).expect("utf-8");
        assert!(text.contains(&format!("{GREEN}ok{RESET} PL004 no-tabs: doc/a.md")));
        assert!(text.contains("PL004 no-tabs at doc/b.md:3"));
        assert!(!text.contains("ok PL004 no-tabs: doc/b.md"));
    }
}
