//! Rule to forbid tab characters in tracked files.
//!
//! # Rationale
//!
//! Tabs render at different widths in editors, terminals and web views.
//! Files that need them (Makefiles) are excluded by default, and the rule
//! only runs inside a version-control checkout where the tracked file list
//! is meaningful.

use prose_lint_core::{
    Diagnostic, DocumentContext, Exclusion, Rule, RuleScope, TextInput, Verdict,
};

/// Rule code for no-tabs.
pub const CODE: &str = "PL004";

/// Rule name for no-tabs.
pub const NAME: &str = "no-tabs";

/// Forbids `\t` anywhere in a file.
#[derive(Debug, Clone, Default)]
pub struct NoTabs;

impl NoTabs {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoTabs {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids tab characters"
    }

    fn input(&self) -> TextInput {
        TextInput::Raw
    }

    fn default_scope(&self) -> RuleScope {
        RuleScope::tracked()
            .require_vcs_checkout(true)
            .exclude(Exclusion::Path("LICENSE".into()))
            .exclude(Exclusion::Path("Makefile".into()))
            .exclude(Exclusion::Contains("theme/".into()))
    }

    fn check(&self, ctx: &DocumentContext) -> Verdict {
        let lines: Vec<usize> = ctx
            .numbered_lines()
            .filter(|(_, line)| line.contains('\t'))
            .map(|(n, _)| n)
            .collect();

        match lines.first() {
            None => Verdict::Pass,
            Some(&first) => Verdict::Fail(vec![Diagnostic::new(format!(
                "tab characters on lines {lines:?}"
            ))
            .at_line(first)
            .with_help("replace tabs with spaces")]),
        }
    }
}
