//! Rule to require a final newline in every tracked file.

use prose_lint_core::{
    Diagnostic, DocumentContext, Exclusion, Rule, RuleScope, TextInput, Verdict,
};

/// Rule code for trailing-newline.
pub const CODE: &str = "PL003";

/// Rule name for trailing-newline.
pub const NAME: &str = "trailing-newline";

/// Requires non-empty files to end with `\n`.
#[derive(Debug, Clone, Default)]
pub struct TrailingNewline;

impl TrailingNewline {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for TrailingNewline {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires every non-empty file to end with a newline"
    }

    fn input(&self) -> TextInput {
        TextInput::Raw
    }

    fn default_scope(&self) -> RuleScope {
        RuleScope::tracked()
            .exclude(Exclusion::Path("LICENSE".into()))
            .exclude(Exclusion::Contains("theme/".into()))
            .exclude(Exclusion::Path(".nojekyll".into()))
    }

    fn check(&self, ctx: &DocumentContext) -> Verdict {
        if ctx.text.is_empty() || ctx.text.ends_with('\n') {
            return Verdict::Pass;
        }

        let last_line = ctx.numbered_lines().last().map(|(n, _)| n);
        let diagnostic = Diagnostic::new("file does not end with a newline")
            .with_help("add a line break after the last line");
        Verdict::Fail(vec![match last_line {
            Some(n) => diagnostic.at_line(n),
            None => diagnostic,
        }])
    }
}
