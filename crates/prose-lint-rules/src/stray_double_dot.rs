//! Rule to catch a stray `..` after a word in rendered prose.
//!
//! # Rationale
//!
//! A word followed by exactly two dots and then a space or the end of the
//! line is almost always a typo for `.` or for the ellipsis `...`. Rendered
//! text is checked so that markup such as relative links (`../guide`) or
//! range syntax in code spans (`a..b`) does not trigger the rule.

use prose_lint_core::{Diagnostic, DocumentContext, Rule, RuleScope, TextInput, Verdict};

/// Rule code for stray-double-dot.
pub const CODE: &str = "PL001";

/// Rule name for stray-double-dot.
pub const NAME: &str = "stray-double-dot";

/// Forbids a letter followed by exactly two dots and whitespace or end of line.
#[derive(Debug, Clone, Default)]
pub struct StrayDoubleDot;

impl StrayDoubleDot {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Returns the byte offset of the first stray `..` in a line.
fn find_stray_double_dot(line: &str) -> Option<usize> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();

    chars.windows(3).enumerate().find_map(|(i, w)| {
        let (_, letter) = w[0];
        let (dots_at, first) = w[1];
        let (_, second) = w[2];
        let terminated = chars.get(i + 3).map_or(true, |&(_, c)| c.is_whitespace());
        (letter.is_alphabetic() && first == '.' && second == '.' && terminated).then_some(dots_at)
    })
}

impl Rule for StrayDoubleDot {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids a stray `..` after a word in rendered text"
    }

    fn input(&self) -> TextInput {
        TextInput::Rendered
    }

    fn default_scope(&self) -> RuleScope {
        RuleScope::documentation()
    }

    fn check(&self, ctx: &DocumentContext) -> Verdict {
        Verdict::from_diagnostics(
            ctx.numbered_lines()
                .filter(|(_, line)| find_stray_double_dot(line).is_some())
                .map(|(n, line)| {
                    Diagnostic::new(format!("stray `..` in: {}", line.trim()))
                        .at_line(n)
                        .with_help("use a single `.` or a three-dot ellipsis `...`")
                })
                .collect(),
        )
    }
}
