//! Rule to require qualified bracket terminology in rendered prose.
//!
//! # Rationale
//!
//! "Bracket" means different things to different readers. House style
//! names the shape every time: `curly braces`, `square brackets`,
//! `angle brackets` or `lenticular brackets`.
//!
//! # Configuration
//!
//! - `exempt`: document identifiers that always pass, typically the
//!   glossary page that defines the terms (default: none)
//!
//! The fixed phrase `Opening bracket is required for` is ignored, as it
//! appears verbatim in quoted tool output.

use crate::words::{collapse_whitespace, words, Word};
use prose_lint_core::{Diagnostic, DocumentContext, Rule, RuleScope, TextInput, Verdict};

/// Rule code for bracket-terminology.
pub const CODE: &str = "PL002";

/// Rule name for bracket-terminology.
pub const NAME: &str = "bracket-terminology";

const BENIGN_PHRASE: &str = "Opening bracket is required for";

/// Words to show on each side of an offending word.
const EXCERPT_WORDS: usize = 3;

/// A term that must be preceded by one of its qualifiers.
struct Term {
    words: &'static [&'static str],
    qualifiers: &'static [&'static str],
}

const TERMS: &[Term] = &[
    Term {
        words: &["braces"],
        qualifiers: &["curly"],
    },
    Term {
        words: &["brackets", "bracket", "bracketed"],
        qualifiers: &["square", "angle", "lenticular"],
    },
];

impl Term {
    fn help(&self) -> String {
        let options: Vec<String> = self
            .qualifiers
            .iter()
            .map(|q| format!("`{q} {}`", self.words[0]))
            .collect();
        format!("write {}", options.join(" or "))
    }
}

/// Requires `braces` and `bracket(s|ed)` to carry a shape qualifier.
#[derive(Debug, Clone, Default)]
pub struct BracketTerminology {
    /// Document identifiers that always pass.
    pub exempt: Vec<String>,
}

impl BracketTerminology {
    /// Creates a new rule with no exempt documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the exempt document identifiers.
    #[must_use]
    pub fn exempt<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt = identifiers.into_iter().map(Into::into).collect();
        self
    }

    fn is_exempt(&self, identifier: &str) -> bool {
        self.exempt.iter().any(|e| e == identifier)
    }
}

/// Whitespace-collapsed text with the benign phrase cut out.
///
/// `origin[i]` is the byte offset in the original text of byte `i`.
fn normalize(text: &str) -> (String, Vec<usize>) {
    let (collapsed, collapsed_origin) = collapse_whitespace(text);

    let mut out = String::with_capacity(collapsed.len());
    let mut origin = Vec::with_capacity(collapsed.len());
    let mut cursor = 0;

    for (at, _) in collapsed.match_indices(BENIGN_PHRASE) {
        out.push_str(&collapsed[cursor..at]);
        origin.extend_from_slice(&collapsed_origin[cursor..at]);
        cursor = at + BENIGN_PHRASE.len();
    }
    out.push_str(&collapsed[cursor..]);
    origin.extend_from_slice(&collapsed_origin[cursor..]);

    (out, origin)
}

fn is_qualified(text: &str, previous: Option<&Word<'_>>, word: &Word<'_>, term: &Term) -> bool {
    previous.is_some_and(|prev| {
        text[prev.end..word.start].chars().all(char::is_whitespace)
            && term
                .qualifiers
                .iter()
                .any(|q| prev.text.eq_ignore_ascii_case(q))
    })
}

fn excerpt<'a>(text: &'a str, tokens: &[Word<'_>], index: usize) -> &'a str {
    let first = &tokens[index.saturating_sub(EXCERPT_WORDS)];
    let last = &tokens[(index + EXCERPT_WORDS).min(tokens.len() - 1)];
    &text[first.start..last.end]
}

impl Rule for BracketTerminology {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires `curly braces` and `square`/`angle`/`lenticular brackets`"
    }

    fn input(&self) -> TextInput {
        TextInput::Rendered
    }

    fn default_scope(&self) -> RuleScope {
        RuleScope::documentation()
    }

    fn check(&self, ctx: &DocumentContext) -> Verdict {
        if self.is_exempt(ctx.identifier) {
            return Verdict::Pass;
        }

        let (text, origin) = normalize(ctx.text);
        let tokens = words(&text);
        let mut diagnostics = Vec::new();

        for (i, word) in tokens.iter().enumerate() {
            let lower = word.text.to_lowercase();
            let Some(term) = TERMS.iter().find(|t| t.words.contains(&lower.as_str())) else {
                continue;
            };
            let previous = i.checked_sub(1).map(|p| &tokens[p]);
            if is_qualified(&text, previous, word, term) {
                continue;
            }

            diagnostics.push(
                Diagnostic::new(format!(
                    "unqualified `{}` in \"{}\"",
                    word.text,
                    excerpt(&text, &tokens, i)
                ))
                .at_line(ctx.line_of(origin[word.start]))
                .with_help(term.help()),
            );
        }

        Verdict::from_diagnostics(diagnostics)
    }
}
