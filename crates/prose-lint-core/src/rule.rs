//! Rule trait for defining text rules.

use crate::context::DocumentContext;
use crate::enumerator::FileSet;
use crate::exclusion::Exclusion;
use crate::types::{Severity, Verdict};

/// Which representation of a document a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextInput {
    /// The file's own bytes, for structural checks (tabs, final newline).
    Raw,
    /// Plain text as a reader sees it after rendering, for prose checks.
    Rendered,
}

impl std::fmt::Display for TextInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Rendered => write!(f, "rendered"),
        }
    }
}

/// Which documents a rule is applied to.
///
/// Rules declare a default scope; configuration may override each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleScope {
    /// Candidate file set.
    pub file_set: FileSet,
    /// Skip the whole rule when the root is not a version-control checkout.
    pub require_vcs_checkout: bool,
    /// Documents removed from consideration before evaluation.
    pub exclude: Vec<Exclusion>,
}

impl RuleScope {
    /// Documentation files only, no gate, no exclusions.
    #[must_use]
    pub fn documentation() -> Self {
        Self {
            file_set: FileSet::Documentation,
            require_vcs_checkout: false,
            exclude: Vec::new(),
        }
    }

    /// All tracked files, no gate, no exclusions.
    #[must_use]
    pub fn tracked() -> Self {
        Self {
            file_set: FileSet::Tracked,
            require_vcs_checkout: false,
            exclude: Vec::new(),
        }
    }

    /// Sets the version-control gate.
    #[must_use]
    pub fn require_vcs_checkout(mut self, require: bool) -> Self {
        self.require_vcs_checkout = require;
        self
    }

    /// Adds an exclusion.
    #[must_use]
    pub fn exclude(mut self, exclusion: Exclusion) -> Self {
        self.exclude.push(exclusion);
        self
    }
}

/// A per-document text rule.
///
/// Rules are pure functions of a document identifier and its checkable
/// text. They never read other files and never depend on another rule.
///
/// # Example
///
/// ```ignore
/// use prose_lint_core::{Diagnostic, DocumentContext, Rule, RuleScope, TextInput, Verdict};
///
/// pub struct NoTodo;
///
/// impl Rule for NoTodo {
///     fn name(&self) -> &'static str { "no-todo" }
///     fn code(&self) -> &'static str { "PL100" }
///     fn input(&self) -> TextInput { TextInput::Rendered }
///     fn default_scope(&self) -> RuleScope { RuleScope::documentation() }
///
///     fn check(&self, ctx: &DocumentContext) -> Verdict {
///         Verdict::from_diagnostics(
///             ctx.numbered_lines()
///                 .filter(|(_, line)| line.contains("TODO"))
///                 .map(|(n, line)| Diagnostic::new(line).at_line(n))
///                 .collect(),
///         )
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-tabs").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PL004").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for failing verdicts from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Which representation of the document this rule inspects.
    fn input(&self) -> TextInput;

    /// Documents this rule applies to unless configuration says otherwise.
    fn default_scope(&self) -> RuleScope;

    /// Checks a single document.
    fn check(&self, ctx: &DocumentContext) -> Verdict;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Applies one rule to one document's text.
#[must_use]
pub fn evaluate(rule: &dyn Rule, identifier: &str, text: &str) -> Verdict {
    rule.check(&DocumentContext::new(identifier, text))
}
