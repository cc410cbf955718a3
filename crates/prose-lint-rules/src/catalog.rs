//! The catalogue of built-in rules.

use crate::{BracketTerminology, NoTabs, StrayDoubleDot, TrailingNewline};
use prose_lint_core::{Config, RuleBox};
use tracing::debug;

/// Returns every built-in rule with default settings, in run order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(StrayDoubleDot::new()),
        Box::new(BracketTerminology::new()),
        Box::new(TrailingNewline::new()),
        Box::new(NoTabs::new()),
    ]
}

/// Looks up a built-in rule by name (`no-tabs`) or code (`PL004`).
#[must_use]
pub fn rule_by_name(name: &str) -> Option<RuleBox> {
    all_rules()
        .into_iter()
        .find(|r| r.name() == name || r.code().eq_ignore_ascii_case(name))
}

/// Returns every built-in rule with its options taken from `config`.
///
/// Enablement, severity and scope overrides are applied later by the
/// analyzer; this only fills in rule-specific options.
#[must_use]
pub fn rules_from_config(config: &Config) -> Vec<RuleBox> {
    let exempt = config
        .rules
        .get(crate::bracket_terminology::NAME)
        .map(|rc| rc.get_str_array("exempt"))
        .unwrap_or_default();
    if !exempt.is_empty() {
        debug!("Exempt from bracket-terminology: {}", exempt.join(", "));
    }

    vec![
        Box::new(StrayDoubleDot::new()),
        Box::new(BracketTerminology::new().exempt(exempt)),
        Box::new(TrailingNewline::new()),
        Box::new(NoTabs::new()),
    ]
}
