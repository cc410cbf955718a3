//! List rules command implementation.

use prose_lint_core::Rule;
use prose_lint_rules::all_rules;

/// Describes the files a rule checks by default.
fn scope_summary(rule: &dyn Rule) -> String {
    let scope = rule.default_scope();
    let mut summary = scope.file_set.to_string();
    if scope.require_vcs_checkout {
        summary.push_str(", checkout only");
    }
    if !scope.exclude.is_empty() {
        summary.push_str(&format!(", {} exclusion(s)", scope.exclude.len()));
    }
    summary
}

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<7} {:<21} {:<9} Default scope", "Code", "Name", "Input");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<7} {:<21} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.input(),
            scope_summary(rule.as_ref())
        );
        println!("        {}", rule.description());
    }

    println!("\nScopes and options are set per rule under [rules.<name>] in prose-lint.toml.");
    println!("Use --rules to run only some of them, e.g.:");
    println!("  prose-lint check --rules stray-double-dot,PL004");
}

#[cfg(test)]
mod tests {
    use super::*;
    use prose_lint_rules::rule_by_name;

    #[test]
    fn scope_summary_mentions_gate_and_exclusions() {
        let no_tabs = rule_by_name("no-tabs").unwrap();
        assert_eq!(
            scope_summary(no_tabs.as_ref()),
            "tracked files, checkout only, 3 exclusion(s)"
        );

        let dots = rule_by_name("PL001").unwrap();
        assert_eq!(scope_summary(dots.as_ref()), "documentation files");
    }
}
