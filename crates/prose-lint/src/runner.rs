//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.
//! It is called by the generated test function from `prose_lint::check!()`.

use prose_lint_core::{Analyzer, Config, RunStatus};
use prose_lint_rules::rules_from_config;
use std::path::{Path, PathBuf};

/// Config file names to search for at the workspace root, in priority order.
const CONFIG_CANDIDATES: &[&str] = &["prose-lint.toml", ".prose-lint.toml"];

/// Runs every built-in rule as part of `cargo test`.
///
/// A relative `[analyzer] root` is resolved against the directory holding
/// the config file, or the workspace root when there is none.
///
/// # Panics
///
/// Panics with a formatted report if the run failed, or if the config
/// cannot be loaded or the run hits an environment error.
pub fn run_check(config_path: Option<&str>, fail_on: Option<&str>) {
    let workspace = find_project_root();
    let config_file = locate_config(&workspace, config_path);

    let mut config = match &config_file {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            panic!("prose-lint: failed to load config from {}: {e}", path.display());
        }),
        None => Config::default(),
    };
    if let Some(fail_on) = fail_on {
        config.fail_on = Some(fail_on.to_string());
    }

    let base = config_file
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(workspace.as_path());
    let root = base.join(&config.analyzer.root);

    let mut builder = Analyzer::builder().root(root);
    for rule in rules_from_config(&config) {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.config(config).build().unwrap_or_else(|e| {
        panic!("prose-lint: failed to build analyzer: {e}");
    });

    let (report, status) = analyzer.analyze().unwrap_or_else(|e| {
        panic!("prose-lint: run aborted: {e}");
    });

    match status {
        RunStatus::Failed => panic!("{}", report.format_test_report(analyzer.fail_on())),
        RunStatus::Skipped => eprintln!("prose-lint: nothing to check"),
        RunStatus::Passed => {}
    }
}

/// Returns the config file to load, if any.
fn locate_config(workspace: &Path, explicit_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            workspace.join(path)
        });
    }

    CONFIG_CANDIDATES
        .iter()
        .map(|candidate| workspace.join(candidate))
        .find(|path| path.is_file())
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the workspace root above `CARGO_MANIFEST_DIR`, or the manifest
/// directory itself for a standalone crate.
fn find_project_root() -> PathBuf {
    let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") else {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    };
    let manifest_path = PathBuf::from(manifest_dir);

    manifest_path
        .ancestors()
        .find(|dir| has_workspace_section(&dir.join("Cargo.toml")))
        .map_or_else(|| manifest_path.clone(), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn book(rendered: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "prose-lint.toml",
            "[render]\ncache_dir = \"plain\"\n",
        );
        write(tmp.path(), "doc/intro.md", "# Intro\n");
        write(tmp.path(), "plain/doc/intro.md.txt", rendered);
        tmp
    }

    fn config_arg(tmp: &TempDir) -> String {
        tmp.path().join("prose-lint.toml").display().to_string()
    }

    #[test]
    fn project_root_is_the_workspace() {
        let root = find_project_root();
        assert!(has_workspace_section(&root.join("Cargo.toml")));
    }

    #[test]
    fn explicit_relative_config_is_workspace_relative() {
        let found = locate_config(Path::new("/ws"), Some("book/prose-lint.toml"));
        assert_eq!(found, Some(PathBuf::from("/ws/book/prose-lint.toml")));
    }

    #[test]
    fn missing_config_means_defaults() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(locate_config(tmp.path(), None), None);
    }

    #[test]
    fn passing_book_does_not_panic() {
        let tmp = book("All in curly braces.\n");
        run_check(Some(&config_arg(&tmp)), None);
    }

    #[test]
    #[should_panic(expected = "prose-lint: 1 failing check(s)")]
    fn failing_book_panics_with_report() {
        let tmp = book("Wrap it in brackets.\n");
        run_check(Some(&config_arg(&tmp)), None);
    }

    #[test]
    fn warnings_pass_unless_fail_on_lowered() {
        let tmp = book("Wrap it in brackets.\n");
        let config = tmp.path().join("prose-lint.toml");
        fs::write(
            &config,
            "[render]\ncache_dir = \"plain\"\n\n[rules.bracket-terminology]\nseverity = \"warning\"\n",
        )
        .unwrap();
        let arg = config_arg(&tmp);
        run_check(Some(&arg), None);

        let lowered = std::panic::catch_unwind(|| run_check(Some(&arg), Some("warning")));
        assert!(lowered.is_err());
    }

    #[test]
    #[should_panic(expected = "failed to build analyzer")]
    fn unknown_fail_on_panics() {
        let tmp = book("fine\n");
        run_check(Some(&config_arg(&tmp)), Some("critical"));
    }
}
