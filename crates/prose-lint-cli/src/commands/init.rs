//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# prose-lint configuration

# Lowest severity that fails the run: "error", "warning" or "info"
fail_on = "error"

[analyzer]
# Root of the documentation project (default: current directory)
# root = "."

# Directories holding documentation sources, relative to root
docs = ["doc"]

# File extensions that count as documentation
extensions = ["md"]

# Honour .gitignore when walking documentation directories
respect_gitignore = true

# Exclusions applied to every rule: { path = ... }, { contains = ... } or { glob = ... }
exclude = [
    { glob = "**/node_modules/**" },
]

[render]
# Rendered plain text is read from <cache_dir>/<document>.<extension>
cache_dir = "build/plain"
extension = "txt"
# ...or produced by a command that receives the document path
# command = ["pandoc", "-t", "plain"]

# Rule configurations
# Every rule accepts enabled, severity, include_all_tracked_files,
# require_vcs_checkout and exclude (which replaces the rule's defaults).

[rules.stray-double-dot]
enabled = true

[rules.bracket-terminology]
enabled = true
# Documents allowed to use the bare terms, such as a glossary
# exempt = ["doc/reference/brackets.md"]

[rules.trailing-newline]
enabled = true

[rules.no-tabs]
enabled = true
# severity = "warning"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("prose-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created prose-lint.toml");
    println!("\nNext steps:");
    println!("  1. Point [analyzer] docs and [render] at your documentation");
    println!("  2. Run: prose-lint check");

    Ok(())
}
