//! Check command implementation.

use anyhow::{Context, Result};
use prose_lint_core::{Analyzer, Config, Exclusion, RuleBox, RunStatus};
use prose_lint_rules::{rule_by_name, rules_from_config};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command and returns the run status.
///
/// Without `path`, the analysis root is `[analyzer] root`, relative to the
/// directory of a project or explicit config file.
///
/// Environment errors from the analyzer are returned unwrapped so the
/// caller can render them as diagnostics. With `verbose`, text output also
/// lists passing checks.
pub fn run(
    path: Option<&Path>,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
    verbose: bool,
) -> Result<RunStatus> {
    let config = match source {
        ConfigSource::Default => Config::default(),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    let rules_to_add = match rules_filter {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(&names, &config)
        }
        None => rules_from_config(&config),
    };

    let root = match (path, source.base_dir()) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(base)) => Some(base.join(&config.analyzer.root)),
        (None, None) => None,
    };

    let mut builder = Analyzer::builder().config(config);
    if let Some(root) = root {
        builder = builder.root(root);
    }

    for pattern in exclude {
        builder = builder.exclude(Exclusion::Contains(pattern));
    }

    for rule in rules_to_add {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build()?;

    tracing::info!(
        "Checking {} with {} rule(s)",
        analyzer.root().display(),
        analyzer.rule_count()
    );

    let mut sink = super::output::stdout_sink(format, analyzer.fail_on(), verbose);
    let (_, status) = analyzer.run(sink.as_mut())?;

    Ok(status)
}

/// Keeps the configured rules named in `names`, in catalogue order.
fn filter_rules(names: &[&str], config: &Config) -> Vec<RuleBox> {
    for name in names {
        if rule_by_name(name).is_none() {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    rules_from_config(config)
        .into_iter()
        .filter(|rule| {
            names
                .iter()
                .any(|n| *n == rule.name() || n.eq_ignore_ascii_case(rule.code()))
        })
        .collect()
}
