//! # prose-lint
//!
//! House-style linter for documentation trees.
//!
//! This is the facade crate that re-exports the core framework and the
//! built-in rules.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! prose-lint = "0.3"
//! ```
//!
//! ```rust,ignore
//! // tests/docs_style.rs
//! prose_lint::check!();
//! ```
//!
//! This runs every built-in rule as part of `cargo test`, configured by the
//! `prose-lint.toml` at the workspace root. Both settings can be given
//! explicitly:
//!
//! ```rust,ignore
//! prose_lint::check!(config = "book/prose-lint.toml", fail_on = "warning");
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use prose_lint::{Analyzer, Config};
//!
//! let config = Config::from_file("prose-lint.toml".as_ref())?;
//! let mut builder = Analyzer::builder().root(".");
//! for rule in prose_lint::rules::rules_from_config(&config) {
//!     builder = builder.rule_box(rule);
//! }
//! let (report, status) = builder.config(config).build()?.analyze()?;
//! ```

#![forbid(unsafe_code)]

pub use prose_lint_core::*;

/// Built-in rules.
pub mod rules {
    pub use prose_lint_rules::*;
}

mod runner;

/// Generates a `#[test]` that runs every built-in rule and fails on
/// violations.
///
/// Accepts `config = "path"` (relative to the workspace root) and
/// `fail_on = "error" | "warning" | "info"`, in that order.
#[macro_export]
macro_rules! check {
    (@run $config:expr, $fail_on:expr) => {
        #[test]
        fn prose_lint_check() {
            $crate::__internal::run_check($config, $fail_on);
        }
    };
    () => {
        $crate::check!(@run None, None);
    };
    (config = $config:literal $(,)?) => {
        $crate::check!(@run Some($config), None);
    };
    (fail_on = $fail_on:literal $(,)?) => {
        $crate::check!(@run None, Some($fail_on));
    };
    (config = $config:literal, fail_on = $fail_on:literal $(,)?) => {
        $crate::check!(@run Some($config), Some($fail_on));
    };
}

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::run_check;
}
