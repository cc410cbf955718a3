//! Integration tests for the `prose_lint::check!()` macro.
//!
//! Runs every built-in rule over the sample book under `tests/fixtures`,
//! covering macro expansion, config load, analysis and a passing status.

prose_lint::check!(config = "crates/prose-lint/tests/fixtures/book/prose-lint.toml");
