//! # prose-lint-rules
//!
//! Built-in house-style rules for prose-lint.
//!
//! Two rules read rendered text (what a reader sees), two read the raw
//! file bytes.
//!
//! ## Available Rules
//!
//! | Code | Name | Input | Description |
//! |------|------|-------|-------------|
//! | PL001 | `stray-double-dot` | rendered | Forbids a word followed by exactly `..` |
//! | PL002 | `bracket-terminology` | rendered | Requires `curly braces`, `square brackets`, etc. |
//! | PL003 | `trailing-newline` | raw | Requires non-empty files to end with a newline |
//! | PL004 | `no-tabs` | raw | Forbids tab characters |
//!
//! ## Usage
//!
//! ```ignore
//! use prose_lint_core::Analyzer;
//! use prose_lint_rules::{NoTabs, StrayDoubleDot};
//!
//! let analyzer = Analyzer::builder()
//!     .root(".")
//!     .rule(StrayDoubleDot::new())
//!     .rule(NoTabs::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bracket_terminology;
mod catalog;
mod no_tabs;
mod stray_double_dot;
mod trailing_newline;
mod words;

pub use bracket_terminology::BracketTerminology;
pub use catalog::{all_rules, rule_by_name, rules_from_config};
pub use no_tabs::NoTabs;
pub use stray_double_dot::StrayDoubleDot;
pub use trailing_newline::TrailingNewline;
