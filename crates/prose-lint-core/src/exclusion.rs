//! Exclusion predicates that remove documents before evaluation.

use serde::{Deserialize, Serialize};

/// A configured exclusion, matched against document identifiers.
///
/// In TOML these are written as inline tables:
///
/// ```toml
/// exclude = [{ path = "LICENSE" }, { contains = "theme/" }, { glob = "**/*.png" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exclusion {
    /// Identifier equals this path exactly.
    Path(String),
    /// Identifier contains this substring.
    Contains(String),
    /// Identifier matches this glob pattern.
    Glob(String),
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(p) => write!(f, "path = {p:?}"),
            Self::Contains(s) => write!(f, "contains = {s:?}"),
            Self::Glob(g) => write!(f, "glob = {g:?}"),
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Path(String),
    Contains(String),
    Glob(glob::Pattern),
}

/// Compiled exclusion predicates; a document is dropped if any matches.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    matchers: Vec<Matcher>,
}

impl ExclusionSet {
    /// Compiles exclusions, validating glob patterns once up front.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob pattern is invalid.
    pub fn compile<'a, I>(exclusions: I) -> Result<Self, glob::PatternError>
    where
        I: IntoIterator<Item = &'a Exclusion>,
    {
        let matchers = exclusions
            .into_iter()
            .map(|e| {
                Ok(match e {
                    Exclusion::Path(p) => Matcher::Path(p.clone()),
                    Exclusion::Contains(s) => Matcher::Contains(s.clone()),
                    Exclusion::Glob(g) => Matcher::Glob(glob::Pattern::new(g)?),
                })
            })
            .collect::<Result<Vec<_>, glob::PatternError>>()?;
        Ok(Self { matchers })
    }

    /// Returns true if the identifier is excluded.
    #[must_use]
    pub fn matches(&self, identifier: &str) -> bool {
        self.matchers.iter().any(|m| match m {
            Matcher::Path(p) => identifier == p,
            Matcher::Contains(s) => !s.is_empty() && identifier.contains(s.as_str()),
            Matcher::Glob(g) => g.matches(identifier),
        })
    }

    /// Number of predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Returns true if there are no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
