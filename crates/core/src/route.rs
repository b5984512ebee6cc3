use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute URL path identifying a page or section of the site.
///
/// Always starts with `/`, is never empty and never contains `//`. The trailing
/// slash is kept exactly as written: `/rust` and `/rust/` are different paths.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePath(String);

impl RoutePath {
    pub fn parse(path: impl Into<String>) -> Result<Self> {
        let path = path.into();

        if path.is_empty() {
            return Err(invalid(&path, "path is empty"));
        }
        if !path.starts_with('/') {
            return Err(invalid(&path, "path must start with '/'"));
        }
        if path.contains("//") {
            return Err(invalid(&path, "path contains consecutive slashes"));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(invalid(&path, "path contains whitespace"));
        }

        Ok(RoutePath(path))
    }

    /// Append a relative path, joining at exactly one `/`.
    ///
    /// Only the boundary is touched: `/docs` + `/intro/` and `/docs/` + `intro/`
    /// both give `/docs/intro/`. An empty `rel` returns the prefix itself.
    pub fn join(&self, rel: &str) -> Result<Self> {
        if rel.is_empty() {
            return Ok(self.clone());
        }

        let base = self.0.strip_suffix('/').unwrap_or(&self.0);
        let rel = rel.strip_prefix('/').unwrap_or(rel);
        RoutePath::parse(format!("{}/{}", base, rel))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.0.ends_with('/')
    }

    /// The path with one trailing slash removed. The root path stays `/`.
    pub fn without_trailing_slash(&self) -> &str {
        if self.is_root() {
            return &self.0;
        }
        self.0.strip_suffix('/').unwrap_or(&self.0)
    }

    /// True when both paths differ only by a trailing slash.
    pub fn slash_variant_of(&self, other: &RoutePath) -> bool {
        self != other && self.without_trailing_slash() == other.without_trailing_slash()
    }

    /// True when `path` equals this prefix or lives below it.
    pub fn is_prefix_of(&self, path: &str) -> bool {
        if self.is_root() {
            return path.starts_with('/');
        }
        let base = self.without_trailing_slash();
        path == base || path.strip_prefix(base).is_some_and(|rest| rest.starts_with('/'))
    }
}

fn invalid(path: &str, reason: &str) -> Error {
    Error::InvalidRoutePath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoutePath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        RoutePath::parse(value)
    }
}

impl From<RoutePath> for String {
    fn from(path: RoutePath) -> Self {
        path.0
    }
}
