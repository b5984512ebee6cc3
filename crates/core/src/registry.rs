use crate::error::{Error, Result};
use crate::route::RoutePath;
use std::collections::BTreeMap;

/// Frozen mapping from symbolic route keys to route paths.
///
/// Built once from the `[routes]` table and handed by reference to every
/// builder. Iteration is ordered by key so anything derived from it is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRegistry {
    routes: BTreeMap<String, RoutePath>,
}

impl RouteRegistry {
    /// Build a registry from `(key, path)` pairs.
    ///
    /// Every pair is checked before returning, so a config with several bad
    /// routes reports all of them at once.
    pub fn from_entries<I, K, P>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        let mut routes = BTreeMap::new();
        let mut errors = Vec::new();

        for (key, path) in entries {
            let key = key.into();
            if key.trim().is_empty() {
                errors.push(Error::ConfigParse("Empty route key".to_string()));
                continue;
            }
            if routes.contains_key(&key) {
                errors.push(Error::DuplicateRouteKey { key });
                continue;
            }
            match RoutePath::parse(path) {
                Ok(path) => {
                    routes.insert(key, path);
                }
                Err(err) => errors.push(err),
            }
        }

        Error::collect(errors)?;
        log::debug!("route registry built with {} routes", routes.len());
        Ok(RouteRegistry { routes })
    }

    /// Look up the path registered under `key`.
    pub fn resolve(&self, key: &str) -> Result<&RoutePath> {
        self.routes.get(key).ok_or_else(|| Error::UnknownRoute {
            key: key.to_string(),
        })
    }

    /// Substitute every `{key}` in `template` with its registered path.
    ///
    /// Text outside braces is copied verbatim, so `{backend.nest}/basic` becomes
    /// `/backend/nest/basic`. A template without braces is returned unchanged.
    pub fn expand(&self, template: &str) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find(['{', '}']) {
            if rest[open..].starts_with('}') {
                return Err(bad_template(template, "unmatched '}'"));
            }

            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| bad_template(template, "unterminated '{'"))?;

            let key = after[..close].trim();
            if key.is_empty() {
                return Err(bad_template(template, "empty route key"));
            }
            if key.contains('{') {
                return Err(bad_template(template, "nested '{'"));
            }

            out.push_str(self.resolve(key)?.as_str());
            rest = &after[close + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }

    /// Expand `template` and parse the result as a route path.
    pub fn expand_path(&self, template: &str) -> Result<RoutePath> {
        RoutePath::parse(self.expand(template)?)
    }

    pub fn contains_path(&self, path: &RoutePath) -> bool {
        self.routes.values().any(|p| p == path)
    }

    /// A registered path that differs from `path` only by a trailing slash.
    pub fn slash_variant(&self, path: &RoutePath) -> Option<&RoutePath> {
        self.routes.values().find(|p| p.slash_variant_of(path))
    }

    /// Pairs of registered paths that differ only by a trailing slash.
    ///
    /// These are reported, never merged: whether `/rust` and `/rust/` are meant
    /// to be the same section can't be decided from the table alone.
    pub fn trailing_slash_conflicts(&self) -> Vec<(RoutePath, RoutePath)> {
        let mut by_stem: BTreeMap<&str, Vec<&RoutePath>> = BTreeMap::new();
        for path in self.routes.values() {
            by_stem.entry(path.without_trailing_slash()).or_default().push(path);
        }

        let mut conflicts = Vec::new();
        for paths in by_stem.values() {
            let without = paths.iter().find(|p| !p.has_trailing_slash());
            let with = paths.iter().find(|p| p.has_trailing_slash());
            if let (Some(a), Some(b)) = (without, with) {
                conflicts.push(((*a).clone(), (*b).clone()));
            }
        }
        conflicts
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoutePath)> {
        self.routes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn bad_template(template: &str, reason: &str) -> Error {
    Error::InvalidTemplate {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}
