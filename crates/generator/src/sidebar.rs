use docnav_core::{Error, Result, RoutePath, RouteRegistry, SidebarEntryDef, SidebarGroup};
use std::collections::HashMap;

/// Builds sidebar trees from entry definitions.
///
/// Every path in a tree is the sidebar prefix joined with the entry's own
/// relative path, at any depth. Output order matches input order.
pub struct SidebarBuilder<'a> {
    routes: &'a RouteRegistry,
}

impl<'a> SidebarBuilder<'a> {
    pub fn new(routes: &'a RouteRegistry) -> Self {
        SidebarBuilder { routes }
    }

    /// Build the groups shown under `prefix`.
    ///
    /// `prefix` and each entry path may reference routes as `{key}`. Each
    /// top-level entry becomes one group. A path produced twice anywhere in the
    /// tree fails with [`Error::DuplicateRoute`]; all problems in the tree are
    /// reported together.
    pub fn build(&self, prefix: &str, entries: &[SidebarEntryDef]) -> Result<Vec<SidebarGroup>> {
        let prefix = self.routes.expand_path(prefix)?;
        log::debug!("building sidebar under {} ({} groups)", prefix, entries.len());

        let mut seen = HashMap::new();
        let mut errors = Vec::new();
        let groups = entries
            .iter()
            .map(|entry| self.build_entry(&prefix, entry, &mut seen, &mut errors))
            .collect();

        Error::collect(errors)?;
        Ok(groups)
    }

    fn build_entry(
        &self,
        prefix: &RoutePath,
        entry: &SidebarEntryDef,
        seen: &mut HashMap<RoutePath, String>,
        errors: &mut Vec<Error>,
    ) -> SidebarGroup {
        let link = entry.path.as_deref().and_then(|rel| {
            match self.resolve_link(prefix, rel) {
                Ok(link) => {
                    if let Some(first) = seen.get(&link) {
                        errors.push(Error::DuplicateRoute {
                            path: link.to_string(),
                            first: first.clone(),
                            second: entry.text.clone(),
                        });
                    } else {
                        seen.insert(link.clone(), entry.text.clone());
                    }
                    Some(link)
                }
                Err(err) => {
                    errors.push(err);
                    None
                }
            }
        });

        let items = entry
            .items
            .iter()
            .map(|child| self.build_entry(prefix, child, seen, errors))
            .collect();

        SidebarGroup {
            text: entry.text.clone(),
            link,
            items,
            collapsible: entry.collapsible,
            collapsed: entry.collapsed,
        }
    }

    fn resolve_link(&self, prefix: &RoutePath, rel: &str) -> Result<RoutePath> {
        let rel = self.routes.expand(rel)?;
        prefix.join(&rel)
    }
}

/// All links in a sidebar tree, depth first, in render order.
pub fn flatten_links(groups: &[SidebarGroup]) -> Vec<(&str, &RoutePath)> {
    fn walk<'g>(nodes: &'g [SidebarGroup], out: &mut Vec<(&'g str, &'g RoutePath)>) {
        for node in nodes {
            if let Some(link) = &node.link {
                out.push((node.text.as_str(), link));
            }
            walk(&node.items, out);
        }
    }

    let mut out = Vec::new();
    walk(groups, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn empty_routes() -> RouteRegistry {
        RouteRegistry::default()
    }

    #[test]
    fn test_build_nested_group() {
        let routes = empty_routes();
        let entries = vec![
            SidebarEntryDef::new("intro", "/intro/"),
            SidebarEntryDef::new("usage", "/usage/")
                .with_items(vec![SidebarEntryDef::new("basic", "/usage/basic/")]),
        ];

        let groups = SidebarBuilder::new(&routes).build("/docs", &entries).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].link.as_ref().unwrap().as_str(), "/docs/intro/");
        assert_eq!(groups[1].link.as_ref().unwrap().as_str(), "/docs/usage/");
        assert_eq!(groups[1].items.len(), 1);
        assert_eq!(groups[1].items[0].text, "basic");
        assert_eq!(
            groups[1].items[0].link.as_ref().unwrap().as_str(),
            "/docs/usage/basic/"
        );
    }

    #[test]
    fn test_build_rejects_duplicate_paths() {
        let routes = empty_routes();
        let entries = vec![
            SidebarEntryDef::new("intro", "/intro/"),
            SidebarEntryDef::new("introduction", "intro/"),
        ];

        let err = SidebarBuilder::new(&routes).build("/docs", &entries).unwrap_err();
        match err {
            Error::DuplicateRoute { path, first, second } => {
                assert_eq!(path, "/docs/intro/");
                assert_eq!(first, "intro");
                assert_eq!(second, "introduction");
            }
            other => panic!("expected DuplicateRoute, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_duplicates_across_depths() {
        let routes = empty_routes();
        let entries = vec![
            SidebarEntryDef::section("Chapter 1", vec![SidebarEntryDef::new("a", "/a")]),
            SidebarEntryDef::section("Chapter 2", vec![SidebarEntryDef::new("again", "/a")]),
        ];

        let err = SidebarBuilder::new(&routes).build("/book/", &entries).unwrap_err();
        assert!(matches!(err, Error::DuplicateRoute { .. }));
    }

    #[test]
    fn test_build_reports_all_errors() {
        let routes = empty_routes();
        let entries = vec![
            SidebarEntryDef::new("a", "/a"),
            SidebarEntryDef::new("a2", "/a"),
            SidebarEntryDef::new("ghost", "{ghost}/x"),
            SidebarEntryDef::new("bad", "/b//c"),
        ];

        let err = SidebarBuilder::new(&routes).build("/docs", &entries).unwrap_err();
        assert_eq!(err.count(), 3);
    }

    #[test]
    fn test_build_preserves_order() {
        let routes = empty_routes();
        let labels = ["summary", "easy", "medium", "hard"];
        let entries: Vec<_> = labels
            .iter()
            .map(|l| SidebarEntryDef::new(*l, format!("/{}", l)))
            .collect();

        let groups = SidebarBuilder::new(&routes)
            .build("/typescript/type-challenges", &entries)
            .unwrap();

        let texts: Vec<_> = groups.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, labels);
    }

    #[test]
    fn test_build_expands_route_templates() {
        let routes = RouteRegistry::from_entries([
            ("feMonitor", "/fe-monitor-system/"),
            ("binaryTree", "/algorithm/binary-tree"),
        ])
        .unwrap();

        let groups = SidebarBuilder::new(&routes)
            .build("{binaryTree}", &[SidebarEntryDef::section(
                "Binary tree",
                vec![SidebarEntryDef::new("BFS", "/bfs/")],
            )])
            .unwrap();
        assert_eq!(groups[0].link, None);
        assert_eq!(
            groups[0].items[0].link.as_ref().unwrap().as_str(),
            "/algorithm/binary-tree/bfs/"
        );

        let groups = SidebarBuilder::new(&routes)
            .build("{feMonitor}", &[SidebarEntryDef::new("Basics", "theoretical-chapter/basic/")])
            .unwrap();
        assert_eq!(
            groups[0].link.as_ref().unwrap().as_str(),
            "/fe-monitor-system/theoretical-chapter/basic/"
        );
    }

    #[test]
    fn test_build_unknown_prefix_route() {
        let routes = empty_routes();
        let err = SidebarBuilder::new(&routes).build("{nowhere}", &[]).unwrap_err();
        assert!(matches!(err, Error::UnknownRoute { .. }));
    }

    #[test]
    fn test_flattened_links_are_unique() {
        let routes = empty_routes();
        let entries = vec![
            SidebarEntryDef::section(
                "Theory",
                vec![
                    SidebarEntryDef::new("Basics", "/theory/basic/"),
                    SidebarEntryDef::section(
                        "Sentry",
                        vec![SidebarEntryDef::new("Core", "/theory/sentry/core/")],
                    ),
                ],
            ),
            SidebarEntryDef::section(
                "Practice",
                vec![SidebarEntryDef::new("SDK", "/coding/sdk/")],
            ),
        ];

        let groups = SidebarBuilder::new(&routes)
            .build("/fe-monitor-system", &entries)
            .unwrap();
        let links = flatten_links(&groups);

        assert_eq!(links.len(), 3);
        let unique: HashSet<_> = links.iter().map(|(_, l)| *l).collect();
        assert_eq!(unique.len(), links.len());
        assert_eq!(links[1].0, "Core");
        assert_eq!(links[1].1.as_str(), "/fe-monitor-system/theory/sentry/core/");
    }

    #[test]
    fn test_collapse_flags_carried_through() {
        let routes = empty_routes();
        let mut group = SidebarEntryDef::section("Hooks", vec![SidebarEntryDef::new("useRef", "/use-ref/")]);
        group.collapsible = Some(true);
        group.collapsed = Some(false);

        let groups = SidebarBuilder::new(&routes).build("/react", &[group]).unwrap();
        assert_eq!(groups[0].collapsible, Some(true));
        assert_eq!(groups[0].collapsed, Some(false));
    }
}
