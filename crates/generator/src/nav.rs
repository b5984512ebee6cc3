use docnav_core::{Error, NavItem, NavItemDef, Result, RoutePath, RouteRegistry};
use std::collections::HashMap;

/// Builds the navigation bar.
///
/// The bar is shallow: top-level items may open a dropdown, dropdown items
/// must be plain links.
pub struct NavBuilder<'a> {
    routes: &'a RouteRegistry,
}

impl<'a> NavBuilder<'a> {
    pub fn new(routes: &'a RouteRegistry) -> Self {
        NavBuilder { routes }
    }

    pub fn build(&self, items: &[NavItemDef]) -> Result<Vec<NavItem>> {
        log::debug!("building nav bar with {} items", items.len());

        let mut seen = HashMap::new();
        let mut errors = Vec::new();
        let nav = items
            .iter()
            .filter_map(|def| self.build_item(def, 0, &mut seen, &mut errors))
            .collect();

        Error::collect(errors)?;
        Ok(nav)
    }

    fn build_item(
        &self,
        def: &NavItemDef,
        depth: usize,
        seen: &mut HashMap<RoutePath, String>,
        errors: &mut Vec<Error>,
    ) -> Option<NavItem> {
        if def.text.trim().is_empty() {
            errors.push(invalid(def, "text must not be empty"));
            return None;
        }

        let active_match = match def.active_match.as_deref().map(|m| self.routes.expand_path(m)) {
            Some(Ok(prefix)) => Some(String::from(prefix)),
            Some(Err(err)) => {
                errors.push(err);
                None
            }
            None => None,
        };

        match (&def.link, def.items.is_empty()) {
            (Some(_), false) => {
                errors.push(invalid(def, "has both a link and dropdown items"));
                None
            }
            (None, true) => {
                errors.push(invalid(def, "needs either a link or dropdown items"));
                None
            }
            (Some(template), true) => {
                let link = match self.routes.expand_path(template) {
                    Ok(link) => link,
                    Err(err) => {
                        errors.push(err);
                        return None;
                    }
                };

                if let Some(first) = seen.get(&link) {
                    errors.push(Error::DuplicateRoute {
                        path: link.to_string(),
                        first: first.clone(),
                        second: def.text.clone(),
                    });
                } else {
                    seen.insert(link.clone(), def.text.clone());
                }

                Some(NavItem::Link {
                    text: def.text.clone(),
                    link,
                    active_match,
                })
            }
            (None, false) => {
                if depth > 0 {
                    errors.push(invalid(def, "dropdown menus nest one level only"));
                    return None;
                }

                let items = def
                    .items
                    .iter()
                    .filter_map(|child| self.build_item(child, depth + 1, seen, errors))
                    .collect();

                Some(NavItem::Menu {
                    text: def.text.clone(),
                    items,
                    active_match,
                })
            }
        }
    }
}

fn invalid(def: &NavItemDef, reason: &str) -> Error {
    Error::InvalidNavItem {
        text: def.text.clone(),
        reason: reason.to_string(),
    }
}

/// Every link in the bar with the label it appears under.
pub fn nav_links(items: &[NavItem]) -> Vec<(&str, &RoutePath)> {
    let mut out = Vec::new();
    for item in items {
        if let Some(link) = item.link() {
            out.push((item.text(), link));
        }
        for child in item.items() {
            if let Some(link) = child.link() {
                out.push((child.text(), link));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RouteRegistry {
        RouteRegistry::from_entries([
            ("A", "/a"),
            ("B", "/b"),
            ("algorithm.root", "/algorithm"),
            ("algorithm.array", "/algorithm/array"),
            ("algorithm.binaryTree", "/algorithm/binary-tree"),
        ])
        .unwrap()
    }

    #[test]
    fn test_link_resolves_through_registry() {
        let routes = routes();
        let nav = NavBuilder::new(&routes)
            .build(&[NavItemDef::link("A", "{A}")])
            .unwrap();

        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].link().unwrap().as_str(), "/a");
    }

    #[test]
    fn test_dropdown_with_active_match() {
        let routes = routes();
        let nav = NavBuilder::new(&routes)
            .build(&[
                NavItemDef::link("Home", "/"),
                NavItemDef::menu(
                    "Algorithm",
                    vec![
                        NavItemDef::link("Array", "{algorithm.array}/binary-search/"),
                        NavItemDef::link("Binary tree", "{algorithm.binaryTree}/bfs/"),
                    ],
                )
                .with_active_match("{algorithm.root}"),
            ])
            .unwrap();

        assert_eq!(nav.len(), 2);
        let menu = &nav[1];
        assert!(menu.link().is_none());
        assert_eq!(menu.active_match(), Some("/algorithm"));
        assert_eq!(menu.items().len(), 2);
        assert_eq!(
            menu.items()[1].link().unwrap().as_str(),
            "/algorithm/binary-tree/bfs/"
        );
    }

    #[test]
    fn test_active_match_independent_of_link() {
        let routes = routes();
        let nav = NavBuilder::new(&routes)
            .build(&[NavItemDef::link("Array", "{algorithm.array}/binary-search/")
                .with_active_match("{algorithm.root}")])
            .unwrap();

        assert_eq!(nav[0].link().unwrap().as_str(), "/algorithm/array/binary-search/");
        assert_eq!(nav[0].active_match(), Some("/algorithm"));
    }

    #[test]
    fn test_rejects_link_and_items_together() {
        let routes = routes();
        let mut def = NavItemDef::menu("Both", vec![NavItemDef::link("A", "/a")]);
        def.link = Some("/both".to_string());

        let err = NavBuilder::new(&routes).build(&[def]).unwrap_err();
        assert!(matches!(err, Error::InvalidNavItem { ref reason, .. } if reason.contains("both")));
    }

    #[test]
    fn test_rejects_empty_item() {
        let routes = routes();
        let err = NavBuilder::new(&routes)
            .build(&[NavItemDef::menu("Nothing", vec![])])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidNavItem { .. }));
    }

    #[test]
    fn test_rejects_second_level_dropdown() {
        let routes = routes();
        let def = NavItemDef::menu(
            "Outer",
            vec![NavItemDef::menu("Inner", vec![NavItemDef::link("A", "/a")])],
        );

        let err = NavBuilder::new(&routes).build(&[def]).unwrap_err();
        assert!(
            matches!(err, Error::InvalidNavItem { ref text, ref reason } if text == "Inner" && reason.contains("one level"))
        );
    }

    #[test]
    fn test_rejects_duplicate_links() {
        let routes = routes();
        let err = NavBuilder::new(&routes)
            .build(&[
                NavItemDef::link("A", "{A}"),
                NavItemDef::menu("More", vec![NavItemDef::link("A again", "/a")]),
            ])
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateRoute { ref path, .. } if path == "/a"));
    }

    #[test]
    fn test_reports_all_errors() {
        let routes = routes();
        let err = NavBuilder::new(&routes)
            .build(&[
                NavItemDef::link("Ghost", "{ghost}"),
                NavItemDef::link("Relative", "relative/path"),
                NavItemDef::link("", "/c"),
                NavItemDef::link("Bad match", "/d").with_active_match("nope"),
            ])
            .unwrap_err();
        assert_eq!(err.count(), 4);
    }

    #[test]
    fn test_nav_links_in_order() {
        let routes = routes();
        let nav = NavBuilder::new(&routes)
            .build(&[
                NavItemDef::link("Home", "/"),
                NavItemDef::menu("Sections", vec![NavItemDef::link("A", "{A}"), NavItemDef::link("B", "{B}")]),
            ])
            .unwrap();

        let links: Vec<_> = nav_links(&nav).into_iter().map(|(_, l)| l.as_str()).collect();
        assert_eq!(links, vec!["/", "/a", "/b"]);
    }
}
