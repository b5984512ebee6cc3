use crate::nav::NavBuilder;
use crate::sidebar::SidebarBuilder;
use docnav_core::{
    Error, NavItem, Result, RoutePath, RouteRegistry, SidebarMap, SiteConfig, SiteDefinition,
    SiteMetadata,
};
use std::collections::HashMap;

/// Merge the nav bar and sidebars into the final site config.
///
/// Every sidebar prefix must be a registered route path, and no prefix may
/// appear twice. Both checks run over the whole map before failing.
pub fn assemble(
    routes: &RouteRegistry,
    metadata: SiteMetadata,
    nav: Vec<NavItem>,
    sidebar: SidebarMap,
) -> Result<SiteConfig> {
    let errors = check_sidebar_prefixes(routes, sidebar.iter().map(|(prefix, _)| prefix));
    Error::collect(errors)?;

    log::debug!(
        "assembled site config: {} nav items, {} sidebars",
        nav.len(),
        sidebar.len()
    );
    Ok(SiteConfig {
        metadata,
        nav,
        sidebar,
    })
}

fn check_sidebar_prefixes<'p>(
    routes: &RouteRegistry,
    prefixes: impl Iterator<Item = &'p RoutePath>,
) -> Vec<Error> {
    let mut errors = Vec::new();
    let mut seen: HashMap<&RoutePath, usize> = HashMap::new();

    for (index, prefix) in prefixes.enumerate() {
        if let Some(first) = seen.get(prefix) {
            errors.push(Error::DuplicateRoute {
                path: prefix.to_string(),
                first: format!("sidebar #{}", first + 1),
                second: format!("sidebar #{}", index + 1),
            });
            continue;
        }
        seen.insert(prefix, index);

        if !routes.contains_path(prefix) {
            errors.push(Error::DanglingRouteReference {
                prefix: prefix.to_string(),
                hint: routes.slash_variant(prefix).map(|p| p.to_string()),
            });
        }
    }

    errors
}

/// Run the nav builder, every sidebar build and the assembler for a parsed
/// site definition.
///
/// Nothing stops at the first problem: errors from all stages come back
/// together as one [`Error::Batch`].
pub fn build_site(site: &SiteDefinition) -> Result<SiteConfig> {
    let routes = &site.routes;
    let mut errors = Vec::new();

    let nav = NavBuilder::new(routes).build(&site.nav).unwrap_or_else(|err| {
        errors.push(err);
        Vec::new()
    });

    let sidebar_builder = SidebarBuilder::new(routes);
    let mut sidebar = SidebarMap::new();
    for def in &site.sidebar {
        let prefix = match routes.expand_path(&def.prefix) {
            Ok(prefix) => prefix,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };

        let groups = sidebar_builder
            .build(prefix.as_str(), &def.groups)
            .unwrap_or_else(|err| {
                errors.push(err);
                Vec::new()
            });
        sidebar.push(prefix, groups);
    }

    match assemble(routes, site.metadata.clone(), nav, sidebar) {
        Ok(config) => Error::collect(errors).map(|()| config),
        Err(err) => {
            errors.push(err);
            Err(Error::from_many(errors))
        }
    }
}
