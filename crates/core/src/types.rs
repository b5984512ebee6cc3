use crate::registry::RouteRegistry;
use crate::route::RoutePath;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// Navigation bar entry, either a direct link or a dropdown menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavItem {
    Link {
        text: String,
        link: RoutePath,
        #[serde(rename = "activeMatch", skip_serializing_if = "Option::is_none")]
        active_match: Option<String>,
    },
    Menu {
        text: String,
        items: Vec<NavItem>,
        #[serde(rename = "activeMatch", skip_serializing_if = "Option::is_none")]
        active_match: Option<String>,
    },
}

impl NavItem {
    pub fn text(&self) -> &str {
        match self {
            NavItem::Link { text, .. } | NavItem::Menu { text, .. } => text,
        }
    }

    pub fn link(&self) -> Option<&RoutePath> {
        match self {
            NavItem::Link { link, .. } => Some(link),
            NavItem::Menu { .. } => None,
        }
    }

    pub fn active_match(&self) -> Option<&str> {
        match self {
            NavItem::Link { active_match, .. } | NavItem::Menu { active_match, .. } => {
                active_match.as_deref()
            }
        }
    }

    pub fn items(&self) -> &[NavItem] {
        match self {
            NavItem::Link { .. } => &[],
            NavItem::Menu { items, .. } => items,
        }
    }
}

/// Named, ordered, recursively nestable sidebar node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<RoutePath>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SidebarEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

/// Entries nest with the same shape as groups.
pub type SidebarEntry = SidebarGroup;

/// Sidebars keyed by the route prefix they apply to.
///
/// Insertion order is kept and is the order the host framework sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarMap {
    entries: Vec<(RoutePath, Vec<SidebarGroup>)>,
}

impl SidebarMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, prefix: RoutePath, groups: Vec<SidebarGroup>) {
        self.entries.push((prefix, groups));
    }

    pub fn get(&self, prefix: &RoutePath) -> Option<&[SidebarGroup]> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, groups)| groups.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoutePath, &[SidebarGroup])> {
        self.entries.iter().map(|(p, g)| (p, g.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(RoutePath, Vec<SidebarGroup>)> for SidebarMap {
    fn from_iter<T: IntoIterator<Item = (RoutePath, Vec<SidebarGroup>)>>(iter: T) -> Self {
        SidebarMap {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for SidebarMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (prefix, groups) in &self.entries {
            map.serialize_entry(prefix.as_str(), groups)?;
        }
        map.end()
    }
}

/// Social link shown in the site header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub icon: String,
    pub link: String,
}

/// Page footer text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Site-wide metadata carried into the theme config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(rename = "socialLinks", skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<SocialLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

/// Fully assembled configuration handed to the site generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    #[serde(flatten)]
    pub metadata: SiteMetadata,
    pub nav: Vec<NavItem>,
    pub sidebar: SidebarMap,
}

/// Navigation bar item as written in docnav.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItemDef {
    pub text: String,
    /// Link template, may reference routes as `{key}`
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub active_match: Option<String>,
    #[serde(default)]
    pub items: Vec<NavItemDef>,
}

impl NavItemDef {
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        NavItemDef {
            text: text.into(),
            link: Some(link.into()),
            ..Default::default()
        }
    }

    pub fn menu(text: impl Into<String>, items: Vec<NavItemDef>) -> Self {
        NavItemDef {
            text: text.into(),
            items,
            ..Default::default()
        }
    }

    pub fn with_active_match(mut self, active_match: impl Into<String>) -> Self {
        self.active_match = Some(active_match.into());
        self
    }
}

/// Sidebar node as written in docnav.toml.
///
/// `path` is relative to the sidebar prefix, including for nested entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarEntryDef {
    pub text: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub items: Vec<SidebarEntryDef>,
    #[serde(default)]
    pub collapsible: Option<bool>,
    #[serde(default)]
    pub collapsed: Option<bool>,
}

impl SidebarEntryDef {
    pub fn new(text: impl Into<String>, path: impl Into<String>) -> Self {
        SidebarEntryDef {
            text: text.into(),
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// A label-only node that just groups its children.
    pub fn section(text: impl Into<String>, items: Vec<SidebarEntryDef>) -> Self {
        SidebarEntryDef {
            text: text.into(),
            items,
            ..Default::default()
        }
    }

    pub fn with_items(mut self, items: Vec<SidebarEntryDef>) -> Self {
        self.items = items;
        self
    }
}

/// One `[[sidebar]]` table: a prefix and the groups shown under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarDef {
    /// Prefix template, usually a single `{key}`
    pub prefix: String,
    pub groups: Vec<SidebarEntryDef>,
}

/// Validation switches from `[validation]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationSettings {
    /// Check links inside Markdown bodies as well as nav and sidebar
    #[serde(default = "default_true")]
    pub content_links: bool,
    /// Treat broken body links as errors instead of warnings
    #[serde(default)]
    pub strict: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        ValidationSettings {
            content_links: true,
            strict: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Parsed docnav.toml
#[derive(Debug, Clone)]
pub struct SiteDefinition {
    pub metadata: SiteMetadata,
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub routes: RouteRegistry,
    pub nav: Vec<NavItemDef>,
    pub sidebar: Vec<SidebarDef>,
    pub validation: ValidationSettings,
}
