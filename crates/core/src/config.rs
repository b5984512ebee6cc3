use crate::error::{Error, Result};
use crate::registry::RouteRegistry;
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw TOML configuration structure
/// This matches the docnav.toml file structure exactly
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    site: RawSite,
    #[serde(default)]
    validation: ValidationSettings,
    #[serde(default)]
    routes: toml::Table,
    #[serde(default)]
    nav: Vec<NavItemDef>,
    #[serde(default)]
    sidebar: Vec<RawSidebar>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    title: String,
    description: Option<String>,
    logo: Option<String>,
    #[serde(default = "default_content_dir")]
    content_dir: String, // Convert to PathBuf
    #[serde(default = "default_output_dir")]
    output_dir: String, // Convert to PathBuf
    #[serde(default)]
    social_links: Vec<SocialLink>,
    footer: Option<Footer>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSidebar {
    prefix: String,
    #[serde(default)]
    groups: Vec<SidebarEntryDef>,
}

fn default_content_dir() -> String {
    "docs".to_string()
}

fn default_output_dir() -> String {
    "docs/.vitepress".to_string()
}

/// Parse docnav.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteDefinition> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse docnav.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteDefinition> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.site.title.trim().is_empty() {
        return Err(Error::ConfigParse("site.title must not be empty".to_string()));
    }

    let content_dir = validate_path(&raw.site.content_dir, "site.content_dir")?;
    let output_dir = validate_path(&raw.site.output_dir, "site.output_dir")?;

    let mut entries = Vec::new();
    flatten_routes("", &raw.routes, &mut entries)?;
    let routes = RouteRegistry::from_entries(entries)?;

    let metadata = SiteMetadata {
        title: raw.site.title,
        description: raw.site.description,
        logo: raw.site.logo,
        social_links: raw.site.social_links,
        footer: raw.site.footer,
    };

    let sidebar = raw
        .sidebar
        .into_iter()
        .map(|s| SidebarDef {
            prefix: s.prefix,
            groups: s.groups,
        })
        .collect();

    Ok(SiteDefinition {
        metadata,
        content_dir,
        output_dir,
        routes,
        nav: raw.nav,
        sidebar,
        validation: raw.validation,
    })
}

/// Flatten nested `[routes]` tables into dotted keys.
///
/// `[routes.algorithm] binaryTree = "/algorithm/binary-tree"` becomes the
/// entry `("algorithm.binaryTree", "/algorithm/binary-tree")`.
fn flatten_routes(prefix: &str, table: &toml::Table, out: &mut Vec<(String, String)>) -> Result<()> {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };

        match value {
            toml::Value::String(path) => out.push((key, path.clone())),
            toml::Value::Table(nested) => flatten_routes(&key, nested, out)?,
            other => {
                return Err(Error::ConfigParse(format!(
                    "Route 'routes.{}' must be a string or table, found {}",
                    key,
                    other.type_str()
                )));
            }
        }
    }
    Ok(())
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so the
/// content and output directories always stay inside the site root.
///
/// # Examples
///
/// ```text
/// validate_path("docs", "site.content_dir")  → Ok(PathBuf)
/// validate_path("/etc", "site.content_dir")  → Err("Absolute paths not allowed...")
/// validate_path("../other", "site.output_dir")  → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    Ok(path.to_path_buf())
}
