use super::CONFIG_FILE;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Escape a string for safe inclusion in TOML per TOML v1.0.0 spec
///
/// Handles the required escape sequences for TOML basic strings:
/// - Backslash (\\) -> \\\\
/// - Quote (\") -> \\\"
/// - Newline (\n) -> \\n
/// - Carriage return (\r) -> \\r
/// - Tab (\t) -> \\t
///
/// The config is written from a commented template, so the toml crate's
/// serializer (which drops comments) is not used here.
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Derive a readable site title from the directory name.
///
/// `my-frontend_notes` becomes `My Frontend Notes`.
fn title_from_dir(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .trim();

    let words: Vec<String> = name
        .split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "My Docs".to_string()
    } else {
        words.join(" ")
    }
}

/// Initialize a new site directory.
///
/// Creates:
/// - `docnav.toml` with a route registry, nav bar and one sidebar
/// - `docs/index.md` and `docs/guide/` starter pages the config links to
///
/// An existing docnav.toml is only replaced with `force`; existing pages are
/// never overwritten.
pub async fn run(path: PathBuf, force: bool) -> Result<()> {
    println!("📚 Initializing site at: {}", path.display());

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists in {}\nUse --force to overwrite it",
            CONFIG_FILE,
            path.display()
        );
    }

    fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let title = title_from_dir(&path);
    fs::write(&config_path, generate_site_toml(&title)).context("Failed to write docnav.toml")?;
    println!("   ✓ Wrote {}", CONFIG_FILE);

    let created = write_starter_pages(&path.join("docs"), &title)?;
    println!("   ✓ Created {} starter pages", created);

    println!();
    println!("✅ Site initialized!");
    println!();
    println!("Next steps:");
    println!("   1. Edit {} to add routes, nav items and sidebars", config_path.display());
    println!("   2. docnav validate {}", path.display());
    println!("   3. docnav build {}", path.display());
    println!();

    Ok(())
}

fn generate_site_toml(title: &str) -> String {
    format!(
        r##"# docnav site configuration

[site]
title = "{title}"
# description = ""
# logo = "/logo.svg"
content_dir = "docs"
output_dir = "docs/.vitepress"

# [[site.social_links]]
# icon = "github"
# link = "https://github.com/you/your-site"

# [site.footer]
# message = "Released under the MIT License."
# copyright = "Copyright © present"

[validation]
# Check links inside Markdown pages too
content_links = true
# Fail the build on broken links inside pages
strict = false

# Symbolic routes. Nested tables become dotted keys: guide.root
# Reference them anywhere as {{guide.root}}
[routes.guide]
root = "/guide"

[[nav]]
text = "Home"
link = "/"

[[nav]]
text = "Guide"
active_match = "{{guide.root}}"
link = "{{guide.root}}/getting-started"

[[sidebar]]
prefix = "{{guide.root}}"

[[sidebar.groups]]
text = "Guide"
items = [
    {{ text = "Getting started", path = "/getting-started" }},
    {{ text = "Writing pages", path = "/writing-pages" }},
]
"##,
        title = toml_escape_string(title)
    )
}

fn write_starter_pages(docs: &Path, title: &str) -> Result<usize> {
    let pages = [
        (
            "index.md".to_string(),
            format!("# {}\n\nStart with the [guide](/guide/getting-started).\n", title),
        ),
        (
            "guide/getting-started.md".to_string(),
            "# Getting started\n\nNext: [writing pages](./writing-pages).\n".to_string(),
        ),
        (
            "guide/writing-pages.md".to_string(),
            "# Writing pages\n\nAdd a page, then list it in a sidebar in docnav.toml.\n".to_string(),
        ),
    ];

    let mut created = 0;
    for (file, body) in pages {
        let page = docs.join(&file);
        if page.exists() {
            continue;
        }
        if let Some(parent) = page.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&page, body).with_context(|| format!("Failed to write {}", page.display()))?;
        created += 1;
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_core::config::parse_site_toml_str;
    use docnav_validator::validate_site;
    use tempfile::TempDir;

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string(r#"Say "hi""#), r#"Say \"hi\""#);
        assert_eq!(toml_escape_string("a\\b"), "a\\\\b");
        assert_eq!(toml_escape_string("line\nbreak"), "line\\nbreak");
    }

    #[test]
    fn test_title_from_dir() {
        assert_eq!(title_from_dir(Path::new("/tmp/my-frontend_notes")), "My Frontend Notes");
        assert_eq!(title_from_dir(Path::new("blog")), "Blog");
        assert_eq!(title_from_dir(Path::new("/")), "My Docs");
    }

    #[test]
    fn test_generated_toml_parses() {
        let site = parse_site_toml_str(&generate_site_toml("Quote \"Docs\"")).unwrap();
        assert_eq!(site.metadata.title, "Quote \"Docs\"");
        assert_eq!(site.routes.resolve("guide.root").unwrap().as_str(), "/guide");
        assert_eq!(site.nav.len(), 2);
        assert_eq!(site.sidebar.len(), 1);
    }

    #[tokio::test]
    async fn test_init_creates_valid_site() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("frontend-notes");

        run(root.clone(), false).await.unwrap();

        let content = fs::read_to_string(root.join(CONFIG_FILE)).unwrap();
        let site = parse_site_toml_str(&content).unwrap();
        assert_eq!(site.metadata.title, "Frontend Notes");

        let report = validate_site(&site, &root);
        assert!(report.is_ok(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "# mine\n").unwrap();

        let err = run(dir.path().to_path_buf(), false).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap(), "# mine\n");

        run(dir.path().to_path_buf(), true).await.unwrap();
        assert!(fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap().contains("[site]"));
    }

    #[test]
    fn test_starter_pages_are_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("index.md"), "# Custom\n").unwrap();

        let created = write_starter_pages(&docs, "Docs").unwrap();
        assert_eq!(created, 2);
        assert_eq!(fs::read_to_string(docs.join("index.md")).unwrap(), "# Custom\n");
    }
}
