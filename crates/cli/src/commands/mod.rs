pub mod build;
pub mod init;
pub mod routes;
pub mod validate;

use anyhow::{Context, Result};
use docnav_core::{SiteDefinition, parse_site_toml};
use docnav_validator::ValidationReport;
use std::path::Path;

pub const CONFIG_FILE: &str = "docnav.toml";

/// Load docnav.toml from a site directory
pub fn load_site(path: &Path) -> Result<SiteDefinition> {
    if !path.exists() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun 'docnav init {}' first",
            path.display(),
            path.display()
        );
    }

    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'docnav init {}' first",
            CONFIG_FILE,
            path.display(),
            path.display()
        );
    }

    let site = parse_site_toml(&config_path)
        .with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;
    log::debug!(
        "loaded {} ({} routes, {} nav items, {} sidebars)",
        config_path.display(),
        site.routes.len(),
        site.nav.len(),
        site.sidebar.len()
    );
    Ok(site)
}

/// Print a validation report the way every command shows it
pub fn print_report(report: &ValidationReport) {
    for line in &report.info {
        println!("  {}", line);
    }

    if !report.warnings.is_empty() {
        println!();
        for warning in &report.warnings {
            println!("  ⚠ {}", warning);
        }
    }

    if !report.errors.is_empty() {
        println!();
        for error in &report.errors {
            println!("  ✗ {}", error);
        }
    }
}
