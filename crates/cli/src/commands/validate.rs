use super::{CONFIG_FILE, load_site, print_report};
use docnav_validator::validate_site;
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let site = load_site(&path)?;
    println!("✓ {} parsed", CONFIG_FILE);
    println!("  Site: {}", site.metadata.title);

    let report = validate_site(&site, &path);
    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!(
            "Validation failed with {} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
    }

    println!();
    println!("✅ Site valid ({} warning(s))", report.warnings.len());
    Ok(())
}
