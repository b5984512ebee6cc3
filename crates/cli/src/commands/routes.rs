use super::load_site;
use std::path::PathBuf;

/// Print the route registry, sorted by key
pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    let site = load_site(&path)?;

    if site.routes.is_empty() {
        println!("No routes registered in {}", path.display());
        return Ok(());
    }

    let width = site.routes.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, route) in site.routes.iter() {
        println!("{:width$}  {}", key, route, width = width);
    }

    let conflicts = site.routes.trailing_slash_conflicts();
    if !conflicts.is_empty() {
        println!();
        for (without, with) in conflicts {
            println!("⚠ '{}' and '{}' differ only by a trailing slash", without, with);
        }
    }

    Ok(())
}
