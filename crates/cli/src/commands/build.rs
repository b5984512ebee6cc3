use super::{CONFIG_FILE, load_site, print_report};
use anyhow::{Context, Result};
use docnav_generator::{OutputFormat, write_output};
use docnav_validator::validate_site;
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::env;
use std::path::{Component, Path, PathBuf};

/// Validate the site and write the theme config
pub async fn run(path: PathBuf, output: Option<PathBuf>, format: OutputFormat, watch: bool) -> Result<()> {
    println!("🔨 Building navigation...");
    println!("   Source: {}", path.display());

    let written = build_once(&path, output.as_deref(), format)?;
    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", written.display());

    if watch {
        let output_dir = resolve_output_dir(&path, output.as_deref())?;
        println!();
        println!("👀 Watching {} for changes (Ctrl+C to stop)", path.display());
        watch_and_rebuild(path, output, output_dir, format).await?;
    }

    Ok(())
}

fn build_once(path: &Path, output: Option<&Path>, format: OutputFormat) -> Result<PathBuf> {
    let site = load_site(path)?;
    println!("✓ Loaded: {}", site.metadata.title);

    let report = validate_site(&site, path);
    print_report(&report);

    let output_dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => path.join(&site.output_dir),
    };

    let config = report
        .into_result()
        .with_context(|| format!("{} has errors, nothing written", CONFIG_FILE))?;

    write_output(&config, &output_dir, format).context("Failed to write theme config")
}

fn resolve_output_dir(path: &Path, output: Option<&Path>) -> Result<PathBuf> {
    match output {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(path.join(load_site(path)?.output_dir)),
    }
}

/// Watch the site directory and rebuild on every relevant change.
///
/// Build failures are printed and the watch continues.
async fn watch_and_rebuild(
    path: PathBuf,
    output: Option<PathBuf>,
    output_dir: PathBuf,
    format: OutputFormat,
) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                if !event
                    .paths
                    .iter()
                    .any(|p| is_relevant_change(&path, &output_dir, p))
                {
                    continue;
                }

                println!();
                println!("   📝 Change detected, rebuilding...");
                match build_once(&path, output.as_deref(), format) {
                    Ok(written) => println!("   ✓ Wrote {}", written.display()),
                    Err(e) => eprintln!("   ✗ {:#}", e),
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Changes to generated output, hidden files and editor backups are ignored.
///
/// Paths are compared in normalized form, so `./out/x` is inside `out`.
fn is_relevant_change(root: &Path, output_dir: &Path, changed: &Path) -> bool {
    let root = normalize(root);
    let changed = normalize(changed);
    if changed.starts_with(normalize(output_dir)) {
        return false;
    }

    let filename = changed.file_name().unwrap_or_default().to_string_lossy();
    if filename.starts_with('.') || filename.ends_with('~') {
        return false;
    }

    let relative = changed.strip_prefix(&root).unwrap_or(&changed);
    !relative.components().any(|c| {
        let part = c.as_os_str().to_string_lossy();
        part.starts_with('.') || part == "node_modules"
    })
}

/// Absolute form of `path` with `.` dropped and the deepest existing ancestor
/// canonicalized. Works for paths that were just removed.
fn normalize(path: &Path) -> PathBuf {
    let absolute = if path.is_relative() {
        env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    };
    let lexical: PathBuf = absolute
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    for ancestor in lexical.ancestors() {
        if let Ok(real) = ancestor.canonicalize() {
            return match lexical.strip_prefix(ancestor) {
                Ok(rest) if !rest.as_os_str().is_empty() => real.join(rest),
                _ => real,
            };
        }
    }
    lexical
}
