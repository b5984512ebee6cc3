use docnav_core::{Error, Result, SiteConfig};
use std::fs;
use std::path::{Path, PathBuf};

const GENERATED_BANNER: &str = "// Generated by docnav from docnav.toml. Do not edit by hand.";

/// Output flavours for the assembled config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    TypeScript,
}

impl OutputFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            OutputFormat::Json => "theme-config.json",
            OutputFormat::TypeScript => "theme-config.ts",
        }
    }
}

/// Render the site config as text.
///
/// Output depends only on the config, so rendering the same config twice is
/// byte-identical.
pub fn render(config: &SiteConfig, format: OutputFormat) -> Result<String> {
    let json = serde_json::to_string_pretty(config).map_err(|e| Error::Render(e.to_string()))?;

    Ok(match format {
        OutputFormat::Json => format!("{}\n", json),
        OutputFormat::TypeScript => {
            format!("{}\n\nexport default {}\n", GENERATED_BANNER, json)
        }
    })
}

/// Write the rendered config into `dir`, returning the written file path.
pub fn write_output(config: &SiteConfig, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    let content = render(config, format)?;
    fs::create_dir_all(dir)?;

    let path = dir.join(format.file_name());
    fs::write(&path, content)?;
    log::debug!("wrote {}", path.display());
    Ok(path)
}
