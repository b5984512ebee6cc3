use docnav_core::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// How a link maps onto the content tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Link matches a document exactly
    Page(PathBuf),
    /// `/a/b` with only `a/b/index.md` present; works, but only by accident
    /// of the trailing slash
    DirectoryWithoutSlash(PathBuf),
    Missing,
}

/// Markdown documents under the content root, keyed by the route they serve.
///
/// `a/b.md` serves `/a/b`, `a/index.md` serves `/a/`, `index.md` serves `/`.
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    root: PathBuf,
    pages: BTreeMap<String, PathBuf>,
}

impl ContentIndex {
    /// Walk `root` and index every `.md` file.
    ///
    /// Hidden directories (`.vitepress`, `.git`) and `node_modules` are
    /// skipped. A missing root is an error.
    pub fn scan(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Content directory does not exist: {}", root.display()),
            )));
        }

        let mut pages = BTreeMap::new();
        for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_skipped(e)) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let is_markdown = entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
            if !is_markdown {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());
            if let Some(route) = route_for_file(&relative) {
                pages.insert(route, relative);
            }
        }

        log::debug!("indexed {} pages under {}", pages.len(), root.display());
        Ok(ContentIndex {
            root: root.to_path_buf(),
            pages,
        })
    }

    /// Resolve a site link the way the site generator does.
    ///
    /// Fragment and query are ignored, a `.html` or `.md` suffix is dropped
    /// and a trailing `index` segment serves its directory.
    pub fn resolve(&self, link: &str) -> Resolution {
        let path = strip_link_suffixes(link);
        if path.is_empty() {
            return Resolution::Missing;
        }

        if let Some(file) = self.pages.get(path) {
            return Resolution::Page(file.clone());
        }

        if let Some(dir) = path.strip_suffix("index")
            && dir.ends_with('/')
            && let Some(file) = self.pages.get(dir)
        {
            return Resolution::Page(file.clone());
        }

        if !path.ends_with('/')
            && let Some(file) = self.pages.get(&format!("{}/", path))
        {
            return Resolution::DirectoryWithoutSlash(file.clone());
        }

        Resolution::Missing
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `(route, relative file path)` pairs, ordered by route.
    pub fn pages(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.pages.iter().map(|(route, file)| (route.as_str(), file.as_path()))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}

/// Route served by a content file given relative to the content root.
fn route_for_file(relative: &Path) -> Option<String> {
    let stem = relative.file_stem()?.to_str()?;
    let mut segments = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            segments.push(component.as_os_str().to_str()?.to_string());
        }
    }

    let mut route = String::from("/");
    for segment in &segments {
        route.push_str(segment);
        route.push('/');
    }
    if stem != "index" {
        route.push_str(stem);
    }
    Some(route)
}

fn strip_link_suffixes(link: &str) -> &str {
    let end = link.find(['#', '?']).unwrap_or(link.len());
    let path = &link[..end];
    path.strip_suffix(".html")
        .or_else(|| path.strip_suffix(".md"))
        .unwrap_or(path)
}
