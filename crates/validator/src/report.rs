use crate::content::{ContentIndex, Resolution};
use crate::links::{absolutize, internal_links};
use docnav_core::{Error, Result, RoutePath, SiteConfig, SiteDefinition};
use docnav_generator::{build_site, flatten_links, nav_links};
use std::fs;
use std::path::Path;

/// Everything found while validating a site, collected in one pass
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<Error>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
    /// The assembled config, when building it succeeded
    pub config: Option<SiteConfig>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The assembled config, or every collected error as one batch.
    pub fn into_result(self) -> Result<SiteConfig> {
        Error::collect(self.errors)?;
        self.config
            .ok_or_else(|| Error::Render("site config was not assembled".to_string()))
    }

    fn error(&mut self, err: Error) {
        err.flatten_into(&mut self.errors);
    }

    fn warn(&mut self, message: String) {
        log::debug!("warning: {}", message);
        self.warnings.push(message);
    }
}

/// Validate a parsed site definition against the content under `root`.
///
/// Runs the builders and the assembler, then checks every nav and sidebar link
/// against the content tree, then (if enabled) the links inside each page.
/// Nothing stops at the first problem.
pub fn validate_site(site: &SiteDefinition, root: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();
    report
        .info
        .push(format!("{} routes registered", site.routes.len()));

    for (without, with) in site.routes.trailing_slash_conflicts() {
        report.warn(format!(
            "Routes '{}' and '{}' differ only by a trailing slash",
            without, with
        ));
    }

    match build_site(site) {
        Ok(config) => {
            report.info.push(format!(
                "{} nav items, {} sidebars",
                config.nav.len(),
                config.sidebar.len()
            ));
            report.config = Some(config);
        }
        Err(err) => report.error(err),
    }

    let content_dir = root.join(&site.content_dir);
    let index = match ContentIndex::scan(&content_dir) {
        Ok(index) => index,
        Err(err) => {
            report.error(err);
            return report;
        }
    };
    report.info.push(format!("{} content pages", index.len()));

    if let Some(config) = &report.config {
        let links = validate_links(config, &index);
        report.errors.extend(links.errors);
        report.warnings.extend(links.warnings);
    }

    if site.validation.content_links {
        check_page_links(&index, site.validation.strict, &mut report);
    }

    report
}

/// Check every nav and sidebar link of an assembled config against the
/// content tree. Unresolved links are errors; links that only resolve through
/// a directory without their trailing slash are warnings.
pub fn validate_links(config: &SiteConfig, index: &ContentIndex) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (text, link) in nav_links(&config.nav) {
        check_link(link, format!("nav item '{}'", text), index, &mut report);
    }

    for (prefix, groups) in config.sidebar.iter() {
        for (text, link) in flatten_links(groups) {
            check_link(link, format!("sidebar '{}' entry '{}'", prefix, text), index, &mut report);
        }
    }

    report
}

fn check_link(link: &RoutePath, source_label: String, index: &ContentIndex, report: &mut ValidationReport) {
    match index.resolve(link.as_str()) {
        Resolution::Page(_) => {}
        Resolution::DirectoryWithoutSlash(file) => report.warn(format!(
            "Link '{}' in {} only resolves to '{}' through its directory; write it as '{}/'",
            link,
            source_label,
            file.display(),
            link
        )),
        Resolution::Missing => report.error(Error::BrokenLink {
            link: link.to_string(),
            source_label,
        }),
    }
}

fn check_page_links(index: &ContentIndex, strict: bool, report: &mut ValidationReport) {
    let mut checked = 0usize;

    for (route, file) in index.pages() {
        let path = index.root().join(file);
        let markdown = match fs::read_to_string(&path) {
            Ok(markdown) => markdown,
            Err(err) => {
                report.error(Error::Io(err));
                continue;
            }
        };

        for link in internal_links(&markdown) {
            checked += 1;
            let source_label = format!("page '{}'", file.display());

            let resolution = match absolutize(route, &link) {
                Some(absolute) => index.resolve(&absolute),
                None => Resolution::Missing,
            };

            match resolution {
                Resolution::Page(_) => {}
                Resolution::DirectoryWithoutSlash(_) => report.warn(format!(
                    "Link '{}' in {} is missing its trailing slash",
                    link, source_label
                )),
                Resolution::Missing if strict => report.error(Error::BrokenLink { link, source_label }),
                Resolution::Missing => report.warn(format!(
                    "Broken link '{}' in {}: no matching content file",
                    link, source_label
                )),
            }
        }
    }

    report
        .info
        .push(format!("{} links checked inside content pages", checked));
}
