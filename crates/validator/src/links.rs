use pulldown_cmark::{Event, Parser, Tag};

/// Extensions that point at static assets rather than pages
const ASSET_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "pdf", "zip", "mp4", "json", "txt",
];

/// Internal links found in a Markdown document, as written.
///
/// External links (anything with a scheme such as `https:` or `mailto:`),
/// protocol-relative links, same-page anchors and asset links are left out.
pub fn internal_links(markdown: &str) -> Vec<String> {
    let mut links = Vec::new();

    for event in Parser::new(markdown) {
        if let Event::Start(Tag::Link { dest_url, .. }) = event {
            let dest = dest_url.trim();
            if is_internal_page_link(dest) {
                links.push(dest.to_string());
            }
        }
    }

    links
}

fn is_internal_page_link(dest: &str) -> bool {
    if dest.is_empty() || dest.starts_with('#') || dest.starts_with("//") {
        return false;
    }

    let path_end = dest.find(['#', '?']).unwrap_or(dest.len());
    let path = &dest[..path_end];

    // A ':' before the first '/' means a scheme
    let first_slash = path.find('/').unwrap_or(path.len());
    if path[..first_slash].contains(':') {
        return false;
    }

    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((_, ext)) => !ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => true,
    }
}

/// Turn a link found on the page serving `page_route` into an absolute route.
///
/// Absolute links come back unchanged. Relative links are resolved against the
/// page's directory with `.` and `..` segments applied; `None` when the link
/// climbs above the site root.
pub fn absolutize(page_route: &str, link: &str) -> Option<String> {
    if link.starts_with('/') {
        return Some(link.to_string());
    }

    let split = link.find(['#', '?']).unwrap_or(link.len());
    let (path, suffix) = link.split_at(split);

    let base_dir = match page_route.rfind('/') {
        Some(idx) => &page_route[..=idx],
        None => "/",
    };

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    let mut route = String::from("/");
    route.push_str(&segments.join("/"));
    if (path.ends_with('/') || path.ends_with("/.") || path == "." || path.is_empty())
        && !route.ends_with('/')
    {
        route.push('/');
    }
    route.push_str(suffix);
    Some(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_links_filters_external_and_assets() {
        let markdown = r#"
# Sentry SDK

See [core process](/fe-monitor-system/theoretical-chapter/sentry-sdk-architecture/core-process/)
and [basics](./basic.md), plus [the repo](https://github.com/getsentry/sentry-javascript).

Mail [me](mailto:someone@example.com), jump to [setup](#setup),
open the [diagram](/images/architecture.png) or [protocol relative](//cdn.example.com/x).
"#;

        let links = internal_links(markdown);
        assert_eq!(
            links,
            vec![
                "/fe-monitor-system/theoretical-chapter/sentry-sdk-architecture/core-process/",
                "./basic.md",
            ]
        );
    }

    #[test]
    fn test_internal_links_ignores_code() {
        let markdown = "Use `[not a link](/nowhere)` here.\n\n```md\n[nor this](/nope)\n```\n";
        assert!(internal_links(markdown).is_empty());
    }

    #[test]
    fn test_absolutize_relative_links() {
        assert_eq!(
            absolutize("/typescript/type-challenges/easy", "./medium").unwrap(),
            "/typescript/type-challenges/medium"
        );
        assert_eq!(
            absolutize("/typescript/type-challenges/easy", "../usage/").unwrap(),
            "/typescript/usage/"
        );
        assert_eq!(
            absolutize("/backend/nest/", "basic.md#install").unwrap(),
            "/backend/nest/basic.md#install"
        );
        assert_eq!(absolutize("/", "git/").unwrap(), "/git/");
        assert_eq!(absolutize("/a/b", "/abs/path").unwrap(), "/abs/path");
    }

    #[test]
    fn test_absolutize_rejects_escaping_root() {
        assert!(absolutize("/a/page", "../../outside").is_none());
    }
}
