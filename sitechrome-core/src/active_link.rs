//! Current-page link detection.
//!
//! Links match by directory so `/docs/` and `/docs/index.html` mark the same
//! entry.

/// Directory part of a URL path.
///
/// A path ending in `/` is returned unchanged; otherwise everything after the
/// last `/` is dropped.
#[must_use]
pub fn page_directory(path: &str) -> &str {
    if path.ends_with('/') {
        return path;
    }
    path.rfind('/').map_or("", |idx| &path[..=idx])
}

#[must_use]
pub fn is_current(current_path: &str, link_path: &str) -> bool {
    page_directory(current_path) == page_directory(link_path)
}

/// Indices of the links that point at the current page's directory.
pub fn current_links<'a>(
    current_path: &str,
    link_paths: impl IntoIterator<Item = &'a str>,
) -> Vec<usize> {
    let current = page_directory(current_path);
    link_paths
        .into_iter()
        .enumerate()
        .filter(|(_, path)| page_directory(path) == current)
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_keeps_trailing_slash_paths() {
        assert_eq!(page_directory("/"), "/");
        assert_eq!(page_directory("/docs/"), "/docs/");
    }

    #[test]
    fn directory_drops_file_segment() {
        assert_eq!(page_directory("/docs/index.html"), "/docs/");
        assert_eq!(page_directory("/about"), "/");
        assert_eq!(page_directory("page.html"), "");
    }

    #[test]
    fn index_and_directory_match() {
        assert!(is_current("/guide/", "/guide/index.html"));
        assert!(!is_current("/guide/", "/guide/advanced/"));
    }

    #[test]
    fn collects_every_matching_link() {
        let links = ["/", "/blog/", "/blog/post.html", "/about/"];
        assert_eq!(current_links("/blog/index.html", links), vec![1, 2]);
        assert!(current_links("/missing/", links).is_empty());
    }
}
