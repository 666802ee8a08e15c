//! Hyperlink extraction from free text
//!
//! Markdown links are collected first, then bare URLs; a URL already seen is
//! skipped, so a markdown link wins over a bare occurrence of the same target.

use regex::Regex;
use sensecheck_domain::Link;
use std::collections::HashSet;
use std::sync::LazyLock;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("markdown link pattern"));

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s\]},;"'<>()]+"#).expect("bare url pattern"));

static TRAILING_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,;:!?\]}>)\-_]+$").expect("trailing punctuation pattern"));

/// Characters of a bare URL kept in its synthesized anchor text
const ANCHOR_PREVIEW_CHARS: usize = 50;

/// Strip trailing punctuation that commonly follows a URL in prose
///
/// # Examples
///
/// ```
/// use sensecheck_links::clean_url;
///
/// assert_eq!(clean_url("https://x.com/r.pdf)."), "https://x.com/r.pdf");
/// assert_eq!(clean_url("https://x.com/a_b-"), "https://x.com/a_b");
/// ```
pub fn clean_url(url: &str) -> &str {
    match TRAILING_PUNCTUATION.find(url) {
        Some(m) => &url[..m.start()],
        None => url,
    }
}

/// Whether `url` parses as an absolute http(s) URL with a host
fn is_absolute_http(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

fn bare_anchor_text(url: &str) -> String {
    if url.chars().count() > ANCHOR_PREVIEW_CHARS {
        let preview: String = url.chars().take(ANCHOR_PREVIEW_CHARS).collect();
        format!("URL: {}...", preview)
    } else {
        format!("URL: {}", url)
    }
}

/// Extract links from free text with ids `link-1`, `link-2`, ...
///
/// # Examples
///
/// ```
/// use sensecheck_links::extract_links;
///
/// let links = extract_links("Revenue was $10M. See [report](https://x.com/r.pdf).");
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].url, "https://x.com/r.pdf");
/// assert_eq!(links[0].anchor_text, "report");
/// ```
pub fn extract_links(text: &str) -> Vec<Link> {
    extract_links_with_prefix(text, "")
}

/// Extract links with ids `<prefix>-link-<n>` (or `link-<n>` for an empty prefix)
pub fn extract_links_with_prefix(text: &str, prefix: &str) -> Vec<Link> {
    let mut seen = HashSet::new();
    let mut found: Vec<(String, String)> = Vec::new();

    for caps in MARKDOWN_LINK.captures_iter(text) {
        let url = clean_url(caps[2].trim());
        if is_absolute_http(url) && seen.insert(url.to_string()) {
            found.push((url.to_string(), caps[1].to_string()));
        }
    }

    for m in BARE_URL.find_iter(text) {
        let url = clean_url(m.as_str());
        if is_absolute_http(url) && seen.insert(url.to_string()) {
            found.push((url.to_string(), bare_anchor_text(url)));
        }
    }

    found
        .into_iter()
        .enumerate()
        .map(|(idx, (url, anchor))| {
            let id = if prefix.is_empty() {
                format!("link-{}", idx + 1)
            } else {
                format!("{}-link-{}", prefix, idx + 1)
            };
            Link::new(id, url, anchor)
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: cleaning is idempotent
        #[test]
        fn test_clean_url_idempotent(s in "https?://[a-z]{1,8}\\.com/[a-z0-9./_\\-?=&]{0,20}[.,;:!?\\]}>)_\\-]{0,4}") {
            let once = clean_url(&s);
            prop_assert_eq!(clean_url(once), once);
        }

        /// Property: a cleaned URL never ends in stripped punctuation
        #[test]
        fn test_clean_url_has_no_trailing_punctuation(s in "\\PC{0,30}") {
            let cleaned = clean_url(&s);
            let stripped = ['.', ',', ';', ':', '!', '?', ']', '}', '>', ')', '-', '_'];
            prop_assert!(cleaned.chars().last().map_or(true, |c| !stripped.contains(&c)));
        }
    }
}
