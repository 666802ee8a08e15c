//! Harvesting source URLs from grounded prose
//!
//! Grounded answers cite sources three ways: bare URLs, markdown links and
//! bracket citations (`[n]: url`). Each form has its own [`UrlExtractor`];
//! [`extract_urls`] runs all of them and merges the results.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"'`\[\]{}|\\^]+"#).expect("bare url pattern")
});

// One level of balanced parentheses inside the target, as in wikipedia links
static MARKDOWN_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\]\((https?://[^\s()]+(?:\([^\s()]*\)[^\s()]*)*)\)").expect("markdown target pattern")
});

static CITATION_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d+\]:?\s*<?(https?://[^\s<>]+)").expect("citation target pattern")
});

/// Characters stripped from the end of a URL unconditionally
const TRAILING: &[char] = &[
    '.', ',', ';', ':', '!', '?', '\'', '"', '*', '`', '}', '>', '\u{2019}', '\u{201d}',
];

/// One way of finding URLs in text
pub trait UrlExtractor: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Raw candidates, in order of appearance, before trimming
    fn extract(&self, text: &str) -> Vec<String>;
}

/// `https://...` anywhere in the text
#[derive(Debug, Clone, Copy, Default)]
pub struct BareUrls;

impl UrlExtractor for BareUrls {
    fn name(&self) -> &'static str {
        "bare"
    }

    fn extract(&self, text: &str) -> Vec<String> {
        BARE_URL
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Targets of `[text](url)`
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownTargets;

impl UrlExtractor for MarkdownTargets {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extract(&self, text: &str) -> Vec<String> {
        MARKDOWN_TARGET
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

/// Targets of `[n]: url` and `[n] url`
#[derive(Debug, Clone, Copy, Default)]
pub struct CitationTargets;

impl UrlExtractor for CitationTargets {
    fn name(&self) -> &'static str {
        "citation"
    }

    fn extract(&self, text: &str) -> Vec<String> {
        CITATION_TARGET
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

/// The three strategies, in merge order
pub fn default_extractors() -> Vec<Box<dyn UrlExtractor>> {
    vec![
        Box::new(BareUrls),
        Box::new(MarkdownTargets),
        Box::new(CitationTargets),
    ]
}

/// Strip trailing punctuation, keeping a closing bracket that has a partner
///
/// # Examples
///
/// ```
/// use sensecheck_verifier::trim_url;
///
/// assert_eq!(trim_url("https://x.com/a)."), "https://x.com/a");
/// assert_eq!(trim_url("https://en.wikipedia.org/wiki/Rust_(language),"),
///            "https://en.wikipedia.org/wiki/Rust_(language)");
/// ```
pub fn trim_url(raw: &str) -> &str {
    let mut url = raw.trim();
    while let Some(last) = url.chars().last() {
        let strip = match last {
            ')' => url.matches('(').count() < url.matches(')').count(),
            ']' => url.matches('[').count() < url.matches(']').count(),
            c => TRAILING.contains(&c),
        };
        if !strip {
            break;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
    url
}

fn parse_http(candidate: &str) -> Option<Url> {
    let parsed = Url::parse(candidate).ok()?;
    (matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()).then_some(parsed)
}

fn is_bare_domain(url: &Url) -> bool {
    matches!(url.path(), "" | "/") && url.query().is_none() && url.fragment().is_none()
}

/// Trim, validate and deduplicate candidate URLs, preserving first-seen order
///
/// A bare domain is dropped when a deeper URL on the same host is present.
pub fn merge_urls<I, S>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut kept: Vec<(String, Url)> = Vec::new();

    for candidate in candidates {
        let cleaned = trim_url(candidate.as_ref());
        let Some(parsed) = parse_http(cleaned) else {
            continue;
        };
        if seen.insert(parsed.as_str().to_string()) {
            kept.push((cleaned.to_string(), parsed));
        }
    }

    let deep_hosts: HashSet<String> = kept
        .iter()
        .filter(|(_, url)| !is_bare_domain(url))
        .filter_map(|(_, url)| url.host_str().map(str::to_string))
        .collect();

    kept.into_iter()
        .filter(|(_, url)| {
            !(is_bare_domain(url) && url.host_str().is_some_and(|h| deep_hosts.contains(h)))
        })
        .map(|(cleaned, _)| cleaned)
        .collect()
}

/// Run `extractors` over `text` and merge their results
pub fn extract_urls_with(extractors: &[Box<dyn UrlExtractor>], text: &str) -> Vec<String> {
    merge_urls(extractors.iter().flat_map(|e| e.extract(text)))
}

/// Every well-formed source URL in `text`, once each
///
/// # Examples
///
/// ```
/// use sensecheck_verifier::extract_urls;
///
/// let text = "See https://x.com and [the filing](https://x.com/ir/10-k.pdf).\n[1]: https://y.org/a";
/// assert_eq!(extract_urls(text), vec!["https://x.com/ir/10-k.pdf", "https://y.org/a"]);
/// ```
pub fn extract_urls(text: &str) -> Vec<String> {
    extract_urls_with(&default_extractors(), text)
}
