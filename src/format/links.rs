//! Link extraction from message bodies
//!
//! Two passes over every content chunk (each MIME sub-part body in order,
//! then the top-level body): first `<a href=...>` anchors with their inner
//! text, then bare `http(s)://` URLs in the text that remains once the
//! anchor spans are removed. Results are deduplicated by URL with the first
//! occurrence (and its text) winning.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::types::EmailMessage;

/// An extracted link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    /// Anchor text, empty for bare URLs
    pub text: String,
}

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*href\s*=\s*["']?([^"'\s>]+)["']?[^>]*>(.*?)</a>"#)
        .expect("invalid anchor regex")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"));

static BARE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("invalid url regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("invalid whitespace regex"));

/// Extract all links from a message, deduplicated by URL
pub fn extract_links(email: &EmailMessage) -> Vec<Link> {
    let mut links = Vec::new();

    if let Some(parts) = &email.parts {
        for part in parts {
            if let Some(body) = &part.body {
                scan_chunk(body, &mut links);
            }
        }
    }
    if let Some(body) = &email.body {
        scan_chunk(body, &mut links);
    }

    let mut seen = HashSet::new();
    links.retain(|link| seen.insert(link.url.clone()));
    links
}

fn scan_chunk(text: &str, out: &mut Vec<Link>) {
    for captures in ANCHOR_RE.captures_iter(text) {
        let url = captures[1].to_string();
        let inner = TAG_RE.replace_all(&captures[2], " ");
        let cleaned = WHITESPACE_RE.replace_all(inner.trim(), " ").to_string();
        out.push(Link { url, text: cleaned });
    }

    // Strip matched anchors so their hrefs are not counted twice as bare URLs
    let remainder = ANCHOR_RE.replace_all(text, " ");
    for matched in BARE_URL_RE.find_iter(&remainder) {
        out.push(Link {
            url: matched.as_str().to_string(),
            text: String::new(),
        });
    }
}
