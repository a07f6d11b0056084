//! Headline-level helpers: normalization, length stats, publisher domains.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid non-word regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Lowercase, replace every non-word character with a space, collapse and trim whitespace.
///
/// ```
/// use newsquant_news::text::clean_text;
/// assert_eq!(clean_text("  Apple's stock is UP! "), "apple s stock is up");
/// ```
pub fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let spaced = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

/// Character and whitespace-token counts of one raw headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineLength {
    pub chars: usize,
    pub tokens: usize,
}

/// Length stats per headline, in input order. Nothing is trimmed.
pub fn headline_length<S: AsRef<str>>(headlines: &[S]) -> Vec<HeadlineLength> {
    headlines
        .iter()
        .map(|h| {
            let h = h.as_ref();
            HeadlineLength {
                chars: h.chars().count(),
                tokens: h.split_whitespace().count(),
            }
        })
        .collect()
}

/// Normalize a publisher field to a domain-like key.
///
/// Email addresses yield the part after `@`. URLs and bare hosts yield their
/// registrable domain per the public suffix list (`markets.wsj.com` →
/// `wsj.com`, `www.bbc.co.uk` → `bbc.co.uk`). Anything else is returned
/// trimmed and lowercased.
pub fn publisher_domain(publisher: &str) -> String {
    let p = publisher.trim();
    if p.is_empty() {
        return String::new();
    }

    if let Some((_, domain)) = p.rsplit_once('@') {
        return domain.to_lowercase();
    }

    let without_scheme = p.split_once("://").map_or(p, |(_, rest)| rest);
    let host = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    let host = host.to_lowercase();

    if !looks_like_host(&host) {
        return p.to_lowercase();
    }
    match psl::domain_str(&host) {
        Some(domain) => domain.to_string(),
        // The host is itself a public suffix
        None => host.strip_prefix("www.").unwrap_or(&host).to_string(),
    }
}

fn looks_like_host(candidate: &str) -> bool {
    let mut labels = candidate.split('.');
    let Some(first) = labels.next() else {
        return false;
    };
    let rest: Vec<&str> = labels.collect();
    let valid_label = |l: &str| {
        !l.is_empty() && l.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    valid_label(first)
        && !rest.is_empty()
        && rest.iter().all(|l| valid_label(l))
        && rest
            .last()
            .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_alphabetic()))
}
