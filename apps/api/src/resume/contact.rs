//! Contact extraction — five independent regex passes over the full resume text.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{
    or_placeholder, EMAIL_PLACEHOLDER, GITHUB_PLACEHOLDER, LINKEDIN_PLACEHOLDER,
    PHONE_PLACEHOLDER, WEBSITE_PLACEHOLDER,
};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email regex")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-\s()]?)?(?:\d{2,4}[-\s()]?){2,}\d{3,4}").expect("phone regex")
});

static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com/in/(\w[-_\w]*)").expect("linkedin regex"));

static GITHUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)github\.com/(\w[-_\w]*)").expect("github regex"));

static WEBSITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://(?:www\.)?([a-zA-Z0-9-]+(?:\.[a-zA-Z]+)+)(?:/\S*)?")
        .expect("website regex")
});

/// Domains that never count as a personal website.
const SOCIAL_DOMAINS: &[&str] = &["linkedin.com", "github.com", "twitter.com", "facebook.com"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
}

/// Runs every contact pattern over `text`. Misses become placeholders.
pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        email: or_placeholder(first_email(text), EMAIL_PLACEHOLDER),
        phone: or_placeholder(first_phone(text), PHONE_PLACEHOLDER),
        linkedin: or_placeholder(linkedin_profile(text), LINKEDIN_PLACEHOLDER),
        github: or_placeholder(github_profile(text), GITHUB_PLACEHOLDER),
        website: or_placeholder(personal_website(text), WEBSITE_PLACEHOLDER),
    }
}

fn first_email(text: &str) -> Option<String> {
    dedup_in_order(EMAIL.find_iter(text).map(|m| m.as_str()))
        .into_iter()
        .next()
}

fn first_phone(text: &str) -> Option<String> {
    dedup_in_order(PHONE.find_iter(text).map(|m| m.as_str().trim()))
        .into_iter()
        .next()
}

fn linkedin_profile(text: &str) -> Option<String> {
    LINKEDIN
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|handle| format!("linkedin.com/in/{}", handle.as_str()))
}

fn github_profile(text: &str) -> Option<String> {
    GITHUB
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|handle| format!("github.com/{}", handle.as_str()))
}

fn personal_website(text: &str) -> Option<String> {
    WEBSITE
        .captures_iter(text)
        .filter(|c| {
            let domain = c[1].to_lowercase();
            !is_social_domain(&domain)
        })
        .map(|c| ensure_scheme(c[0].trim_end_matches(['.', ',', ';', ':', ')'])))
        .next()
}

/// Exact social domain or one of its subdomains; `notgithub.com` is not social.
fn is_social_domain(domain: &str) -> bool {
    SOCIAL_DOMAINS.iter().any(|social| {
        domain == *social
            || domain
                .strip_suffix(social)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

fn ensure_scheme(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// Distinct values in first-occurrence order.
fn dedup_in_order<'a>(matches: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    matches
        .filter(|m| seen.insert(*m))
        .map(str::to_string)
        .collect()
}
