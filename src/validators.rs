//! Input validation
//!
//! Pure predicates, called by the orchestrators before any network access so
//! malformed input never reaches the API.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

const MAX_INBOX_LENGTH: usize = 50;

// Alphanumerics with dots and wildcards strictly between (or as) edge
// characters; wildcard placement is enforced separately by validate_wildcard.
static INBOX_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9*]([A-Za-z0-9.*]*[A-Za-z0-9*])?$").expect("invalid inbox name regex")
});

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*$")
        .expect("invalid domain regex")
});

/// Validate an inbox name: 1-50 characters, alphanumeric with dots not at
/// the edges
pub fn validate_inbox_name(inbox_name: &str) -> Result<()> {
    if inbox_name.is_empty() {
        return Err(Error::validation("inbox name is required"));
    }
    if inbox_name.len() > MAX_INBOX_LENGTH {
        return Err(Error::validation(format!(
            "inbox name must be {MAX_INBOX_LENGTH} characters or less"
        )));
    }
    if !INBOX_NAME_RE.is_match(inbox_name) {
        return Err(Error::validation(
            "inbox name must be alphanumeric with optional dots (not at the beginning or end)",
        ));
    }
    Ok(())
}

/// Validate a domain: "public" and "private" always pass, anything else must
/// look like a DNS hostname
pub fn validate_domain(domain: &str) -> Result<()> {
    if domain == "public" || domain == "private" {
        return Ok(());
    }
    if domain.is_empty() || !DOMAIN_RE.is_match(domain) {
        return Err(Error::validation(
            "domain must be \"public\", \"private\", or a valid domain name",
        ));
    }
    Ok(())
}

/// Validate wildcard usage in an inbox name
///
/// Wildcards need an API token, are never allowed in the public domain, and
/// the only accepted shapes are `*` and `prefix*`.
pub fn validate_wildcard(inbox_name: &str, domain: &str, has_token: bool) -> Result<()> {
    if !inbox_name.contains('*') {
        return Ok(());
    }
    if !has_token {
        return Err(Error::validation(
            "wildcard searches require an API token, please configure your token",
        ));
    }
    if domain == "public" {
        return Err(Error::validation(
            "wildcard searches are not allowed in the public domain",
        ));
    }
    if inbox_name != "*" && !inbox_name.ends_with('*') {
        return Err(Error::validation(
            "wildcard must be \"*\" or \"prefix*\" (wildcard at the end only)",
        ));
    }
    if inbox_name != "*" {
        let prefix = &inbox_name[..inbox_name.len() - 1];
        if prefix.contains('*') {
            return Err(Error::validation(
                "only one wildcard (*) is allowed, at the end",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbox_names_accept_dots_between_alphanumerics() {
        assert!(validate_inbox_name("joe").is_ok());
        assert!(validate_inbox_name("joe.smith").is_ok());
        assert!(validate_inbox_name("a").is_ok());
        assert!(validate_inbox_name("A1.b2.C3").is_ok());
    }

    #[test]
    fn inbox_names_reject_edge_dots_and_bad_chars() {
        assert!(validate_inbox_name("").is_err());
        assert!(validate_inbox_name(".joe").is_err());
        assert!(validate_inbox_name("joe.").is_err());
        assert!(validate_inbox_name("joe smith").is_err());
        assert!(validate_inbox_name("joe@smith").is_err());
    }

    #[test]
    fn inbox_names_enforce_length_bound() {
        assert!(validate_inbox_name(&"a".repeat(50)).is_ok());
        assert!(validate_inbox_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn wildcard_names_pass_the_shape_check() {
        // Placement rules are the wildcard validator's job; the name pattern
        // itself lets these through.
        assert!(validate_inbox_name("*").is_ok());
        assert!(validate_inbox_name("abc*").is_ok());
    }

    #[test]
    fn special_domains_always_pass() {
        assert!(validate_domain("public").is_ok());
        assert!(validate_domain("private").is_ok());
    }

    #[test]
    fn hostname_domains_are_validated() {
        assert!(validate_domain("example.com").is_ok());
        assert!(validate_domain("my-team.example.co.uk").is_ok());
        assert!(validate_domain("localhost").is_ok());

        assert!(validate_domain("").is_err());
        assert!(validate_domain("-bad.com").is_err());
        assert!(validate_domain("bad-.com").is_err());
        assert!(validate_domain("bad..com").is_err());
        assert!(validate_domain("bad_domain.com").is_err());
    }

    #[test]
    fn non_wildcard_names_skip_wildcard_rules() {
        assert!(validate_wildcard("joe", "public", false).is_ok());
    }

    #[test]
    fn wildcard_rules() {
        assert!(validate_wildcard("abc*", "private", true).is_ok());
        assert!(validate_wildcard("*", "private", true).is_ok());
        assert!(validate_wildcard("*", "example.com", true).is_ok());

        // Needs a token
        assert!(validate_wildcard("abc*", "private", false).is_err());
        // Never in the public domain
        assert!(validate_wildcard("*", "public", true).is_err());
        assert!(validate_wildcard("abc*", "public", true).is_err());
        // Wildcard only at the end, and only one
        assert!(validate_wildcard("a*b", "private", true).is_err());
        assert!(validate_wildcard("*abc", "private", true).is_err());
        assert!(validate_wildcard("a**", "private", true).is_err());
    }
}
