//! The email retrieval command

use tracing::debug;

use super::AppContext;
use crate::error::Result;
use crate::format::EmailFormat;
use crate::types::EmailMessage;
use crate::validators::validate_domain;

/// Fetch an email by message ID or listing number
///
/// An all-digit identifier is a listing number and resolves through the
/// cache; resolution failures surface as cache faults, never as API calls.
/// For raw message IDs the domain is taken from the explicit argument, then
/// the cached listing's domain, then the token-based default.
pub async fn get_email(
    ctx: &AppContext,
    identifier: &str,
    domain: Option<&str>,
    format: EmailFormat,
) -> Result<EmailMessage> {
    let (message_id, domain) = if is_listing_number(identifier) {
        // Listing numbers past u64 cannot match any cached entry
        let n = identifier.parse::<u64>().unwrap_or(u64::MAX);
        let reference = ctx.cache.resolve_number(n)?;
        debug!(n, id = %reference.id, "resolved listing number");
        (reference.id, reference.domain)
    } else {
        let domain = domain
            .map(String::from)
            .or_else(|| ctx.cache.current_domain())
            .unwrap_or_else(|| ctx.default_domain().to_string());
        (identifier.to_string(), domain)
    };

    validate_domain(&domain)?;

    debug!(%message_id, %domain, %format, "fetching email");
    ctx.client.get_email(&domain, &message_id, format).await
}

fn is_listing_number(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}
