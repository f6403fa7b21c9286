//! The inbox listing command

use tracing::debug;

use super::AppContext;
use crate::error::Result;
use crate::types::{InboxListing, NumberedMessage};
use crate::validators::{validate_domain, validate_inbox_name, validate_wildcard};

/// List an inbox and record the listing in the cache
///
/// Validation runs before any network call. The domain defaults to
/// "private" when a token is configured, "public" otherwise. Empty
/// listings are returned but not cached, so the previous listing's
/// numbers stay valid.
pub async fn list_inbox(
    ctx: &AppContext,
    inbox_name: &str,
    domain: Option<&str>,
) -> Result<InboxListing> {
    validate_inbox_name(inbox_name)?;

    let domain = domain.unwrap_or_else(|| ctx.default_domain());
    validate_domain(domain)?;
    validate_wildcard(inbox_name, domain, ctx.has_token())?;

    debug!(inbox_name, domain, "listing inbox");
    let messages = ctx.client.get_inbox(domain, inbox_name).await?.into_messages();

    if !messages.is_empty() {
        ctx.cache.record_listing(domain, inbox_name, &messages)?;
    }

    let numbered = NumberedMessage::number_all(&messages);
    Ok(InboxListing {
        inbox_name: inbox_name.to_string(),
        domain: domain.to_string(),
        count: numbered.len(),
        messages: numbered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MailinatorClient;
    use crate::cache::InboxCache;
    use crate::error::Error;

    fn offline_ctx(api_token: Option<&str>) -> AppContext {
        AppContext::new(
            MailinatorClient::new(api_token.map(String::from)),
            InboxCache::in_memory(),
            api_token.map(String::from),
        )
    }

    #[tokio::test]
    async fn invalid_name_fails_before_any_network_call() {
        let ctx = offline_ctx(None);
        let err = list_inbox(&ctx, ".bad", None).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn invalid_domain_fails_before_any_network_call() {
        let ctx = offline_ctx(None);
        let err = list_inbox(&ctx, "joe", Some("bad..domain")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn wildcard_without_token_fails_before_any_network_call() {
        let ctx = offline_ctx(None);
        let err = list_inbox(&ctx, "abc*", Some("example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn wildcard_in_public_domain_fails_even_with_token() {
        let ctx = offline_ctx(Some("tok"));
        let err = list_inbox(&ctx, "abc*", Some("public")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn default_domain_tracks_token_presence() {
        assert_eq!(offline_ctx(None).default_domain(), "public");
        assert_eq!(offline_ctx(Some("tok")).default_domain(), "private");
    }
}
