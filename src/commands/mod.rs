//! Command orchestrators shared by the CLI and the MCP server

mod email;
mod inbox;

pub use email::get_email;
pub use inbox::list_inbox;

use crate::api::MailinatorClient;
use crate::cache::InboxCache;
use crate::config::Config;

/// Shared state behind both transports: the API client, the listing cache,
/// and the resolved token.
pub struct AppContext {
    pub client: MailinatorClient,
    pub cache: InboxCache,
    pub api_token: Option<String>,
}

impl AppContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: MailinatorClient::new(config.api_token.clone()),
            cache: InboxCache::file(),
            api_token: config.api_token.clone(),
        }
    }

    pub fn new(client: MailinatorClient, cache: InboxCache, api_token: Option<String>) -> Self {
        Self {
            client,
            cache,
            api_token,
        }
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// Domain used when none is given: private inboxes need a token
    pub fn default_domain(&self) -> &'static str {
        if self.has_token() {
            "private"
        } else {
            "public"
        }
    }
}
