//! MCP tool parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::format::EmailFormat;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListInboxParams {
    #[schemars(
        description = "Inbox name to query (max 50 characters, alphanumeric with dots). Can use * for all inboxes or prefix* for wildcard search in private domain with API token."
    )]
    pub inbox_name: String,
    #[schemars(
        description = "Domain to query: \"public\", \"private\", or custom domain name. Defaults to \"private\" if API token exists, \"public\" otherwise."
    )]
    pub domain: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetEmailParams {
    #[schemars(
        description = "Message ID (from list_inbox results) or a listing number from the most recent list_inbox call."
    )]
    pub message_id: String,
    #[schemars(
        description = "Domain the message lives in. Defaults to the domain of the most recent listing, then \"private\"/\"public\" based on API token presence."
    )]
    pub domain: Option<String>,
    #[schemars(
        description = "Output format: summary, text, textplain, texthtml, full, raw, headers, smtplog, links, or linksfull. Defaults to text."
    )]
    pub format: Option<EmailFormat>,
}
