//! MCP server implementation
//!
//! Exposes the two command orchestrators as MCP tools plus two readable
//! resources, over stdio. Errors cross this boundary as JSON-RPC error
//! objects with per-kind codes, and messages are scrubbed of credentials
//! first.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, Content, ErrorCode, ListResourceTemplatesResult,
        ListResourcesResult,
        PaginatedRequestParam, RawResourceTemplate, ReadResourceRequestParam, ReadResourceResult,
        ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use serde::Serialize;

use crate::commands::{self, AppContext};
use crate::error::Error;
use crate::format::EmailFormat;
use crate::params::{GetEmailParams, ListInboxParams};

const SERVER_INSTRUCTIONS: &str = "Mailinator is a free, disposable, email service. All email \
    addresses (up to 50 characters) exist at the following domains: mailinator.com (public), and \
    private/custom domains for authenticated users - there is no need to 'create' email addresses \
    at these domains, use any one you wish! Send email (or have email sent) to this domain anytime \
    you need to receive an email as part of a workflow. This MCP allows you to fetch inbox message \
    summaries and to fetch individual emails in an array of formats. Use Mailinator anytime you \
    need a quick, frictionless, way to receive an email for any purpose. Use list_inbox to list \
    messages and get_email to retrieve specific messages by ID. The Public domain requires no \
    authentication. Customers may provide an API token to access messages in their private \
    domains.";

const INBOX_URI_TEMPLATE: &str = "mailinator://inbox/{domain}/{inbox_name}";
const EMAIL_URI_TEMPLATE: &str = "mailinator://email/{domain}/{message_id}";

static INBOX_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^mailinator://inbox/([^/]+)/([^/]+)$").expect("invalid inbox URI regex")
});

static EMAIL_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^mailinator://email/([^/]+)/([^/]+)$").expect("invalid email URI regex")
});

/// The Mailinator MCP server
#[derive(Clone)]
pub struct MailinatorMcpServer {
    ctx: Arc<AppContext>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MailinatorMcpServer {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Lists all emails in a Mailinator inbox. Supports wildcards (* or prefix*) for private domains with API token. Returns an array of email messages with metadata (from, subject, time, message ID) and a listing number usable with get_email."
    )]
    async fn list_inbox(
        &self,
        Parameters(params): Parameters<ListInboxParams>,
    ) -> Result<CallToolResult, McpError> {
        let listing =
            commands::list_inbox(&self.ctx, &params.inbox_name, params.domain.as_deref())
                .await
                .map_err(|e| to_mcp_error(&e))?;
        json_result(&listing)
    }

    #[tool(
        description = "Retrieves a specific email by message ID or by listing number from the most recent list_inbox call. Supports ten output formats; defaults to text."
    )]
    async fn get_email(
        &self,
        Parameters(params): Parameters<GetEmailParams>,
    ) -> Result<CallToolResult, McpError> {
        let format = params.format.unwrap_or_default();
        let email =
            commands::get_email(&self.ctx, &params.message_id, params.domain.as_deref(), format)
                .await
                .map_err(|e| to_mcp_error(&e))?;
        json_result(&email)
    }
}

#[tool_handler]
impl rmcp::ServerHandler for MailinatorMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        // Inboxes are unbounded; only templates are advertised
        Ok(ListResourcesResult {
            resources: Vec::new(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        Ok(ListResourceTemplatesResult {
            resource_templates: vec![
                RawResourceTemplate {
                    uri_template: INBOX_URI_TEMPLATE.to_string(),
                    name: "Mailinator Inbox".to_string(),
                    title: None,
                    description: Some(
                        "Read-only access to Mailinator inbox listings. Returns all emails in \
                         the specified inbox with metadata."
                            .to_string(),
                    ),
                    mime_type: Some("application/json".to_string()),
                    icons: None,
                }
                .no_annotation(),
                RawResourceTemplate {
                    uri_template: EMAIL_URI_TEMPLATE.to_string(),
                    name: "Mailinator Email".to_string(),
                    title: None,
                    description: Some(
                        "Read-only access to specific Mailinator emails. Returns the full email \
                         structure with headers and metadata."
                            .to_string(),
                    ),
                    mime_type: Some("application/json".to_string()),
                    icons: None,
                }
                .no_annotation(),
            ],
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = request.uri;

        if let Some(captures) = INBOX_URI_RE.captures(&uri) {
            let listing = commands::list_inbox(&self.ctx, &captures[2], Some(&captures[1]))
                .await
                .map_err(|e| to_mcp_error(&e))?;
            return json_resource(&uri, &listing);
        }

        if let Some(captures) = EMAIL_URI_RE.captures(&uri) {
            let email = commands::get_email(
                &self.ctx,
                &captures[2],
                Some(&captures[1]),
                EmailFormat::Text,
            )
            .await
            .map_err(|e| to_mcp_error(&e))?;
            return json_resource(&uri, &email);
        }

        Err(McpError::invalid_params(
            format!(
                "Invalid resource URI \"{uri}\". Expected: {INBOX_URI_TEMPLATE} or {EMAIL_URI_TEMPLATE}"
            ),
            None,
        ))
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn json_resource<T: Serialize>(uri: &str, value: &T) -> Result<ReadResourceResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(json, uri)],
    })
}

// ============================================================================
// Error translation
// ============================================================================

const API_ERROR_CODE: ErrorCode = ErrorCode(-32000);
const CACHE_ERROR_CODE: ErrorCode = ErrorCode(-32001);

/// Translate an application error into a JSON-RPC error object
///
/// Messages are redacted before transmission: an API failure echoing the
/// request may otherwise leak the caller's bearer token.
fn to_mcp_error(error: &Error) -> McpError {
    match error {
        Error::Validation(message) => McpError::new(
            ErrorCode::INVALID_PARAMS,
            redact(message),
            Some(serde_json::json!({"type": "ValidationError"})),
        ),
        Error::Api {
            message, status, ..
        } => {
            let mut data = serde_json::json!({"type": "APIError"});
            if let Some(status) = status {
                data["statusCode"] = (*status).into();
            }
            McpError::new(API_ERROR_CODE, redact(message), Some(data))
        }
        Error::Cache(cache_error) => McpError::new(
            CACHE_ERROR_CODE,
            redact(&cache_error.to_string()),
            Some(serde_json::json!({"type": "CacheError"})),
        ),
        Error::Config(message) => McpError::new(
            ErrorCode::INTERNAL_ERROR,
            redact(message),
            Some(serde_json::json!({"type": "ConfigError"})),
        ),
    }
}

static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Bearer\s+[A-Za-z0-9_-]+").expect("invalid bearer regex"));

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)api[_-]?key[:\s=]+[A-Za-z0-9_-]+").expect("invalid api key regex")
});

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)token[:\s=]+[A-Za-z0-9_-]+").expect("invalid token regex"));

/// Scrub credential-shaped substrings from an error message
fn redact(message: &str) -> String {
    let message = BEARER_RE.replace_all(message, "Bearer [REDACTED]");
    let message = API_KEY_RE.replace_all(&message, "api_key=[REDACTED]");
    TOKEN_RE.replace_all(&message, "token=[REDACTED]").to_string()
}
