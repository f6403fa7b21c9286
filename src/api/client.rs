//! Mailinator API HTTP client

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::format::EmailFormat;
use crate::types::{EmailMessage, InboxPage};

pub const BASE_URL: &str = "https://api.mailinator.com/cli/v3";

/// Authenticated client for the Mailinator CLI API
pub struct MailinatorClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl MailinatorClient {
    pub fn new(api_token: Option<String>) -> Self {
        Self::with_base_url(api_token, BASE_URL)
    }

    /// Point the client at a different base URL, used by tests
    pub fn with_base_url(api_token: Option<String>, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!("mailinator-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            api_token,
        }
    }

    /// List messages in an inbox
    pub async fn get_inbox(&self, domain: &str, inbox_name: &str) -> Result<InboxPage> {
        let url = format!(
            "{}/domains/{domain}/inboxes/{inbox_name}",
            self.base_url
        );
        self.get_json(&url).await
    }

    /// Fetch a single message by ID
    pub async fn get_email(
        &self,
        domain: &str,
        message_id: &str,
        format: EmailFormat,
    ) -> Result<EmailMessage> {
        let url = format!(
            "{}/domains/{domain}/messages/{message_id}?format={format}",
            self.base_url
        );
        self.get_json(&url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, authenticated = self.api_token.is_some(), "GET");

        let mut request = self.client.get(url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|err| Error::Api {
            message: if err.is_connect() || err.is_timeout() {
                "Network error: Unable to reach Mailinator API. Check your internet connection."
                    .to_string()
            } else {
                format!("Request error: {err}")
            },
            status: None,
            body: None,
        })?;

        let status = response.status();
        debug!(%status, url, "response");

        if !status.is_success() {
            let body: Option<serde_json::Value> = response.json().await.ok();
            return Err(api_error(status, body));
        }

        response.json().await.map_err(|err| Error::Api {
            message: format!("Invalid API response: {err}"),
            status: Some(status.as_u16()),
            body: None,
        })
    }
}

fn api_error(status: StatusCode, body: Option<serde_json::Value>) -> Error {
    let message = match status {
        StatusCode::UNAUTHORIZED => {
            "Authentication failed. Please check your API token.".to_string()
        }
        StatusCode::FORBIDDEN => {
            "Access forbidden. You may need an API token to access this resource.".to_string()
        }
        StatusCode::NOT_FOUND => {
            "Resource not found. Check that the inbox/email exists.".to_string()
        }
        StatusCode::INTERNAL_SERVER_ERROR => {
            "Mailinator API server error. Please try again later.".to_string()
        }
        _ => {
            let detail = body
                .as_ref()
                .and_then(|b| b.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            format!("API error: {detail}")
        }
    };

    Error::Api {
        message,
        status: Some(status.as_u16()),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_map_to_fixed_messages() {
        let err = api_error(StatusCode::UNAUTHORIZED, None);
        let Error::Api {
            message, status, ..
        } = err
        else {
            panic!("expected api error");
        };
        assert!(message.contains("Authentication failed"));
        assert_eq!(status, Some(401));

        assert!(api_error(StatusCode::FORBIDDEN, None)
            .to_string()
            .contains("Access forbidden"));
        assert!(api_error(StatusCode::NOT_FOUND, None)
            .to_string()
            .contains("Resource not found"));
        assert!(api_error(StatusCode::INTERNAL_SERVER_ERROR, None)
            .to_string()
            .contains("server error"));
    }

    #[test]
    fn other_statuses_quote_the_payload_message() {
        let body = serde_json::json!({"message": "rate limited"});
        let err = api_error(StatusCode::TOO_MANY_REQUESTS, Some(body.clone()));
        let Error::Api {
            message,
            status,
            body: payload,
        } = err
        else {
            panic!("expected api error");
        };
        assert_eq!(message, "API error: rate limited");
        assert_eq!(status, Some(429));
        assert_eq!(payload, Some(body));

        assert_eq!(
            api_error(StatusCode::BAD_GATEWAY, None).to_string(),
            "API error: Unknown error"
        );
    }
}
