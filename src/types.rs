//! Wire and domain types
//!
//! The email message schema is explicit but lossless: every field the
//! renderers look at is a typed `Option`, and everything else rides along in
//! a flattened extras map so `full`/`raw` output reproduces the API response
//! exactly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// ============================================================================
// Inbox listing
// ============================================================================

/// One message summary as returned by the inbox endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub seconds_ago: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw inbox endpoint response
///
/// The API has used both `msgs` and `messages` as the array key over time;
/// accept either.
#[derive(Debug, Clone, Deserialize)]
pub struct InboxPage {
    #[serde(default)]
    msgs: Option<Vec<InboxMessage>>,
    #[serde(default)]
    messages: Option<Vec<InboxMessage>>,
}

impl InboxPage {
    pub fn into_messages(self) -> Vec<InboxMessage> {
        self.msgs.or(self.messages).unwrap_or_default()
    }
}

/// A message with its ephemeral 1-based listing number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumberedMessage {
    pub number: u64,
    pub id: String,
    pub from: String,
    pub subject: String,
    pub time: i64,
    pub seconds_ago: f64,
}

impl NumberedMessage {
    /// Renumber a fetched listing 1..N by position, dropping extra fields
    pub fn number_all(messages: &[InboxMessage]) -> Vec<NumberedMessage> {
        messages
            .iter()
            .enumerate()
            .map(|(index, msg)| NumberedMessage {
                number: index as u64 + 1,
                id: msg.id.clone(),
                from: msg.from.clone(),
                subject: msg.subject.clone(),
                time: msg.time,
                seconds_ago: msg.seconds_ago,
            })
            .collect()
    }
}

/// Structured result of the `list_inbox` operation
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct InboxListing {
    pub inbox_name: String,
    pub domain: String,
    pub messages: Vec<NumberedMessage>,
    pub count: usize,
}

/// The addressing triple resolved from a listing number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub id: String,
    pub domain: String,
    pub inbox_name: String,
}

// ============================================================================
// Email message
// ============================================================================

/// One MIME sub-part of a multi-part message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessagePart {
    /// Whether this part's content-type header contains the given MIME type
    pub fn is_content_type(&self, mime_type: &str) -> bool {
        self.headers
            .as_ref()
            .and_then(|headers| {
                headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case("content-type"))
            })
            .map(|(_, value)| value.contains(mime_type))
            .unwrap_or(false)
    }
}

/// A full email message as returned by the message endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origfrom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_ago: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<MessagePart>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtplog: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EmailMessage {
    /// Body of the first sub-part whose content-type contains `mime_type`
    pub fn part_body(&self, mime_type: &str) -> Option<&str> {
        self.parts.as_deref()?.iter().find_map(|part| {
            if part.is_content_type(mime_type) {
                part.body.as_deref()
            } else {
                None
            }
        })
    }

    /// Best-effort text content: text/plain part, then text/html part, then
    /// the top-level body field
    pub fn text_content(&self) -> Option<&str> {
        self.part_body("text/plain")
            .or_else(|| self.part_body("text/html"))
            .or(self.body.as_deref())
    }

    /// SMTP delivery log entries
    ///
    /// The API has exposed the log under three layouts over time; the first
    /// match wins: an array at `smtplog.log`, a top-level `log` array, or
    /// `smtplog` itself being the array.
    pub fn smtp_log_entries(&self) -> Option<&[Value]> {
        if let Some(entries) = self
            .smtplog
            .as_ref()
            .and_then(|v| v.get("log"))
            .and_then(Value::as_array)
        {
            return Some(entries);
        }
        if let Some(entries) = self.log.as_ref().and_then(Value::as_array) {
            return Some(entries);
        }
        if let Some(entries) = self.smtplog.as_ref().and_then(Value::as_array) {
            return Some(entries);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn part(content_type: &str, body: &str) -> MessagePart {
        MessagePart {
            headers: Some(HashMap::from([(
                "content-type".to_string(),
                content_type.to_string(),
            )])),
            body: Some(body.to_string()),
            extra: Map::new(),
        }
    }

    #[test]
    fn inbox_page_accepts_both_array_keys() {
        let page: InboxPage = serde_json::from_value(json!({"msgs": [{"id": "a"}]})).unwrap();
        assert_eq!(page.into_messages().len(), 1);

        let page: InboxPage = serde_json::from_value(json!({"messages": [{"id": "b"}]})).unwrap();
        assert_eq!(page.into_messages()[0].id, "b");

        let page: InboxPage = serde_json::from_value(json!({})).unwrap();
        assert!(page.into_messages().is_empty());
    }

    #[test]
    fn numbering_is_dense_and_positional() {
        let messages: Vec<InboxMessage> =
            serde_json::from_value(json!([{"id": "x"}, {"id": "y"}, {"id": "z"}])).unwrap();
        let numbered = NumberedMessage::number_all(&messages);
        assert_eq!(
            numbered.iter().map(|m| m.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(numbered[2].id, "z");
    }

    #[test]
    fn text_content_prefers_plain_over_html_over_body() {
        let mut email = EmailMessage {
            parts: Some(vec![
                part("text/html; charset=utf-8", "<p>html</p>"),
                part("text/plain; charset=utf-8", "plain"),
            ]),
            body: Some("top".to_string()),
            ..Default::default()
        };
        assert_eq!(email.text_content(), Some("plain"));

        email.parts = Some(vec![part("text/html", "<p>html</p>")]);
        assert_eq!(email.text_content(), Some("<p>html</p>"));

        email.parts = None;
        assert_eq!(email.text_content(), Some("top"));

        email.body = None;
        assert_eq!(email.text_content(), None);
    }

    #[test]
    fn content_type_lookup_is_case_insensitive() {
        let p = MessagePart {
            headers: Some(HashMap::from([(
                "Content-Type".to_string(),
                "text/plain".to_string(),
            )])),
            body: Some("x".to_string()),
            extra: Map::new(),
        };
        assert!(p.is_content_type("text/plain"));
    }

    #[test]
    fn smtp_log_shapes_are_tried_in_priority_order() {
        let nested: EmailMessage =
            serde_json::from_value(json!({"smtplog": {"log": [{"event": "a"}]}})).unwrap();
        assert_eq!(nested.smtp_log_entries().unwrap().len(), 1);

        let top_level: EmailMessage =
            serde_json::from_value(json!({"log": [{"event": "b"}, {"event": "c"}]})).unwrap();
        assert_eq!(top_level.smtp_log_entries().unwrap().len(), 2);

        let bare: EmailMessage =
            serde_json::from_value(json!({"smtplog": [{"event": "d"}]})).unwrap();
        assert_eq!(bare.smtp_log_entries().unwrap().len(), 1);

        // smtplog.log wins over a top-level log array
        let both: EmailMessage = serde_json::from_value(
            json!({"smtplog": {"log": [{"event": "x"}]}, "log": [{"event": "y"}, {"event": "z"}]}),
        )
        .unwrap();
        assert_eq!(both.smtp_log_entries().unwrap().len(), 1);

        let none = EmailMessage::default();
        assert!(none.smtp_log_entries().is_none());
    }

    #[test]
    fn unknown_fields_round_trip_through_extras() {
        let raw = json!({
            "id": "m1",
            "subject": "hi",
            "fromfull": "Someone <someone@example.com>",
            "stream": {"nested": [1, 2, 3]}
        });
        let email: EmailMessage = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&email).unwrap(), raw);
    }
}
