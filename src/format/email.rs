//! Email renderers, one per output format

use serde_json::Value;

use super::links::extract_links;
use super::table::render_table;
use super::time::format_absolute_time;
use super::EmailFormat;
use crate::types::EmailMessage;

const RULE_WIDTH: usize = 80;

/// Render a message in the requested format
///
/// Total over the closed format enum; absent fields render as placeholders.
pub fn render(email: &EmailMessage, format: EmailFormat) -> String {
    match format {
        EmailFormat::Summary => render_summary(email),
        EmailFormat::Text => render_text(email),
        EmailFormat::Textplain => render_text_part(email, "text/plain"),
        EmailFormat::Texthtml => render_text_part(email, "text/html"),
        EmailFormat::Full | EmailFormat::Raw => render_json(email),
        EmailFormat::Headers => render_headers(email),
        EmailFormat::Smtplog => render_smtp_log(email),
        EmailFormat::Links => render_links(email, false),
        EmailFormat::Linksfull => render_links(email, true),
    }
}

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().unwrap_or(placeholder)
}

fn time_or_unknown(time: Option<i64>) -> String {
    time.map(format_absolute_time)
        .unwrap_or_else(|| "(unknown)".to_string())
}

fn render_summary(email: &EmailMessage) -> String {
    let mut lines = vec![
        "Email Summary".to_string(),
        String::new(),
        format!("Subject: {}", or_placeholder(&email.subject, "(no subject)")),
        format!("From: {}", or_placeholder(&email.from, "(unknown)")),
        format!("To: {}", or_placeholder(&email.to, "(unknown)")),
        format!("Domain: {}", or_placeholder(&email.domain, "(unknown)")),
        format!("Time: {}", time_or_unknown(email.time)),
        format!("ID: {}", or_placeholder(&email.id, "(unknown)")),
    ];
    if let Some(origfrom) = &email.origfrom {
        lines.push(format!("Original From: {origfrom}"));
    }
    lines.push(String::new());
    lines.join("\n")
}

fn render_text(email: &EmailMessage) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "From: {}\n",
        or_placeholder(&email.from, "(unknown)")
    ));
    out.push_str(&format!(
        "Subject: {}\n",
        or_placeholder(&email.subject, "(no subject)")
    ));
    out.push_str(&format!("Time: {}\n", time_or_unknown(email.time)));
    out.push_str(&"\u{2500}".repeat(RULE_WIDTH));
    out.push_str("\n\n");
    out.push_str(email.text_content().unwrap_or("(no text content)"));
    out.push('\n');
    out
}

fn render_text_part(email: &EmailMessage, mime_type: &str) -> String {
    match email.part_body(mime_type) {
        Some(body) => format!("{mime_type} content:\n\n{body}\n"),
        None => format!("{mime_type} content:\n\n(no {mime_type} content found)\n"),
    }
}

fn render_json(email: &EmailMessage) -> String {
    serde_json::to_string_pretty(email).unwrap_or_else(|_| "{}".to_string())
}

fn render_headers(email: &EmailMessage) -> String {
    let rows: Vec<Vec<String>> = email
        .headers
        .iter()
        .flatten()
        .map(|(name, value)| vec![name.clone(), header_value(value)])
        .collect();
    format!(
        "Email Headers\n{}",
        render_table(&["Header", "Value"], &[28, 68], &rows)
    )
}

/// Header values arrive as strings or arrays of strings
fn header_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn render_smtp_log(email: &EmailMessage) -> String {
    let mut out = String::from("SMTP Log\n\n");
    match email.smtp_log_entries() {
        Some(entries) => {
            for entry in entries {
                let timestamp = entry
                    .get("timestamp")
                    .map(log_timestamp)
                    .unwrap_or_else(|| "unknown".to_string());
                let event = entry
                    .get("event")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                let details = entry.get("details").and_then(Value::as_str).unwrap_or("");

                out.push_str(&format!("[{timestamp}] {event}"));
                if !details.is_empty() {
                    out.push_str(&format!(" - {details}"));
                }
                out.push('\n');
            }
        }
        None => out.push_str("(no SMTP log available)\n"),
    }
    out
}

/// Log timestamps arrive as epoch millis or as preformatted strings
fn log_timestamp(value: &Value) -> String {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|date| date.to_rfc3339())
            .unwrap_or_else(|| "unknown".to_string()),
        Value::String(s) => s.clone(),
        _ => "unknown".to_string(),
    }
}

fn render_links(email: &EmailMessage, full_details: bool) -> String {
    let links = extract_links(email);
    if links.is_empty() {
        return "Links\n\n(no links found)\n".to_string();
    }

    if full_details {
        let rows: Vec<Vec<String>> = links
            .iter()
            .enumerate()
            .map(|(index, link)| {
                vec![
                    (index + 1).to_string(),
                    if link.text.is_empty() {
                        "(no text)".to_string()
                    } else {
                        link.text.clone()
                    },
                    link.url.clone(),
                ]
            })
            .collect();
        format!(
            "Links\n{}",
            render_table(&["#", "Link Text", "URL"], &[3, 38, 53], &rows)
        )
    } else {
        let mut out = String::from("Links\n\n");
        for (index, link) in links.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", index + 1, link.url));
        }
        out
    }
}
