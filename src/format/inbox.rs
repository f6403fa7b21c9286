//! Inbox listing rendering

use super::table::render_table;
use super::time::format_time_ago;
use crate::types::InboxListing;

/// Render an inbox listing as a numbered table
///
/// The `#` column carries the listing numbers that `email <n>` resolves
/// against the cache.
pub fn format_inbox_table(listing: &InboxListing) -> String {
    if listing.messages.is_empty() {
        return format!(
            "No emails found in inbox \"{}\" ({})\n",
            listing.inbox_name, listing.domain
        );
    }

    let rows: Vec<Vec<String>> = listing
        .messages
        .iter()
        .map(|message| {
            vec![
                message.number.to_string(),
                text_or(&message.from, "(no sender)"),
                text_or(&message.subject, "(no subject)"),
                format_time_ago(message.time, Some(message.seconds_ago)),
            ]
        })
        .collect();

    format!(
        "Inbox: {}@{}\n{}\nTotal: {} email{}\n",
        listing.inbox_name,
        listing.domain,
        render_table(&["#", "From", "Subject", "Time"], &[5, 30, 50, 20], &rows),
        listing.count,
        if listing.count == 1 { "" } else { "s" }
    )
}

fn text_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
