//! Relative and absolute time formatting

use chrono::{DateTime, Utc};

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3600.0;
const DAY: f64 = 86400.0;

/// Format a message age as relative time ("21 mins ago")
///
/// Prefers the API's `seconds_ago` figure when available; messages older than
/// a week fall back to an absolute date derived from the timestamp.
pub fn format_time_ago(time_millis: i64, seconds_ago: Option<f64>) -> String {
    if let Some(seconds) = seconds_ago {
        if seconds < MINUTE {
            return "just now".to_string();
        }
        if seconds < HOUR {
            let minutes = (seconds / MINUTE) as i64;
            return format!("{minutes} min{} ago", plural(minutes));
        }
        if seconds < DAY {
            let hours = (seconds / HOUR) as i64;
            return format!("{hours} hour{} ago", plural(hours));
        }
        let days = (seconds / DAY) as i64;
        if days < 7 {
            return format!("{days} day{} ago", plural(days));
        }
    }

    let Some(date) = timestamp(time_millis) else {
        return "unknown".to_string();
    };
    let age_days = (Utc::now() - date).num_days();
    if age_days > 7 {
        date.format("%b %-d, %Y").to_string()
    } else if age_days >= 1 {
        format!("{age_days} day{} ago", plural(age_days))
    } else {
        let age_hours = (Utc::now() - date).num_hours();
        if age_hours >= 1 {
            format!("{age_hours} hour{} ago", plural(age_hours))
        } else {
            "just now".to_string()
        }
    }
}

/// Format a timestamp as an absolute date/time ("Jan 5, 2026 14:30:00")
pub fn format_absolute_time(time_millis: i64) -> String {
    timestamp(time_millis)
        .map(|date| date.format("%b %-d, %Y %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn timestamp(time_millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(time_millis)
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
