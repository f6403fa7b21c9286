//! Rendering pipeline
//!
//! Projects a fetched message into one of ten textual outputs for the CLI.
//! Rendering is total: the format is a closed enum, and every renderer
//! prints a literal placeholder for absent fields instead of failing.

mod email;
mod inbox;
mod links;
mod table;
mod time;

pub use email::render;
pub use inbox::format_inbox_table;
pub use links::{extract_links, Link};
pub use time::{format_absolute_time, format_time_ago};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The ten output formats of the message endpoint
///
/// `Full` and `Raw` are distinct API formats that render identically on our
/// side (lossless pretty-printed JSON). The default is `Text`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EmailFormat {
    Summary,
    #[default]
    Text,
    Textplain,
    Texthtml,
    Full,
    Raw,
    Headers,
    Smtplog,
    Links,
    Linksfull,
}

impl EmailFormat {
    pub const ALL: [EmailFormat; 10] = [
        EmailFormat::Summary,
        EmailFormat::Text,
        EmailFormat::Textplain,
        EmailFormat::Texthtml,
        EmailFormat::Full,
        EmailFormat::Raw,
        EmailFormat::Headers,
        EmailFormat::Smtplog,
        EmailFormat::Links,
        EmailFormat::Linksfull,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailFormat::Summary => "summary",
            EmailFormat::Text => "text",
            EmailFormat::Textplain => "textplain",
            EmailFormat::Texthtml => "texthtml",
            EmailFormat::Full => "full",
            EmailFormat::Raw => "raw",
            EmailFormat::Headers => "headers",
            EmailFormat::Smtplog => "smtplog",
            EmailFormat::Links => "links",
            EmailFormat::Linksfull => "linksfull",
        }
    }
}

impl fmt::Display for EmailFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmailFormat::ALL
            .iter()
            .find(|format| format.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let valid = EmailFormat::ALL
                    .iter()
                    .map(EmailFormat::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Error::validation(format!("invalid format \"{s}\", valid formats: {valid}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_ten_formats_parse() {
        for format in EmailFormat::ALL {
            assert_eq!(format.as_str().parse::<EmailFormat>().unwrap(), format);
        }
    }

    #[test]
    fn unknown_format_is_rejected_with_the_valid_list() {
        let err = "markdown".parse::<EmailFormat>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("markdown"));
        assert!(message.contains("summary"));
        assert!(message.contains("linksfull"));
    }

    #[test]
    fn default_format_is_text() {
        assert_eq!(EmailFormat::default(), EmailFormat::Text);
    }

    #[test]
    fn serde_names_are_lowercase() {
        assert_eq!(
            serde_json::to_value(EmailFormat::Linksfull).unwrap(),
            serde_json::Value::from("linksfull")
        );
        let format: EmailFormat = serde_json::from_value("smtplog".into()).unwrap();
        assert_eq!(format, EmailFormat::Smtplog);
    }
}
