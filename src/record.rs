//! Record schema for job-posting pages pulled from the kanban store.
//!
//! Properties are operator-edited and frequently half-filled, so every
//! accessor here degrades to a caller-supplied default instead of failing.

use std::collections::HashMap;

use serde::Deserialize;

/// Name of the status column in the store.
///
/// The trailing space is part of the actual column name in the operator's
/// database and must not be trimmed.
pub const SEND_STATUS_KEY: &str = "Send Status ";

/// Status label that marks a record as eligible for delivery.
pub const STATUS_NOT_SENT: &str = "Not Sent";

/// Status labels this system writes back to the store.
///
/// The read side is an open set (operators can add labels); the write side
/// is closed to these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStatus {
    Sent,
    ErrorSending,
}

impl SendStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SendStatus::Sent => "Sent",
            SendStatus::ErrorSending => "Error Sending",
        }
    }
}

impl std::fmt::Display for SendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One job-posting page from the store.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

impl Record {
    /// Extract a property as display text, falling back to `default` when
    /// the field is absent, unset, or structurally malformed.
    pub fn field_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.properties
            .get(key)
            .and_then(PropertyValue::as_text)
            .unwrap_or(default)
    }

    /// Current send status label, or the empty string when unset.
    pub fn send_status(&self) -> &str {
        self.field_or(SEND_STATUS_KEY, "")
    }
}

/// A property value as the store serializes it, tagged by its `type` field.
///
/// Property types the notifier does not consume land in `Unsupported`
/// rather than failing the whole page.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<TextRun>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<TextRun>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    Status {
        #[serde(default)]
        status: Option<SelectOption>,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// The value as display text, or `None` when the underlying field is
    /// unset or empty.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Title { title } => first_run_text(title),
            PropertyValue::RichText { rich_text } => first_run_text(rich_text),
            PropertyValue::Select { select } => option_name(select),
            PropertyValue::Status { status } => option_name(status),
            PropertyValue::Url { url } => url.as_deref(),
            PropertyValue::Unsupported => None,
        }
    }
}

fn first_run_text(runs: &[TextRun]) -> Option<&str> {
    runs.first()?.text.as_ref()?.content.as_deref()
}

fn option_name(option: &Option<SelectOption>) -> Option<&str> {
    option.as_ref()?.name.as_deref()
}

/// One run of a title or rich-text property.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: Option<String>,
}

/// The chosen option of a select or status property.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(props: serde_json::Value) -> Record {
        serde_json::from_value(json!({ "id": "page-1", "properties": props })).unwrap()
    }

    #[test]
    fn title_returns_first_run_content() {
        let record = page(json!({
            "Role": {
                "id": "title",
                "type": "title",
                "title": [
                    { "type": "text", "text": { "content": "Engineer", "link": null }, "plain_text": "Engineer" },
                    { "type": "text", "text": { "content": "ignored" } }
                ]
            }
        }));
        assert_eq!(record.field_or("Role", "No Role"), "Engineer");
    }

    #[test]
    fn rich_text_empty_list_falls_back() {
        let record = page(json!({
            "Startup": { "type": "rich_text", "rich_text": [] }
        }));
        assert_eq!(record.field_or("Startup", "No Startup"), "No Startup");
    }

    #[test]
    fn run_without_text_content_falls_back() {
        let record = page(json!({
            "Startup": { "type": "rich_text", "rich_text": [{}] }
        }));
        assert_eq!(record.field_or("Startup", "No Startup"), "No Startup");
    }

    #[test]
    fn unset_select_falls_back() {
        let record = page(json!({
            "Remote": { "type": "select", "select": null }
        }));
        assert_eq!(record.field_or("Remote", "No Remote Info"), "No Remote Info");
    }

    #[test]
    fn status_returns_label() {
        let record = page(json!({
            "Send Status ": { "type": "status", "status": { "name": "Not Sent", "color": "red" } }
        }));
        assert_eq!(record.send_status(), "Not Sent");
    }

    #[test]
    fn send_status_empty_when_property_missing() {
        let record = page(json!({}));
        assert_eq!(record.send_status(), "");
    }

    #[test]
    fn null_url_falls_back() {
        let record = page(json!({
            "Apply URL": { "type": "url", "url": null }
        }));
        assert_eq!(record.field_or("Apply URL", "No Apply URL"), "No Apply URL");
    }

    #[test]
    fn url_passed_through() {
        let record = page(json!({
            "Apply URL": { "type": "url", "url": "https://example.com/jobs/1" }
        }));
        assert_eq!(
            record.field_or("Apply URL", "No Apply URL"),
            "https://example.com/jobs/1"
        );
    }

    #[test]
    fn unknown_property_type_falls_back() {
        let record = page(json!({
            "Headcount": { "type": "number", "number": 7 }
        }));
        assert_eq!(record.field_or("Headcount", "n/a"), "n/a");
    }

    #[test]
    fn missing_key_falls_back() {
        let record = page(json!({}));
        assert_eq!(record.field_or("Role", "No Role"), "No Role");
    }
}
