//! WhatsApp announcement template for one job posting.

use crate::record::Record;

/// Render the group announcement for a record.
///
/// Pure and deterministic; every displayed field degrades to its own
/// placeholder when the page is half-filled.
pub fn format_message(record: &Record) -> String {
    let role = record.field_or("Role", "No Role");
    let startup = record.field_or("Startup", "No Startup");
    let location = record.field_or("Location", "No Location");
    let remote = record.field_or("Remote", "No Remote Info");
    let vertical = record.field_or("Vertical", "No Vertical Info");
    let summary = record.field_or("AI summary", "No AI Summary");
    let apply_url = record.field_or("Apply URL", "No Apply URL");

    format!(
        "📢 *Nueva oportunidad de trabajo*\n\n\
         - 🔹 *Rol:* {role}\n\n\
         - 🏢 *Startup:* {startup}\n\
         - 🌍 *Ubicación:* {location} ({remote})\n\
         - 📂 *Vertical:* {vertical}\n\
         - 🤖 *Resumen:* {summary}\n\n\
         - 📩 *Aplica aquí:* {apply_url}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Record {
        serde_json::from_value(json!({
            "id": "page-1",
            "properties": {
                "Role": { "type": "title", "title": [{ "text": { "content": "Backend Engineer" } }] },
                "Startup": { "type": "rich_text", "rich_text": [{ "text": { "content": "Acme" } }] },
                "Location": { "type": "rich_text", "rich_text": [{ "text": { "content": "Madrid" } }] },
                "Remote": { "type": "select", "select": { "name": "Hybrid" } },
                "Vertical": { "type": "select", "select": { "name": "Fintech" } },
                "AI summary": { "type": "rich_text", "rich_text": [{ "text": { "content": "Rust services" } }] },
                "Apply URL": { "type": "url", "url": "https://example.com/apply" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn includes_every_displayed_field() {
        let message = format_message(&full_record());
        for expected in [
            "Backend Engineer",
            "Acme",
            "Madrid",
            "Hybrid",
            "Fintech",
            "Rust services",
            "https://example.com/apply",
        ] {
            assert!(message.contains(expected), "missing {expected:?} in {message}");
        }
    }

    #[test]
    fn sparse_record_uses_placeholders() {
        let record: Record =
            serde_json::from_value(json!({ "id": "page-2", "properties": {} })).unwrap();
        let message = format_message(&record);
        for expected in [
            "No Role",
            "No Startup",
            "No Location",
            "No Remote Info",
            "No Vertical Info",
            "No AI Summary",
            "No Apply URL",
        ] {
            assert!(message.contains(expected), "missing {expected:?} in {message}");
        }
    }

    #[test]
    fn formatting_is_deterministic() {
        let record = full_record();
        assert_eq!(format_message(&record), format_message(&record));
    }
}
