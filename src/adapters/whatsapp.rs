//! WhatsApp adapter for outbound messages via the Meta Cloud API.

use serde::Serialize;

use crate::channel::{ChannelError, DeliveryChannel, SendResult};

const DEFAULT_API_BASE: &str = "https://graph.facebook.com";

/// Sends text messages via the WhatsApp Cloud API.
#[derive(Debug, Clone)]
pub struct WhatsAppChannel {
    access_token: String,
    phone_number_id: String,
    api_base: String,
}

impl WhatsAppChannel {
    pub fn new(access_token: String, phone_number_id: String) -> Self {
        Self {
            access_token,
            phone_number_id,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Point the adapter at a different API host (used by tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/v17.0/{}/messages", self.api_base, self.phone_number_id)
    }
}

impl DeliveryChannel for WhatsAppChannel {
    fn send(&self, destination: &str, message: &str) -> Result<SendResult, ChannelError> {
        let to = destination.trim();
        if to.is_empty() {
            return Err(ChannelError::Config(
                "no destination specified for WhatsApp message".to_string(),
            ));
        }

        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            recipient_type: "individual",
            to,
            message_type: "text",
            text: TextBody { body: message },
        };

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(self.api_url())
            .header("Authorization", format!("Bearer {}", self.access_token))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .map_err(|e| ChannelError::Send(e.to_string()))?;

        let status = response.status();
        let body: serde_json::Value = response
            .json()
            .map_err(|e| ChannelError::Send(e.to_string()))?;

        if status.is_success() {
            let message_id = body["messages"][0]["id"]
                .as_str()
                .unwrap_or("")
                .to_string();
            Ok(SendResult {
                success: true,
                message_id,
                error: None,
            })
        } else {
            let error_msg = body["error"]["message"]
                .as_str()
                .unwrap_or("Unknown error")
                .to_string();
            Ok(SendResult {
                success: false,
                message_id: String::new(),
                error: Some(error_msg),
            })
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'a str,
    recipient_type: &'a str,
    to: &'a str,
    #[serde(rename = "type")]
    message_type: &'a str,
    text: TextBody<'a>,
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_destination_is_a_config_error() {
        let channel = WhatsAppChannel::new("token".to_string(), "123".to_string());
        let result = channel.send("  ", "hello");
        assert!(matches!(result, Err(ChannelError::Config(_))));
    }

    #[test]
    fn api_url_respects_base_override() {
        let channel = WhatsAppChannel::new("token".to_string(), "123".to_string())
            .with_api_base("http://127.0.0.1:9009/");
        assert_eq!(channel.api_url(), "http://127.0.0.1:9009/v17.0/123/messages");
    }
}
