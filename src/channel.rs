//! Delivery channel seam.
//!
//! An adapter delivers one text payload to one destination and reports a
//! [`SendResult`]. Transport, auth, and readiness handling live entirely
//! inside the adapter; the dispatch loop only sees success or failure.

use thiserror::Error;

/// Errors raised by a delivery adapter before or during a send.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel configuration error: {0}")]
    Config(String),
    #[error("send failed: {0}")]
    Send(String),
}

/// Outcome of one delivery attempt.
///
/// API-level rejections come back as `success: false` with the remote
/// error message; transport faults are a [`ChannelError`] instead.
#[derive(Debug, Clone)]
pub struct SendResult {
    pub success: bool,
    pub message_id: String,
    pub error: Option<String>,
}

/// A transport able to deliver one message to one destination.
pub trait DeliveryChannel {
    fn send(&self, destination: &str, message: &str) -> Result<SendResult, ChannelError>;
}
