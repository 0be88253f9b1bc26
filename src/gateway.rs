//! Outbound messaging seam. The chat transport implements this; the rest of
//! the crate only ever sends plain text. Inbound events reach the engine
//! through `handler::Handler::{on_command, on_text, on_photo}`.

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::model::UserId;

#[async_trait]
pub trait MessagingGateway: Send + Sync {
    async fn send_text(&self, user: &UserId, text: &str) -> Result<(), DeliveryError>;
}
