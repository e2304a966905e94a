use thiserror::Error;

use crate::traits::ForwardingError;

#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("The webhook payload could not be read. {0}")]
    InvalidPayload(String),
    #[error("The webhook payload does not contain an order identifier (orderId or id).")]
    MissingOrderId,
    #[error("The order API rejected the order with HTTP {status}. {message}")]
    Downstream { status: u16, message: String },
    #[error("Could not forward the order. {0}")]
    Forwarding(#[from] ForwardingError),
}

impl BridgeError {
    /// True for errors caused by the content of the webhook itself, as opposed to failures further down the line.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidSignature | Self::InvalidPayload(_) | Self::MissingOrderId)
    }
}
