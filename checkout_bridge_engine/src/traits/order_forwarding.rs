use log::*;
use thiserror::Error;
use utmify_tools::{OrderSubmission, UtmifyApi, UtmifyApiError};

use crate::order_types::NormalizedOrder;

#[derive(Debug, Clone, Error)]
pub enum ForwardingError {
    #[error("The order could not be sent. {0}")]
    Transport(String),
    #[error("The order could not be serialized. {0}")]
    Serialization(String),
}

impl From<UtmifyApiError> for ForwardingError {
    fn from(e: UtmifyApiError) -> Self {
        match e {
            UtmifyApiError::JsonError(s) => Self::Serialization(s),
            e => Self::Transport(e.to_string()),
        }
    }
}

/// The `OrderForwarder` trait hands a finished order to the downstream order API.
///
/// Implementations make a single attempt and report whatever the API answered, including non-2xx responses, as an
/// [`OrderSubmission`]. Only failures to complete the exchange at all are errors.
#[allow(async_fn_in_trait)]
pub trait OrderForwarder {
    async fn forward_order(&self, order: &NormalizedOrder) -> Result<OrderSubmission, ForwardingError>;
}

impl OrderForwarder for UtmifyApi {
    async fn forward_order(&self, order: &NormalizedOrder) -> Result<OrderSubmission, ForwardingError> {
        trace!("📤️ Forwarding order {} to {}", order.order_id, self.orders_url());
        let submission = self.submit_order(order).await?;
        Ok(submission)
    }
}
