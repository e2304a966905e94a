use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde::Serialize;

use crate::{config::UtmifyConfig, OrderSubmission, UtmifyApiError};

pub const API_TOKEN_HEADER: &str = "x-api-token";

#[derive(Clone)]
pub struct UtmifyApi {
    config: UtmifyConfig,
    client: Arc<Client>,
}

impl UtmifyApi {
    pub fn new(config: UtmifyConfig) -> Result<Self, UtmifyApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let mut val = HeaderValue::from_str(config.api_token.reveal().as_str())
            .map_err(|e| UtmifyApiError::Initialization(format!("The API token is not a valid header value. {e}")))?;
        val.set_sensitive(true);
        headers.insert(API_TOKEN_HEADER, val);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| UtmifyApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn orders_url(&self) -> &str {
        self.config.orders_url.as_str()
    }

    /// Posts `order` to the ingestion endpoint. Non-2xx responses are returned as an `OrderSubmission` so that the
    /// caller can surface the response body.
    pub async fn submit_order<T: Serialize>(&self, order: &T) -> Result<OrderSubmission, UtmifyApiError> {
        let body = serde_json::to_vec(order).map_err(|e| UtmifyApiError::JsonError(e.to_string()))?;
        trace!("Submitting order to {}", self.orders_url());
        let response = self
            .client
            .post(self.orders_url())
            .body(body)
            .send()
            .await
            .map_err(|e| UtmifyApiError::RestRequestError(e.without_url().to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| UtmifyApiError::RestResponseError(e.to_string()))?;
        if (200..300).contains(&status) {
            debug!("Order accepted by UTMify. HTTP {status}");
        } else {
            warn!("UTMify rejected the order. HTTP {status}: {body}");
        }
        Ok(OrderSubmission { status, body })
    }
}

impl std::fmt::Debug for UtmifyApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UtmifyApi ({})", self.config.orders_url)
    }
}
