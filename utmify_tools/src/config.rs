use std::time::Duration;

use cpb_common::Secret;
use log::*;

pub const DEFAULT_UTMIFY_ORDERS_URL: &str = "https://api.utmify.com.br/api-credentials/orders";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct UtmifyConfig {
    /// The full URL of the order-ingestion endpoint.
    pub orders_url: String,
    pub api_token: Secret<String>,
    /// Upper bound on the duration of a single submission.
    pub timeout: Duration,
}

impl Default for UtmifyConfig {
    fn default() -> Self {
        Self {
            orders_url: DEFAULT_UTMIFY_ORDERS_URL.to_string(),
            api_token: Secret::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl UtmifyConfig {
    pub fn new(orders_url: &str, api_token: &str) -> Self {
        Self { orders_url: orders_url.to_string(), api_token: Secret::new(api_token.to_string()), ..Default::default() }
    }

    pub fn new_from_env_or_default() -> Self {
        let orders_url = std::env::var("CPB_UTMIFY_API_URL").unwrap_or_else(|_| {
            debug!("CPB_UTMIFY_API_URL not set, using {DEFAULT_UTMIFY_ORDERS_URL}");
            DEFAULT_UTMIFY_ORDERS_URL.to_string()
        });
        let api_token = Secret::new(std::env::var("CPB_UTMIFY_API_TOKEN").unwrap_or_else(|_| {
            warn!("CPB_UTMIFY_API_TOKEN not set. Order submissions will be rejected by UTMify.");
            String::default()
        }));
        let timeout = std::env::var("CPB_UTMIFY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("Invalid value for CPB_UTMIFY_TIMEOUT_SECS ({s}). {e}. Using the default."))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        Self { orders_url, api_token, timeout }
    }
}
