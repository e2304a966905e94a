//! # UTMify tools
//!
//! A thin client for the UTMify order-ingestion API. Orders are posted as JSON with the account's API token in the
//! `x-api-token` header. The client makes exactly one request per call and never retries; what to do with a failed
//! submission is up to the caller.
mod api;
mod config;
mod error;

mod data_objects;

pub use api::{UtmifyApi, API_TOKEN_HEADER};
pub use config::{UtmifyConfig, DEFAULT_UTMIFY_ORDERS_URL};
pub use data_objects::OrderSubmission;
pub use error::UtmifyApiError;
