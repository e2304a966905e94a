//! # Checkout bridge public API
//!
//! [`CheckoutBridgeApi`] is the single entry point for processing checkout webhooks. It is created from a
//! [`BridgeOptions`] and any backend that implements [`crate::traits::OrderForwarder`]:
//!
//! ```rust,ignore
//! use checkout_bridge_engine::{BridgeOptions, CheckoutBridgeApi};
//! use utmify_tools::{UtmifyApi, UtmifyConfig};
//!
//! let utmify = UtmifyApi::new(UtmifyConfig::new_from_env_or_default())?;
//! let api = CheckoutBridgeApi::new(utmify, BridgeOptions::default().with_secret("whsec_..."));
//! let receipt = api.process_signed_event(&body_bytes, signature_header).await?;
//! ```
mod checkout_bridge_api;
mod errors;
mod options;

pub use checkout_bridge_api::CheckoutBridgeApi;
pub use errors::BridgeError;
pub use options::{BridgeOptions, DEFAULT_PLATFORM_TAG};
