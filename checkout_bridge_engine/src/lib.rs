//! Checkout Bridge Engine
//!
//! The engine takes checkout webhooks from Checkout Page and turns them into orders for the UTMify order API. It is
//! transport-agnostic: the HTTP server hands it raw request bodies and signature headers, and it hands finished orders
//! to an [`OrderForwarder`].
//!
//! The pipeline is built from four pure components:
//! 1. [`signature`] authenticates the raw body against the shared webhook secret.
//! 2. [`normalizer`] projects the loosely-typed event onto a fixed set of fields, filling in defaults.
//! 3. [`commission`] splits the order total into a gateway fee and the user's commission.
//! 4. [`assembler`] builds the final [`NormalizedOrder`] document.
//!
//! [`CheckoutBridgeApi`] strings them together and calls the forwarder.
pub mod assembler;
mod bridge_api;
pub mod commission;
pub mod normalizer;
pub mod order_types;
pub mod signature;
pub mod traits;

pub use bridge_api::{BridgeError, BridgeOptions, CheckoutBridgeApi, DEFAULT_PLATFORM_TAG};
pub use order_types::NormalizedOrder;
pub use traits::{ForwardingError, OrderForwarder};
