//! # Pipeline seams
//!
//! The engine is agnostic about where finished orders go. Anything that implements [`OrderForwarder`] can be plugged
//! into [`crate::CheckoutBridgeApi`]; the production implementation is the UTMify client.
mod order_forwarding;

pub use order_forwarding::{ForwardingError, OrderForwarder};
