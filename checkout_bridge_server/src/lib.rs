//! # Checkout bridge server
//! This crate hosts the HTTP shell around the [`checkout_bridge_engine`]. It is responsible for:
//! Listening for incoming webhook requests from Checkout Page.
//! Rejecting any request whose body does not carry a valid HMAC signature.
//! Handing the authenticated body to the engine, which normalizes it and forwards the order to UTMify.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/` and `/webhook/checkout` (POST): The webhook routes for receiving sale events from Checkout Page.

pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;

pub mod helpers;
pub mod middleware;
pub mod routes;
pub mod server;
