//! # Field normalization
//!
//! Checkout Page events have no fixed schema. The normalizer projects whatever arrives onto the fixed set of fields
//! the order API needs, using the lookup table below. Each canonical field is taken from the first source key that
//! holds a usable value, and falls back to a default otherwise:
//!
//! | Canonical field        | Source keys                                       | Default                      |
//! |------------------------|---------------------------------------------------|------------------------------|
//! | order id               | `orderId`, `id`                                   | empty (fails validation)     |
//! | status                 | `status` (`paid` / `refunded`)                    | pending                      |
//! | created at             | `created_at`                                      | now                          |
//! | approved date          | `payment_confirmed_at` (paid orders only)         | now                          |
//! | payment method         | `paymentMethod`                                   | unknown                      |
//! | customer name          | `buyerName`                                       | `Cliente`                    |
//! | customer email/phone/ip| `buyerEmail` / `buyerPhone` / `buyerIp`           | empty                        |
//! | customer country       |                                                   | configured country           |
//! | product id / name      | `productId` / `productName`                       | `produto` / `Produto`        |
//! | quantity               | `quantity`                                        | 1                            |
//! | price in cents         | `priceInUsdCents`, `amountUsdCents`, `amount`×100 | 1 (never less than 1)        |
//! | tracking parameters    | `utm_*`, `src`, `sck`, or a `trackingParameters` object | omitted                |
//!
//! Everything else in the event is dropped.
mod inbound_event;

use chrono::{DateTime, Utc};
use cpb_common::Cents;
pub use inbound_event::{InboundEvent, WRAPPER_KEY};
use log::*;

use crate::{
    order_types::{Customer, OrderStatus, PaymentMethod, Product, TrackingParameters, TRACKING_KEYS},
    BridgeError,
};

pub const ORDER_ID_KEYS: [&str; 2] = ["orderId", "id"];
pub const CENTS_KEYS: [&str; 2] = ["priceInUsdCents", "amountUsdCents"];
pub const AMOUNT_KEY: &str = "amount";
pub const TRACKING_BLOCK_KEY: &str = "trackingParameters";

pub const DEFAULT_CUSTOMER_NAME: &str = "Cliente";
pub const DEFAULT_PRODUCT_ID: &str = "produto";
pub const DEFAULT_PRODUCT_NAME: &str = "Produto";
pub const DEFAULT_COUNTRY: &str = "AO";

/// The canonical field set extracted from an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFields {
    pub order_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub approved_date: Option<DateTime<Utc>>,
    pub payment_method: PaymentMethod,
    pub customer: Customer,
    pub product: Product,
    pub tracking: TrackingParameters,
}

impl NormalizedFields {
    /// Normalization never fails, but an order without an identifier must not be forwarded.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.order_id.trim().is_empty() {
            return Err(BridgeError::MissingOrderId);
        }
        Ok(())
    }

    pub fn price_in_cents(&self) -> Cents {
        self.product.price_in_cents
    }
}

#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    customer_country: String,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY)
    }
}

impl FieldNormalizer {
    pub fn new(customer_country: &str) -> Self {
        Self { customer_country: customer_country.to_string() }
    }

    /// Extracts the canonical fields from `event`. `now` is used wherever a timestamp is missing.
    pub fn normalize(&self, event: &InboundEvent, now: DateTime<Utc>) -> NormalizedFields {
        let order_id = event.text(&ORDER_ID_KEYS).unwrap_or_default();
        let status = event.raw_str("status").map(OrderStatus::from_vendor_term).unwrap_or_default();
        let created_at = event.timestamp("created_at").unwrap_or(now);
        let approved_date = match status {
            OrderStatus::Paid => Some(event.timestamp("payment_confirmed_at").unwrap_or(now)),
            _ => None,
        };
        let payment_method =
            event.text(&["paymentMethod"]).map(|s| PaymentMethod::from_vendor_term(&s)).unwrap_or_default();
        let customer = Customer {
            name: event.text(&["buyerName"]).unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string()),
            email: event.text(&["buyerEmail"]).unwrap_or_default(),
            phone: event.text(&["buyerPhone"]).unwrap_or_default(),
            country: self.customer_country.clone(),
            ip: event.text(&["buyerIp"]).unwrap_or_default(),
        };
        let product = Product {
            id: event.text(&["productId"]).unwrap_or_else(|| DEFAULT_PRODUCT_ID.to_string()),
            name: event.text(&["productName"]).unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
            quantity: quantity(event),
            price_in_cents: price_in_cents(event),
        };
        let tracking = tracking_parameters(event);
        let fields =
            NormalizedFields { order_id, status, created_at, approved_date, payment_method, customer, product, tracking };
        trace!("📨️ Normalized fields: {fields:?}");
        fields
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantity(event: &InboundEvent) -> u32 {
    event.number(&["quantity"]).map(|q| q.round().clamp(1.0, f64::from(u32::MAX)) as u32).unwrap_or(1)
}

/// Explicit cent amounts win over `amount`, which is in major units. The result is never below one cent.
fn price_in_cents(event: &InboundEvent) -> Cents {
    let from_cents = CENTS_KEYS
        .iter()
        .filter_map(|k| event.number(&[*k]))
        .filter_map(|v| Cents::try_from(v).ok())
        .find(Cents::is_positive);
    let cents = from_cents.or_else(|| event.number(&[AMOUNT_KEY]).and_then(|v| Cents::from_major_units(v).ok()));
    let cents = cents.unwrap_or_default();
    if cents == Cents::from(i64::MAX) {
        warn!("📨️ The order price is too large to represent. Reporting it as {cents}");
    }
    if !cents.is_positive() {
        debug!("📨️ Price {cents} is not positive. Clamping to 1¢");
    }
    cents.at_least_one()
}

fn tracking_parameters(event: &InboundEvent) -> TrackingParameters {
    let block = event.nested(TRACKING_BLOCK_KEY);
    let mut params = TrackingParameters::default();
    for key in TRACKING_KEYS {
        let value = event.text(&[key]).or_else(|| block.as_ref().and_then(|b| b.text(&[key])));
        if let Some(slot) = params.slot_mut(key) {
            *slot = value;
        }
    }
    params.without_blanks()
}
