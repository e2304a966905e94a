//! The canonical order document sent to the order-ingestion API.
//!
//! Field names follow the downstream schema (camelCase), which is why the structs here carry `serde(rename_all)`
//! attributes rather than using Rust naming on the wire.
use std::fmt::Display;

use chrono::{DateTime, SecondsFormat, Utc};
use cpb_common::Cents;
use serde::{Deserialize, Serialize, Serializer};

//--------------------------------------   PaymentMethod   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    CreditCard,
    Boleto,
    Paypal,
    #[default]
    Unknown,
}

impl PaymentMethod {
    /// Maps the checkout provider's payment vocabulary onto ours. Anything unrecognised is `Unknown`.
    pub fn from_vendor_term(term: &str) -> Self {
        match term.trim().to_ascii_lowercase().as_str() {
            "pix" => Self::Pix,
            "credit_card" | "card" => Self::CreditCard,
            "boleto" => Self::Boleto,
            "paypal" => Self::Paypal,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pix => "pix",
            Self::CreditCard => "credit_card",
            Self::Boleto => "boleto",
            Self::Paypal => "paypal",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//--------------------------------------    OrderStatus    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Paid,
    #[default]
    Pending,
    Refunded,
}

impl OrderStatus {
    /// Only the exact strings `paid` and `refunded` are recognised. Everything else is pending.
    pub fn from_vendor_term(term: &str) -> Self {
        match term {
            "paid" => Self::Paid,
            "refunded" => Self::Refunded,
            _ => Self::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Refunded => "refunded",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//--------------------------------------      Customer      ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub ip: String,
}

//--------------------------------------      Product       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price_in_cents: Cents,
}

//--------------------------------------  TrackingParameters ------------------------------------------------------
/// Campaign attribution. Keys without a value are left out of the serialized document entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sck: Option<String>,
}

pub const TRACKING_KEYS: [&str; 7] = ["utm_source", "utm_medium", "utm_campaign", "utm_content", "utm_term", "src", "sck"];

impl TrackingParameters {
    pub fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "utm_source" => Some(&mut self.utm_source),
            "utm_medium" => Some(&mut self.utm_medium),
            "utm_campaign" => Some(&mut self.utm_campaign),
            "utm_content" => Some(&mut self.utm_content),
            "utm_term" => Some(&mut self.utm_term),
            "src" => Some(&mut self.src),
            "sck" => Some(&mut self.sck),
            _ => None,
        }
    }

    /// Drops any entry whose value is empty or only whitespace.
    pub fn without_blanks(mut self) -> Self {
        for key in TRACKING_KEYS {
            if let Some(slot) = self.slot_mut(key) {
                if slot.as_deref().is_some_and(|v| v.trim().is_empty()) {
                    *slot = None;
                }
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clone().without_blanks() == Self::default()
    }
}

//--------------------------------------     Commission     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    pub total_price_in_cents: Cents,
    pub gateway_fee_in_cents: Cents,
    pub user_commission_in_cents: Cents,
    pub currency: String,
}

//--------------------------------------  NormalizedOrder   ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOrder {
    pub order_id: String,
    pub platform: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[serde(serialize_with = "iso_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "optional_iso_timestamp", skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<DateTime<Utc>>,
    pub customer: Customer,
    pub products: Vec<Product>,
    pub tracking_parameters: TrackingParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<Commission>,
}

impl Display for NormalizedOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total: Cents = self.products.iter().map(|p| p.price_in_cents).sum();
        write!(
            f,
            "Order [{}] {} via {} ({}) for {total}, created {}",
            self.order_id,
            self.status,
            self.payment_method,
            self.platform,
            format_iso(&self.created_at)
        )
    }
}

/// Formats a timestamp the way JavaScript's `Date.toISOString` does, e.g. `2024-05-01T12:00:00.000Z`.
pub fn format_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn iso_timestamp<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_iso(ts))
}

fn optional_iso_timestamp<S: Serializer>(ts: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => iso_timestamp(ts, s),
        None => s.serialize_none(),
    }
}
