//! # Webhook signatures
//!
//! Checkout Page signs every webhook with an HMAC-SHA256 of the request body, keyed with the shared webhook secret.
//! The signature travels in the `x-webhook-signature` header as
//!
//! ```text
//!    sha256={lowercase hex digest}
//! ```
//!
//! The digest covers the body *exactly as it was received*. Parsing the JSON and serializing it again changes
//! whitespace and key order, so signatures must always be checked against the raw bytes, before any parsing happens.
use cpb_common::Secret;
use hmac::{Hmac, Mac};
use log::*;
use sha2::Sha256;

pub const SIGNATURE_HEADER: &str = "x-webhook-signature";
pub const SIGNATURE_SCHEME: &str = "sha256=";

type HmacSha256 = Hmac<Sha256>;

/// Produces the header value a sender holding `secret` would attach to `raw`.
pub fn calculate_signature(secret: &str, raw: &[u8]) -> String {
    // HMAC accepts keys of any length, including zero.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 accepts keys of any length"),
    };
    mac.update(raw);
    format!("{SIGNATURE_SCHEME}{}", hex::encode(mac.finalize().into_bytes()))
}

/// Returns true iff `header` is the signature of `raw` under `secret`.
///
/// Without both a header and a (non-empty) secret there is nothing to authenticate against, so the result is `false`.
/// The header must be exactly `sha256=` followed by 64 lowercase hex digits.
pub fn verify_signature(raw: &[u8], header: Option<&str>, secret: Option<&str>) -> bool {
    let (Some(header), Some(secret)) = (header, secret.filter(|s| !s.is_empty())) else {
        return false;
    };
    let Some(digest) = header.strip_prefix(SIGNATURE_SCHEME) else {
        return false;
    };
    if !digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return false;
    }
    let Ok(expected) = hex::decode(digest) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(raw);
    // constant-time
    mac.verify_slice(&expected).is_ok()
}

/// The configured signature policy for incoming webhooks.
#[derive(Debug, Clone, Default)]
pub struct SignatureVerifier {
    secret: Option<Secret<String>>,
    required: bool,
}

impl SignatureVerifier {
    pub fn new(secret: Option<Secret<String>>, required: bool) -> Self {
        let secret = secret.filter(|s| !s.is_blank());
        if required && secret.is_none() {
            warn!("🔐️ Webhook signatures are required, but no secret is configured. Every webhook will be rejected.");
        }
        Self { secret, required }
    }

    /// A verifier that lets everything through.
    pub fn disabled() -> Self {
        Self { secret: None, required: false }
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn check(&self, raw: &[u8], header: Option<&str>) -> bool {
        if !self.required {
            trace!("🔐️ Signature checks are disabled. Allowing request.");
            return true;
        }
        let secret = self.secret.as_ref().map(|s| s.reveal().as_str());
        verify_signature(raw, header, secret)
    }
}
