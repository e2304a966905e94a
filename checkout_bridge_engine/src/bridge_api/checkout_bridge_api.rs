use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::*;
use utmify_tools::OrderSubmission;

use crate::{
    assembler::assemble,
    bridge_api::{BridgeError, BridgeOptions},
    commission::compute_commission,
    normalizer::{FieldNormalizer, InboundEvent},
    order_types::NormalizedOrder,
    signature::SignatureVerifier,
    traits::OrderForwarder,
};

/// `CheckoutBridgeApi` runs the whole webhook pipeline:
///
/// authenticate → parse → normalize → validate → commission → assemble → forward.
///
/// Every step before forwarding is pure. The only suspend point is the call to the [`OrderForwarder`].
pub struct CheckoutBridgeApi<F> {
    forwarder: F,
    options: BridgeOptions,
    normalizer: FieldNormalizer,
    verifier: SignatureVerifier,
}

impl<F> Debug for CheckoutBridgeApi<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutBridgeApi ({:?})", self.options)
    }
}

impl<F> CheckoutBridgeApi<F> {
    pub fn new(forwarder: F, options: BridgeOptions) -> Self {
        let normalizer = FieldNormalizer::new(&options.customer_country);
        let verifier = SignatureVerifier::new(options.webhook_secret.clone(), options.require_signature);
        Self { forwarder, options, normalizer, verifier }
    }

    pub fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }

    pub fn forwarder(&self) -> &F {
        &self.forwarder
    }

    /// Checks the signature header against the exact bytes that were received.
    pub fn authenticate(&self, raw: &[u8], signature: Option<&str>) -> Result<(), BridgeError> {
        if self.verifier.check(raw, signature) {
            Ok(())
        } else {
            warn!("🔐️ Invalid webhook signature. Rejecting event.");
            Err(BridgeError::InvalidSignature)
        }
    }

    /// Turns a raw webhook body into the order document, without sending it anywhere.
    pub fn prepare_order(&self, raw: &[u8]) -> Result<NormalizedOrder, BridgeError> {
        self.prepare_order_at(raw, Utc::now())
    }

    pub fn prepare_order_at(&self, raw: &[u8], now: DateTime<Utc>) -> Result<NormalizedOrder, BridgeError> {
        let event = InboundEvent::from_slice(raw)?;
        let fields = self.normalizer.normalize(&event, now);
        fields.validate()?;
        let commission = self
            .options
            .include_commission
            .then(|| compute_commission(fields.price_in_cents(), self.options.fee_ratio, &self.options.currency));
        let order = assemble(fields, commission, &self.options.platform_tag);
        debug!("📦️ Prepared order: {order}");
        Ok(order)
    }
}

impl<F> CheckoutBridgeApi<F>
where F: OrderForwarder
{
    /// Prepares the order in `raw` and forwards it. The body must already have been authenticated; see
    /// [`Self::process_signed_event`] to do both.
    pub async fn process_event(&self, raw: &[u8]) -> Result<OrderSubmission, BridgeError> {
        let order = self.prepare_order(raw)?;
        self.forward(&order).await
    }

    pub async fn process_signed_event(
        &self,
        raw: &[u8],
        signature: Option<&str>,
    ) -> Result<OrderSubmission, BridgeError> {
        self.authenticate(raw, signature)?;
        self.process_event(raw).await
    }

    /// Sends the order downstream. Non-2xx answers become [`BridgeError::Downstream`].
    pub async fn forward(&self, order: &NormalizedOrder) -> Result<OrderSubmission, BridgeError> {
        let submission = self.forwarder.forward_order(order).await.map_err(|e| {
            error!("📤️ Could not forward order {}. {e}", order.order_id);
            BridgeError::from(e)
        })?;
        if submission.is_success() {
            info!("📤️ Order {} forwarded. HTTP {}", order.order_id, submission.status);
            Ok(submission)
        } else {
            error!("📤️ Order {} was rejected downstream. {submission}", order.order_id);
            Err(BridgeError::Downstream { status: submission.status, message: submission.body })
        }
    }
}
