use cpb_common::{Secret, DEFAULT_CURRENCY_CODE};

use crate::{commission::FeeRatio, normalizer::DEFAULT_COUNTRY};

pub const DEFAULT_PLATFORM_TAG: &str = "checkoutpage";

/// Everything that varies between deployments of the bridge. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    /// The value of the `platform` field on every forwarded order.
    pub platform_tag: String,
    /// Whether forwarded orders carry a commission block.
    pub include_commission: bool,
    /// If false, webhooks are accepted without a signature. **DANGER**
    pub require_signature: bool,
    pub webhook_secret: Option<Secret<String>>,
    pub fee_ratio: FeeRatio,
    pub currency: String,
    pub customer_country: String,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            platform_tag: DEFAULT_PLATFORM_TAG.to_string(),
            include_commission: true,
            require_signature: true,
            webhook_secret: None,
            fee_ratio: FeeRatio::default(),
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            customer_country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl BridgeOptions {
    pub fn with_secret(mut self, secret: &str) -> Self {
        self.webhook_secret = Some(Secret::new(secret.to_string()));
        self
    }

    pub fn with_platform_tag(mut self, tag: &str) -> Self {
        self.platform_tag = tag.to_string();
        self
    }

    pub fn without_commission(mut self) -> Self {
        self.include_commission = false;
        self
    }

    pub fn without_signature_checks(mut self) -> Self {
        self.require_signature = false;
        self
    }
}
