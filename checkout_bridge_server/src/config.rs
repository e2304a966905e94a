//! Server configuration.
//!
//! Everything is read from `CPB_*` environment variables once, at startup. Invalid values are logged and replaced
//! with their defaults, so the server always starts; a missing webhook secret or API token is loudly reported, but
//! the resulting server will simply reject webhooks or have its submissions refused.
use std::env;

use checkout_bridge_engine::{commission::FeeRatio, BridgeOptions, DEFAULT_PLATFORM_TAG};
use cpb_common::{parse_boolean_flag, Secret, DEFAULT_CURRENCY_CODE};
use log::*;
use utmify_tools::UtmifyConfig;

const DEFAULT_CPB_HOST: &str = "0.0.0.0";
const DEFAULT_CPB_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of HTTP workers. `None` lets actix pick one per physical core.
    pub workers: Option<usize>,
    /// If true, the X-Forwarded-For header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_x_forwarded_for: bool,
    /// If true, the Forwarded header will be used to determine the client's IP address.
    pub use_forwarded: bool,
    pub bridge: BridgeOptions,
    pub utmify: UtmifyConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CPB_HOST.to_string(),
            port: DEFAULT_CPB_PORT,
            workers: None,
            use_x_forwarded_for: false,
            use_forwarded: false,
            bridge: BridgeOptions::default(),
            utmify: UtmifyConfig::default(),
        }
    }
}

/// The subset of the configuration the request handlers need to work out who is calling.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProxyConfig {
    pub use_x_forwarded_for: bool,
    pub use_forwarded: bool,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let mut config = Self::from_lookup(|name| env::var(name).ok());
        config.utmify = UtmifyConfig::new_from_env_or_default();
        config
    }

    /// Builds everything except the UTMify client settings from `var`, which maps a variable name to its value.
    pub fn from_lookup<F>(var: F) -> Self
    where F: Fn(&str) -> Option<String> {
        let host = non_blank(var("CPB_HOST")).unwrap_or_else(|| DEFAULT_CPB_HOST.into());
        let port = configure_port(&var);
        let workers = non_blank(var("CPB_WORKERS")).and_then(|s| {
            s.parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .or_else(|| {
                    warn!("🪛️ {s} is not a valid worker count for CPB_WORKERS. Using the actix default.");
                    None
                })
        });
        let use_x_forwarded_for = parse_boolean_flag(var("CPB_USE_X_FORWARDED_FOR"), false);
        let use_forwarded = parse_boolean_flag(var("CPB_USE_FORWARDED"), false);
        let bridge = configure_bridge(&var);
        Self { host, port, workers, use_x_forwarded_for, use_forwarded, bridge, utmify: UtmifyConfig::default() }
    }

    pub fn proxy_config(&self) -> ProxyConfig {
        ProxyConfig { use_x_forwarded_for: self.use_x_forwarded_for, use_forwarded: self.use_forwarded }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// `CPB_PORT` wins over `PORT`, which is what most hosting platforms set.
fn configure_port<F>(var: &F) -> u16
where F: Fn(&str) -> Option<String> {
    let Some((name, value)) = ["CPB_PORT", "PORT"].into_iter().find_map(|name| non_blank(var(name)).map(|v| (name, v)))
    else {
        return DEFAULT_CPB_PORT;
    };
    value.parse::<u16>().unwrap_or_else(|e| {
        error!("🪛️ {value} is not a valid port for {name}. {e} Using the default, {DEFAULT_CPB_PORT}, instead.");
        DEFAULT_CPB_PORT
    })
}

fn configure_bridge<F>(var: &F) -> BridgeOptions
where F: Fn(&str) -> Option<String> {
    let require_signature = parse_boolean_flag(var("CPB_REQUIRE_SIGNATURE"), true);
    let webhook_secret = non_blank(var("CPB_WEBHOOK_SECRET")).map(Secret::new);
    match (require_signature, &webhook_secret) {
        (true, None) => error!(
            "🪛️ CPB_WEBHOOK_SECRET is not set. Please set it to the webhook secret from your Checkout Page dashboard. \
             Until then, every webhook will be rejected."
        ),
        (false, _) => warn!(
            "🚨️🚨️🚨️ Webhook signature checks are DISABLED. Anyone can submit orders through this server. Set \
             CPB_REQUIRE_SIGNATURE=true in production. 🚨️🚨️🚨️"
        ),
        (true, Some(_)) => info!("🪛️ Webhook signature checks are enabled."),
    }
    let platform_tag = non_blank(var("CPB_PLATFORM_TAG")).unwrap_or_else(|| DEFAULT_PLATFORM_TAG.into());
    let include_commission = parse_boolean_flag(var("CPB_INCLUDE_COMMISSION"), true);
    let fee_ratio = non_blank(var("CPB_FEE_RATIO"))
        .and_then(|s| {
            s.parse::<FeeRatio>()
                .map_err(|e| warn!("🪛️ Invalid configuration value for CPB_FEE_RATIO. {e}. Using the default."))
                .ok()
        })
        .unwrap_or_default();
    let currency = non_blank(var("CPB_CURRENCY")).unwrap_or_else(|| DEFAULT_CURRENCY_CODE.into());
    let defaults = BridgeOptions::default();
    let customer_country = non_blank(var("CPB_CUSTOMER_COUNTRY")).unwrap_or(defaults.customer_country);
    info!(
        "🪛️ Orders will be tagged '{platform_tag}'. Commission reporting: {include_commission} (fee ratio \
         {fee_ratio}, {currency}). Customer country: {customer_country}"
    );
    BridgeOptions {
        platform_tag,
        include_commission,
        require_signature,
        webhook_secret,
        fee_ratio,
        currency,
        customer_country,
    }
}
