use cucumber::given;
use utmify_tools::OrderSubmission;

use crate::cucumber::BridgeWorld;

#[given(expr = "a bridge with webhook secret {string}")]
async fn bridge_with_secret(world: &mut BridgeWorld, secret: String) {
    world.options = world.options.clone().with_secret(&secret);
}

#[given("a bridge without a webhook secret")]
async fn bridge_without_secret(world: &mut BridgeWorld) {
    world.options.webhook_secret = None;
}

#[given("signature checks are disabled")]
async fn signature_checks_disabled(world: &mut BridgeWorld) {
    world.options = world.options.clone().without_signature_checks();
}

#[given("commission reporting is disabled")]
async fn commission_disabled(world: &mut BridgeWorld) {
    world.options = world.options.clone().without_commission();
}

#[given(expr = "the platform tag is {string}")]
async fn platform_tag(world: &mut BridgeWorld, tag: String) {
    world.options = world.options.clone().with_platform_tag(&tag);
}

#[given(expr = "the fee ratio is {string}")]
async fn fee_ratio(world: &mut BridgeWorld, ratio: String) {
    world.options.fee_ratio = ratio.parse().expect("Invalid fee ratio in scenario");
}

#[given(expr = "the currency is {string}")]
async fn currency(world: &mut BridgeWorld, code: String) {
    world.options.currency = code;
}

#[given(expr = "the order API responds with HTTP {int} and body {string}")]
async fn downstream_response(world: &mut BridgeWorld, status: u16, body: String) {
    world.downstream = Some(OrderSubmission::new(status, body));
}
