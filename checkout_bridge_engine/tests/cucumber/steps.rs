use checkout_bridge_engine::{signature::calculate_signature, BridgeError};
use cucumber::{gherkin::Step, then, when};
use serde_json::Value;

use crate::cucumber::BridgeWorld;

fn body_of(step: &Step) -> String {
    step.docstring.as_ref().expect("This step needs a docstring body").trim().to_string()
}

async fn receive(world: &mut BridgeWorld, body: &str, signature: Option<&str>) {
    let result = world.api().process_signed_event(body.as_bytes(), signature).await;
    world.last_result = Some(result);
}

#[when(expr = "a webhook signed with {string} is received:")]
async fn signed_webhook(world: &mut BridgeWorld, secret: String, step: &Step) {
    let body = body_of(step);
    let signature = calculate_signature(&secret, body.as_bytes());
    receive(world, &body, Some(&signature)).await;
}

#[when(expr = "a webhook with signature header {string} is received:")]
async fn webhook_with_header(world: &mut BridgeWorld, header: String, step: &Step) {
    let body = body_of(step);
    receive(world, &body, Some(&header)).await;
}

#[when("an unsigned webhook is received:")]
async fn unsigned_webhook(world: &mut BridgeWorld, step: &Step) {
    let body = body_of(step);
    receive(world, &body, None).await;
}

#[when(expr = "a webhook is signed with {string} but its body is reformatted before delivery:")]
async fn reformatted_webhook(world: &mut BridgeWorld, secret: String, step: &Step) {
    let body = body_of(step);
    let signature = calculate_signature(&secret, body.as_bytes());
    let value = serde_json::from_str::<Value>(&body).expect("Scenario body is not JSON");
    let reformatted = serde_json::to_string_pretty(&value).expect("Could not reformat body");
    receive(world, &reformatted, Some(&signature)).await;
}

#[then("the webhook is accepted")]
async fn accepted(world: &mut BridgeWorld) {
    match &world.last_result {
        Some(Ok(_)) => {},
        Some(Err(e)) => panic!("Expected the webhook to be accepted, but it failed: {e}"),
        None => panic!("No webhook has been received yet"),
    }
}

#[then("the webhook is rejected for an invalid signature")]
async fn rejected_signature(world: &mut BridgeWorld) {
    let e = world.last_error();
    assert!(matches!(e, BridgeError::InvalidSignature), "was {e:?}");
}

#[then("the webhook is rejected for a missing order id")]
async fn rejected_order_id(world: &mut BridgeWorld) {
    let e = world.last_error();
    assert!(matches!(e, BridgeError::MissingOrderId), "was {e:?}");
}

#[then("the webhook is rejected for an unreadable body")]
async fn rejected_body(world: &mut BridgeWorld) {
    let e = world.last_error();
    assert!(matches!(e, BridgeError::InvalidPayload(_)), "was {e:?}");
}

#[then(expr = "the webhook fails downstream with HTTP {int} and message {string}")]
async fn failed_downstream(world: &mut BridgeWorld, expected_status: u16, expected_message: String) {
    match world.last_error() {
        BridgeError::Downstream { status, message } => {
            assert_eq!(*status, expected_status);
            assert_eq!(message, &expected_message);
        },
        e => panic!("Expected a downstream failure, got {e:?}"),
    }
}

#[then(expr = "{int} order(s) is/are forwarded")]
async fn forwarded_count(world: &mut BridgeWorld, count: usize) {
    assert_eq!(world.forwarded_orders().len(), count);
}

fn forwarded_field(world: &mut BridgeWorld, pointer: &str) -> Option<Value> {
    let orders = world.forwarded_orders();
    let order = orders.last().expect("No order was forwarded");
    let doc = serde_json::to_value(order).expect("Order does not serialize");
    doc.pointer(pointer).cloned()
}

#[then(expr = "the forwarded order has {string} equal to {string}")]
async fn field_is_string(world: &mut BridgeWorld, pointer: String, expected: String) {
    let value = forwarded_field(world, &pointer);
    assert_eq!(value, Some(Value::String(expected)), "at {pointer}");
}

#[then(expr = "the forwarded order has {string} equal to {int}")]
async fn field_is_int(world: &mut BridgeWorld, pointer: String, expected: i64) {
    let value = forwarded_field(world, &pointer);
    assert_eq!(value, Some(Value::from(expected)), "at {pointer}");
}

#[then(expr = "the forwarded order has no {string}")]
async fn field_is_absent(world: &mut BridgeWorld, pointer: String) {
    let value = forwarded_field(world, &pointer);
    assert_eq!(value, None, "at {pointer}");
}

#[then(expr = "the forwarded order has {int} tracking parameter(s)")]
async fn tracking_count(world: &mut BridgeWorld, count: usize) {
    let value = forwarded_field(world, "/trackingParameters").expect("No tracking parameters");
    let params = value.as_object().expect("Tracking parameters are not an object");
    assert!(params.values().all(|v| v.as_str().is_some_and(|s| !s.is_empty())), "Blank value in {params:?}");
    assert_eq!(params.len(), count);
}

#[then("the commission parts add up to the total")]
async fn commission_adds_up(world: &mut BridgeWorld) {
    let commission = forwarded_field(world, "/commission").expect("No commission block");
    let part = |k: &str| commission[k].as_i64().expect("Commission values must be integers");
    assert_eq!(part("gatewayFeeInCents") + part("userCommissionInCents"), part("totalPriceInCents"));
}
