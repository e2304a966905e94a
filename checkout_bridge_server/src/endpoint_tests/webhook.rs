use actix_web::http::StatusCode;
use checkout_bridge_engine::{
    order_types::PaymentMethod,
    signature::calculate_signature,
    BridgeOptions,
    ForwardingError,
    NormalizedOrder,
};
use cpb_common::Cents;
use utmify_tools::OrderSubmission;

use super::{
    helpers::{configure_bridge, post_request},
    mocks::MockForwarder,
};

const SECRET: &str = "whsec_endpoint_tests";
const BODY: &str = r#"{"orderId":"A1","amount":19.999,"paymentMethod":"card","utm_source":"google"}"#;

fn options() -> BridgeOptions {
    BridgeOptions::default().with_secret(SECRET)
}

fn sign(body: &str) -> String {
    calculate_signature(SECRET, body.as_bytes())
}

fn accepting_forwarder() -> MockForwarder {
    let mut forwarder = MockForwarder::new();
    forwarder
        .expect_forward_order()
        .times(1)
        .withf(|order: &NormalizedOrder| {
            order.order_id == "A1" &&
                order.payment_method == PaymentMethod::CreditCard &&
                order.products[0].price_in_cents == Cents::from(2000) &&
                order.commission.as_ref().map(|c| c.gateway_fee_in_cents) == Some(Cents::from(140))
        })
        .returning(|_| Ok(OrderSubmission::new(200, r#"{"OK":true}"#)));
    forwarder
}

fn silent_forwarder() -> MockForwarder {
    let mut forwarder = MockForwarder::new();
    forwarder.expect_forward_order().never();
    forwarder
}

#[actix_web::test]
async fn signed_webhook_is_forwarded() {
    let _ = env_logger::try_init().ok();
    for path in ["/", "/webhook/checkout"] {
        let configure = configure_bridge(accepting_forwarder(), options());
        let (status, body) = post_request(path, BODY, Some(&sign(BODY)), configure).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(body, r#"{"success":true}"#);
    }
}

#[actix_web::test]
async fn invalid_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let configure = configure_bridge(silent_forwarder(), options());
    let (status, body) = post_request("/", BODY, Some("sha256=00"), configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid signature"}"#);
}

#[actix_web::test]
async fn missing_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let configure = configure_bridge(silent_forwarder(), options());
    let (status, body) = post_request("/webhook/checkout", BODY, None, configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, r#"{"error":"Invalid signature"}"#);
}

#[actix_web::test]
async fn signature_over_a_different_body_is_rejected() {
    let _ = env_logger::try_init().ok();
    let configure = configure_bridge(silent_forwarder(), options());
    let tampered = BODY.replace("19.999", "0.01");
    let (status, _) = post_request("/", &tampered, Some(&sign(BODY)), configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn without_a_secret_every_webhook_is_rejected() {
    let _ = env_logger::try_init().ok();
    let configure = configure_bridge(silent_forwarder(), BridgeOptions::default());
    let (status, _) = post_request("/", BODY, Some(&calculate_signature("", BODY.as_bytes())), configure).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_order_id() {
    let _ = env_logger::try_init().ok();
    let configure = configure_bridge(silent_forwarder(), options());
    let body = r#"{"amount":10,"buyerName":"Ana"}"#;
    let (status, body) = post_request("/", body, Some(&sign(body)), configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("order identifier"), "{body}");
}

#[actix_web::test]
async fn unreadable_body() {
    let _ = env_logger::try_init().ok();
    let configure = configure_bridge(silent_forwarder(), options());
    let body = "{orderId: A1";
    let (status, body) = post_request("/", body, Some(&sign(body)), configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with(r#"{"error":"Could not read request body: "#), "{body}");
}

#[actix_web::test]
async fn downstream_rejection_is_passed_on() {
    let _ = env_logger::try_init().ok();
    let mut forwarder = MockForwarder::new();
    forwarder.expect_forward_order().times(1).returning(|_| Ok(OrderSubmission::new(503, "upstream down")));
    let configure = configure_bridge(forwarder, options());
    let (status, body) = post_request("/", BODY, Some(&sign(BODY)), configure).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"upstream down"}"#);
}

#[actix_web::test]
async fn transport_failure_is_an_internal_error() {
    let _ = env_logger::try_init().ok();
    let mut forwarder = MockForwarder::new();
    forwarder
        .expect_forward_order()
        .times(1)
        .returning(|_| Err(ForwardingError::Transport("error sending request".into())));
    let configure = configure_bridge(forwarder, options());
    let (status, body) = post_request("/", BODY, Some(&sign(BODY)), configure).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Internal error"}"#);
}

#[actix_web::test]
async fn unsigned_webhooks_pass_when_checks_are_disabled() {
    let _ = env_logger::try_init().ok();
    let configure = configure_bridge(accepting_forwarder(), BridgeOptions::default().without_signature_checks());
    let (status, body) = post_request("/", BODY, None, configure).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"success":true}"#);
}

#[actix_web::test]
async fn other_methods_are_not_routed() {
    let _ = env_logger::try_init().ok();
    let configure = configure_bridge(silent_forwarder(), options());
    let app = actix_web::test::init_service(actix_web::App::new().configure(configure)).await;
    let req = actix_web::test::TestRequest::get().uri("/webhook/checkout").to_request();
    let res = actix_web::test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
