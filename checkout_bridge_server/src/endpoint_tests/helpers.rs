use actix_web::{
    body::MessageBody,
    http::{header::ContentType, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use checkout_bridge_engine::{signature::SIGNATURE_HEADER, BridgeOptions, CheckoutBridgeApi, OrderForwarder};
use log::debug;

use crate::{config::ProxyConfig, routes::register_routes};

/// Wires up the webhook routes around a bridge that forwards through `forwarder`.
pub fn configure_bridge<F>(forwarder: F, options: BridgeOptions) -> impl FnOnce(&mut ServiceConfig)
where F: OrderForwarder + 'static {
    let api = CheckoutBridgeApi::new(forwarder, options);
    let verifier = api.verifier().clone();
    move |cfg| {
        cfg.app_data(web::Data::new(api)).app_data(web::Data::new(ProxyConfig::default()));
        register_routes::<F>(cfg, verifier);
    }
}

/// POSTs `body` to `path` and returns the status and body of the response, whether it came from the handler or
/// from a middleware error.
pub async fn post_request<C>(path: &str, body: &str, signature: Option<&str>, configure: C) -> (StatusCode, String)
where C: FnOnce(&mut ServiceConfig) {
    let mut req = TestRequest::post().uri(path).insert_header(ContentType::json()).set_payload(body.to_string());
    if let Some(signature) = signature {
        req = req.insert_header((SIGNATURE_HEADER, signature));
    }
    let app = test::init_service(App::new().configure(configure)).await;
    debug!("Making request");
    match test::try_call_service(&app, req.to_request()).await {
        Ok(res) => {
            let status = res.status();
            let body = test::read_body(res).await;
            (status, String::from_utf8_lossy(&body).into_owned())
        },
        Err(e) => {
            let res = e.error_response();
            let status = res.status();
            let body = res.into_body().try_into_bytes().unwrap_or_default();
            (status, String::from_utf8_lossy(&body).into_owned())
        },
    }
}
