//! Request handler definitions
//!
//! Define each route and its handler here.
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. The webhook handler's only slow step, the call to the order API,
//! is async, so a worker keeps serving other webhooks while it waits.
use actix_web::{get, guard, web, HttpRequest, HttpResponse, Responder};
use checkout_bridge_engine::{signature::SignatureVerifier, CheckoutBridgeApi, OrderForwarder};
use log::*;

use crate::{
    config::ProxyConfig,
    data_objects::JsonResponse,
    errors::ServerError,
    helpers::get_remote_ip,
    middleware::HmacMiddlewareFactory,
};

/// Checkout Page can be pointed at either of these.
pub const WEBHOOK_PATHS: [&str; 2] = ["/", "/webhook/checkout"];

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("👍️\n")
}

/// Registers every route. The webhook handler needs a `CheckoutBridgeApi<F>` and a [`ProxyConfig`] in the app data.
///
/// Web-actix cannot register generic handlers through the route attributes, so the webhook resource is built by hand.
pub fn register_routes<F>(cfg: &mut web::ServiceConfig, verifier: SignatureVerifier)
where F: OrderForwarder + 'static {
    cfg.service(health).service(
        web::resource(WEBHOOK_PATHS)
            .name("checkout_webhook")
            .guard(guard::Post())
            .to(checkout_webhook::<F>)
            .wrap(HmacMiddlewareFactory::new(verifier)),
    );
}

/// Receives a sale event. By the time this runs, the HMAC middleware has authenticated `body`.
pub async fn checkout_webhook<F: OrderForwarder>(
    req: HttpRequest,
    body: web::Bytes,
    api: web::Data<CheckoutBridgeApi<F>>,
    proxy: web::Data<ProxyConfig>,
) -> Result<HttpResponse, ServerError> {
    let peer = get_remote_ip(&req, proxy.use_x_forwarded_for, proxy.use_forwarded)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".into());
    info!("📨️ Received checkout webhook from {peer} ({} bytes)", body.len());
    trace!("📨️ Webhook body: {}", String::from_utf8_lossy(&body));
    let submission = api.process_event(&body).await.map_err(|e| {
        if e.is_client_error() {
            warn!("📨️ Rejected webhook from {peer}. {e}");
        }
        ServerError::from(e)
    })?;
    debug!("📨️ Order API answered: {submission}");
    Ok(HttpResponse::Ok().json(JsonResponse::success()))
}
