//! HMAC middleware for Actix Web.
//!
//! This module provides a middleware for Actix Web that checks the HMAC signature of incoming webhooks.
//!
//! Checkout Page sends an HMAC-SHA256 signature of the request body in the `x-webhook-signature` header, using the
//! webhook secret (`CPB_WEBHOOK_SECRET`) as the key. See [`checkout_bridge_engine::signature`] for the format.
//!
//! The middleware buffers the body, verifies it, and then puts the very same bytes back into the request so that the
//! handler sees exactly what was signed. Requests that fail the check never reach the handler.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_http::h1;
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    web,
    Error,
};
use checkout_bridge_engine::signature::{SignatureVerifier, SIGNATURE_HEADER};
use futures::future::LocalBoxFuture;
use log::{trace, warn};

use crate::errors::ServerError;

pub struct HmacMiddlewareFactory {
    verifier: Rc<SignatureVerifier>,
}

impl HmacMiddlewareFactory {
    pub fn new(verifier: SignatureVerifier) -> Self {
        HmacMiddlewareFactory { verifier: Rc::new(verifier) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for HmacMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = HmacMiddlewareService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(HmacMiddlewareService { verifier: Rc::clone(&self.verifier), service: Rc::new(service) }))
    }
}

pub struct HmacMiddlewareService<S> {
    verifier: Rc<SignatureVerifier>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for HmacMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Rc::clone(&self.verifier);
        Box::pin(async move {
            trace!("🔐️ Checking HMAC for request");
            if !verifier.is_required() {
                trace!("🔐️ HMAC checks are disabled. Allowing request.");
                return service.call(req).await;
            }
            let data = req.extract::<web::Bytes>().await.map_err(|e| {
                warn!("🔐️ Failed to extract request data: {:?}", e);
                ServerError::InvalidRequestBody("Failed to extract request data.".into())
            })?;
            let signature = req.headers().get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
            if signature.is_none() {
                warn!("🔐️ No HMAC signature found in request. Denying access.");
            }
            if verifier.check(data.as_ref(), signature) {
                trace!("🔐️ HMAC check for request ✅️");
                req.set_payload(bytes_to_payload(data));
                service.call(req).await
            } else {
                warn!("🔐️ Invalid HMAC signature found in request. Denying access.");
                Err(ServerError::InvalidSignature.into())
            }
        })
    }
}

fn bytes_to_payload(buf: web::Bytes) -> Payload {
    let (_, mut pl) = h1::Payload::create(true);
    pl.unread_data(buf);
    Payload::from(pl)
}
