use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use checkout_bridge_engine::{CheckoutBridgeApi, OrderForwarder};
use log::info;
use utmify_tools::UtmifyApi;

use crate::{config::ServerConfig, errors::ServerError, routes::register_routes};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let forwarder = UtmifyApi::new(config.utmify.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    info!("🚀️ Orders will be submitted to {}", forwarder.orders_url());
    let srv = create_server_instance(config, forwarder)?;
    srv.await.map_err(ServerError::from)
}

/// Builds the server. The bridge (and with it the forwarder's connection pool) is shared by every worker.
pub fn create_server_instance<F>(config: ServerConfig, forwarder: F) -> Result<Server, ServerError>
where F: OrderForwarder + Send + Sync + 'static {
    let proxy = config.proxy_config();
    let api = web::Data::new(CheckoutBridgeApi::new(forwarder, config.bridge.clone()));
    let verifier = api.verifier().clone();
    let mut srv = HttpServer::new(move || {
        let verifier = verifier.clone();
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("cpb::access_log"))
            .app_data(api.clone())
            .app_data(web::Data::new(proxy))
            .configure(|cfg| register_routes::<F>(cfg, verifier))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)));
    if let Some(workers) = config.workers {
        srv = srv.workers(workers);
    }
    let srv = srv.bind((config.host.as_str(), config.port))?.run();
    Ok(srv)
}
