//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use std::time::Duration;

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::{countries_routes, default_not_found, index, status_routes};
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config)
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let country_service = startup.country_service.clone();
    let refresh_service = startup.refresh_service.clone();
    let summary_image = startup.summary_image.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    // Clone db reference before storage moves into HttpServer closure
    let db_for_shutdown = startup.storage.get_db().clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .app_data(web::Data::new(country_service.clone()))
            .app_data(web::Data::new(refresh_service.clone()))
            .app_data(web::Data::new(summary_image.clone()))
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .route("/", web::get().to(index))
            .service(countries_routes())
            .service(status_routes())
            .default_service(web::to(default_not_found))
    })
    .keep_alive(Duration::from_secs(30))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .shutdown_timeout(lifetime::shutdown::SHUTDOWN_TIMEOUT_SECS)
    .disable_signals()
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(bind_address)?.run();
    let handle = server.handle();

    // Ctrl+C 后停止接收新连接，等待进行中的请求完成
    tokio::spawn(async move {
        lifetime::shutdown::wait_for_shutdown_signal().await;
        handle.stop(true).await;
    });

    server.await?;
    lifetime::shutdown::close_resources(db_for_shutdown).await;
    warn!("Graceful shutdown: all tasks completed");

    Ok(())
}
