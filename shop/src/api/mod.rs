pub mod customer;
pub mod order;
pub mod order_item;
pub mod product;

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use common::config::BackendConfig;

use crate::shop_storage::ShopStorage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<ShopStorage>,
}

impl AppState {
    pub fn new(storage: Arc<ShopStorage>) -> Self {
        Self { storage }
    }
}

/// The routing table: one route set per entity, one handler per operation.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/customers", get(customer::list).post(customer::create))
        .route(
            "/api/customers/{id}",
            get(customer::retrieve)
                .put(customer::replace)
                .patch(customer::update)
                .delete(customer::remove),
        )
        .route("/api/products", get(product::list).post(product::create))
        .route(
            "/api/products/{id}",
            get(product::retrieve)
                .put(product::replace)
                .patch(product::update)
                .delete(product::remove),
        )
        .route("/api/orders", get(order::list).post(order::create))
        .route(
            "/api/orders/{id}",
            get(order::retrieve)
                .put(order::replace)
                .patch(order::update)
                .delete(order::remove),
        )
        .route("/api/order-items", get(order_item::list).post(order_item::create))
        .route(
            "/api/order-items/{id}",
            get(order_item::retrieve)
                .put(order_item::replace)
                .patch(order_item::update)
                .delete(order_item::remove),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

pub fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();
}

/// Serve the API until ctrl-c, then drain the connection pool.
pub async fn serve(
    config: &BackendConfig,
    storage: Arc<ShopStorage>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let app = router(AppState::new(storage.clone()));

    tracing::info!("starting backend service at {}", config.server_address);
    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Ok(storage) = Arc::try_unwrap(storage) {
        storage.close().await?;
    }
    tracing::info!("backend service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
