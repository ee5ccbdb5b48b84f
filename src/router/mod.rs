//! Routing module for the storefront application

use crate::state::SharedState;
use axum::{body::Body, extract::Request, middleware::Next, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        tracing::debug!(%method, %uri, "request");
        let res = next.run(req).await;
        if !res.status().is_success() {
            tracing::info!(%method, %uri, status = %res.status(), "request not successful");
        }
        res
    });

    // Middleware: CORS (Permissive for local dev)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Routes
    Router::new()
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .merge(crate::listing::routes())
        .merge(crate::product::routes())
        .merge(crate::cart::routes())
        .merge(crate::checkout::routes())
        .layer(log_layer)
        .layer(cors_layer)
        .with_state(state)
}
