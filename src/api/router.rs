//! Clinic API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Routes live at the root, one resource per endpoint module,
//! with request tracing and permissive CORS layered on the outside.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the clinic API router over a shared [`ApiContext`].
pub fn clinic_router(ctx: ApiContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/doctors",
            get(endpoints::doctors::search).post(endpoints::doctors::create),
        )
        .route(
            "/doctors/:id",
            get(endpoints::doctors::detail)
                .put(endpoints::doctors::update)
                .delete(endpoints::doctors::remove),
        )
        .route(
            "/patients",
            get(endpoints::patients::search).post(endpoints::patients::create),
        )
        .route(
            "/patients/:id",
            get(endpoints::patients::detail)
                .put(endpoints::patients::update)
                .delete(endpoints::patients::remove),
        )
        .route(
            "/appointments",
            get(endpoints::appointments::search).post(endpoints::appointments::schedule),
        )
        .route(
            "/appointments/:id",
            axum::routing::put(endpoints::appointments::update)
                .delete(endpoints::appointments::cancel),
        )
        .with_state(ctx)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
