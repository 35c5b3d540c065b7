// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers::thread, state::AppState, store::ContentStore};

/// Assembles the main application router.
///
/// * Mounts the thread read routes.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (thread detail use case).
pub fn create_router<S: ContentStore + 'static>(state: AppState<S>) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let thread_routes = Router::new().route("/{thread_id}", get(thread::get_thread_detail::<S>));

    Router::new()
        .nest("/threads", thread_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
