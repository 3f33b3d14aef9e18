//! Application router configuration.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::{
    AppState, config::MAX_UPLOAD_BYTES, endpoints, index_page::get_index_page,
    logging::logging_middleware, not_found::get_404_not_found, upload::upload_statement,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::UPLOAD, post(upload_statement))
        .fallback(get_404_not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
