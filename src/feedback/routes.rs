use super::handlers;
use crate::auth::require_auth;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

/// Creates the feedback router. Reads are public, writes need a bearer token.
pub fn feedback_routes() -> Router {
    let public = Router::new()
        .route("/api/feedback", get(handlers::list_feedback))
        .route("/api/feedback/:id", get(handlers::get_feedback));

    let protected = Router::new()
        .route("/api/feedback", post(handlers::create_feedback))
        .route(
            "/api/feedback/:id",
            put(handlers::update_feedback).delete(handlers::delete_feedback),
        )
        .route_layer(middleware::from_fn(require_auth));

    public.merge(protected)
}
