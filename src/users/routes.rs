//! User account routes

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::auth::require_auth;

/// Creates the users router
///
/// # Routes
/// - `POST /api/users` - Register (public)
/// - `POST /api/users/login` - Login (public)
/// - `GET /api/users/me` - Claims of the caller
/// - `GET /api/users` - List accounts
/// - `GET|PUT|DELETE /api/users/:id` - Read, update or delete an account
pub fn users_routes() -> Router {
    let public = Router::new()
        .route("/api/users", post(handlers::register))
        .route("/api/users/login", post(handlers::login));

    let protected = Router::new()
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/me", get(handlers::me))
        .route(
            "/api/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route_layer(middleware::from_fn(require_auth));

    public.merge(protected)
}
