use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::hotel;
use crate::shared::AppState;

/// Whole-request body cap, comfortably above six 5MB images plus form fields
pub const MAX_REQUEST_BYTES: usize = 40 * 1024 * 1024;

/// Builds the application router. Integration tests drive this exact router,
/// so routes and middleware behave identically in tests and production.
pub fn build_router(state: AppState) -> Router {
    // Owner-scoped routes sit behind the session cookie gate
    let protected = Router::new()
        .route("/api/auth/validate-token", get(auth::validate_token))
        .route(
            "/api/my-hotels",
            post(hotel::create_hotel).get(hotel::list_hotels),
        )
        .route(
            "/api/my-hotels/:hotel_id",
            get(hotel::get_hotel).put(hotel::update_hotel),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::cookie_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/api/users/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "message": "Health OK!" }))
}
