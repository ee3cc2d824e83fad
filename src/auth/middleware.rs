use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::{debug, instrument, warn};

use super::token::AUTH_COOKIE;
use crate::shared::{AppError, AppState};

/// Cookie authentication middleware - validates the `auth_token` cookie and adds AuthClaims to request.
/// Usage: .route_layer(middleware::from_fn_with_state(app_state.clone(), auth::cookie_auth))
/// Handlers can then extract Extension(claims): Extension<AuthClaims>.
#[instrument(skip(state, jar, req, next))]
pub async fn cookie_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    debug!(
        "Cookie authentication middleware triggered for request {}",
        req.uri()
    );

    // Extract the session token from the auth cookie
    let token = jar
        .get(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| {
            warn!("Missing auth cookie in request");
            AppError::Unauthorized("Missing authentication cookie".to_string())
        })?;

    // Validate token, log error if it fails
    let claims = match state.token_config.validate_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            warn!("Cookie authentication failed: {}", e);
            return Err(e);
        }
    };

    debug!(
        user_id = %claims.user_id,
        "Authentication successful, adding claims to request"
    );

    // Add claims to request extensions for handlers to use
    req.extensions_mut().insert(claims);

    // Continue to next middleware/handler
    Ok(next.run(req).await)
}
