use axum::{extract::State, http::StatusCode, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::AuthService,
    token::{TokenConfig, AUTH_COOKIE},
    types::{AuthClaims, AuthResponse, LoginRequest, RegisterRequest},
};
use crate::shared::{AppError, AppState};

/// Builds the session cookie carrying a freshly issued token.
/// `SameSite=None` requires `Secure`, so both flip together in production.
fn session_cookie(token: String, config: &TokenConfig) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::hours(config.expiration_hours))
        .secure(config.secure_cookies)
        .same_site(if config.secure_cookies {
            SameSite::None
        } else {
            SameSite::Lax
        })
        .build()
}

/// HTTP handler for user registration
///
/// POST /api/users/register
/// Creates the user, sets the session cookie and returns the new user id
#[instrument(name = "register", skip(state, jar, request))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), AppError> {
    request.validate()?;

    let service = AuthService::new(
        Arc::clone(&state.user_repository),
        state.token_config.clone(),
    );
    let session = service.register(request).await?;

    info!(user_id = %session.user_id, "Registration completed");

    let jar = jar.add(session_cookie(session.token, &state.token_config));
    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            user_id: session.user_id,
        }),
    ))
}

/// HTTP handler for login
///
/// POST /api/auth/login
/// Verifies credentials, sets the session cookie and returns the user id
#[instrument(name = "login", skip(state, jar, request))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    request.validate()?;

    let service = AuthService::new(
        Arc::clone(&state.user_repository),
        state.token_config.clone(),
    );
    let session = service.login(request).await?;

    info!(user_id = %session.user_id, "Login completed");

    let jar = jar.add(session_cookie(session.token, &state.token_config));
    Ok((
        jar,
        Json(AuthResponse {
            user_id: session.user_id,
        }),
    ))
}

/// HTTP handler reporting who the session cookie belongs to
///
/// GET /api/auth/validate-token
/// Runs behind the cookie_auth middleware; reaching it means the token is valid
#[instrument(name = "validate_token", skip(claims))]
pub async fn validate_token(
    Extension(claims): Extension<AuthClaims>,
) -> Json<AuthResponse> {
    Json(AuthResponse {
        user_id: claims.user_id,
    })
}

/// HTTP handler for logout
///
/// POST /api/auth/logout
/// Clears the session cookie. The token itself stays valid until its natural
/// expiry; there is no server-side revocation registry.
#[instrument(name = "logout", skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    info!("Clearing session cookie");

    let removal = Cookie::build((AUTH_COOKIE, "")).path("/").build();
    (jar.remove(removal), StatusCode::OK)
}
