use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error, instrument};

use super::types::AuthClaims;
use crate::shared::AppError;

/// Name of the session cookie carrying the signed token
pub const AUTH_COOKIE: &str = "auth_token";

/// Configuration for JWT session token operations
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expiration_hours: i64,
    pub secure_cookies: bool,
}

impl TokenConfig {
    pub fn new() -> Self {
        // Allow configuring expiration via env var, default to 24 hours
        let expiration_hours = std::env::var("AUTH_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(24);

        // Secure + SameSite=None cookies only make sense behind TLS
        let secure_cookies = std::env::var("APP_ENV")
            .map(|env| env == "production")
            .unwrap_or(false);

        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            expiration_hours,
            secure_cookies,
        }
    }

    /// Builds a config with explicit settings instead of env vars
    pub fn with_settings(
        secret: impl Into<String>,
        expiration_hours: i64,
        secure_cookies: bool,
    ) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
            secure_cookies,
        }
    }

    /// Creates a new signed session token bound to the given user
    #[instrument(skip(self, user_id))]
    pub fn create_token(&self, user_id: String) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = (now + Duration::hours(self.expiration_hours)).timestamp() as usize;

        debug!(
            expiration_hours = self.expiration_hours,
            exp_timestamp = exp,
            "Creating session token with expiration"
        );

        let claims = AuthClaims {
            user_id,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(|e| {
            error!(error = %e, "Failed to encode session token");
            AppError::Internal
        })
    }

    /// Validates a session token and returns the claims if valid
    #[instrument(skip(self, token))]
    pub fn validate_token(&self, token: &str) -> Result<AuthClaims, AppError> {
        debug!("Decoding and validating session token");

        decode::<AuthClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| {
            debug!(
                user_id = %data.claims.user_id,
                exp = data.claims.exp,
                "Session token decoded successfully"
            );
            data.claims
        })
        .map_err(|e| {
            debug!(error = %e, "Failed to decode session token");
            AppError::Unauthorized("Invalid or expired session token".to_string())
        })
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::new()
    }
}
