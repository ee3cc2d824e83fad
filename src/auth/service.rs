use bcrypt::{hash, verify, DEFAULT_COST};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::{
    models::UserModel,
    repository::UserRepository,
    token::TokenConfig,
    types::{IssuedSession, LoginRequest, RegisterRequest},
};
use crate::shared::AppError;

/// Service for handling authentication business logic
pub struct AuthService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    token_config: TokenConfig,
}

impl AuthService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>, token_config: TokenConfig) -> Self {
        Self {
            repository,
            token_config,
        }
    }

    /// Registers a new user and issues a session token for them
    #[instrument(skip(self, request))]
    pub async fn register(&self, request: RegisterRequest) -> Result<IssuedSession, AppError> {
        info!(email = %request.email, "Registering new user");

        let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            AppError::Internal
        })?;

        let user = UserModel::new(
            request.email,
            password_hash,
            request.first_name,
            request.last_name,
        );

        // The repository enforces email uniqueness
        self.repository.create_user(&user).await?;

        let token = self.token_config.create_token(user.id.clone())?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(IssuedSession {
            user_id: user.id,
            token,
        })
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown email and wrong password both return `InvalidCredentials`, so
    /// a caller cannot probe which half of the pair was wrong.
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> Result<IssuedSession, AppError> {
        info!(email = %request.email, "Attempting login");

        let user = match self.repository.get_user_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                warn!(email = %request.email, "Login for unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        let matches = verify(&request.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password hash");
            AppError::Internal
        })?;

        if !matches {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.token_config.create_token(user.id.clone())?;

        info!(user_id = %user.id, "Login successful");
        Ok(IssuedSession {
            user_id: user.id,
            token,
        })
    }
}
