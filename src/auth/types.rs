use serde::{Deserialize, Serialize};

use crate::shared::{AppError, FieldError};

/// JWT claims structure binding a session to a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthClaims {
    pub user_id: String,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

/// Request payload for user registration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    /// Checks the request shape, reporting every failing field
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = credential_errors(&self.email, &self.password);
        if self.first_name.trim().is_empty() {
            errors.push(FieldError::new("firstName", "First name is required"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(FieldError::new("lastName", "Last name is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Request payload for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let errors = credential_errors(&self.email, &self.password);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

fn credential_errors(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if email.trim().is_empty() || !email.contains('@') {
        errors.push(FieldError::new("email", "Email is required"));
    }
    if password.chars().count() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password with 6 or more characters required",
        ));
    }
    errors
}

/// Response body for endpoints that identify the authenticated user
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: String,
}

/// An issued session: the signed token plus the user it binds
#[derive(Debug)]
pub struct IssuedSession {
    pub user_id: String,
    pub token: String,
}
