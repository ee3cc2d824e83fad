// Public API - what other modules can use
pub use handlers::{login, logout, register, validate_token};
pub use middleware::cookie_auth;
pub use token::AUTH_COOKIE;
pub use types::AuthClaims;

// Internal modules
mod handlers;
mod middleware;
pub mod models;
pub mod repository;
pub mod service;
pub mod token;
mod types;
