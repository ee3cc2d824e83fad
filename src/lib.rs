// Library crate for the innkeeper booking API
// This file exposes the public API for integration tests

pub mod app;
pub mod auth;
pub mod hotel;
pub mod media;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use app::build_router;
pub use shared::{AppError, AppState, FieldError};
