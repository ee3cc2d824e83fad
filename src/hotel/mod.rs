// Public API - what other modules can use
pub use handlers::{create_hotel, get_hotel, list_hotels, update_hotel};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
