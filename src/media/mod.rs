// Public API - what other modules can use
pub use store::{HttpMediaStore, ImageUpload, MediaStore, MediaStoreConfig};

// Internal modules
mod store;
