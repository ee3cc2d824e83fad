pub mod mocks;
pub mod multipart;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use mocks::MockMediaStore;
#[allow(unused_imports)]
pub use multipart::MultipartBuilder;
#[allow(unused_imports)]
pub use setup::{TestApp, TestAppBuilder, TEST_SECRET};
