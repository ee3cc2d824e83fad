use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use innkeeper::media::{ImageUpload, MediaStore};
use innkeeper::AppError;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Media store double handing out predictable fake URLs.
/// `failing()` makes every batch fail, exercising the all-or-nothing path.
pub struct MockMediaStore {
    fail: bool,
    uploaded: AtomicUsize,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self {
            fail: false,
            uploaded: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            uploaded: AtomicUsize::new(0),
        }
    }

    /// Number of images uploaded across all successful batches
    #[allow(dead_code)]
    pub fn upload_count(&self) -> usize {
        self.uploaded.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn upload_images(&self, images: Vec<ImageUpload>) -> Result<Vec<String>, AppError> {
        if self.fail {
            return Err(AppError::UploadError("mock upload failure".to_string()));
        }
        let start = self.uploaded.fetch_add(images.len(), Ordering::SeqCst);
        Ok((0..images.len())
            .map(|i| format!("https://images.test/{}.jpg", start + i))
            .collect())
    }
}
