use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::shared::AppError;

/// One uploaded image blob with its declared MIME type
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Trait for pushing image batches to an external media host.
/// A batch is all-or-nothing: one failed upload fails the whole call.
#[async_trait]
pub trait MediaStore {
    async fn upload_images(&self, images: Vec<ImageUpload>) -> Result<Vec<String>, AppError>;
}

/// Configuration for the external media host
#[derive(Clone)]
pub struct MediaStoreConfig {
    pub upload_url: String,
    pub api_key: Option<String>,
    pub folder: String,
}

impl MediaStoreConfig {
    pub fn new() -> Self {
        Self {
            upload_url: std::env::var("MEDIA_UPLOAD_URL")
                .unwrap_or_else(|_| "http://localhost:9000/upload".to_string()),
            api_key: std::env::var("MEDIA_API_KEY").ok(),
            folder: std::env::var("MEDIA_UPLOAD_FOLDER")
                .unwrap_or_else(|_| "hotels_images".to_string()),
        }
    }
}

impl Default for MediaStoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    file: String,
    folder: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// Media store backed by an HTTP media-hosting service
pub struct HttpMediaStore {
    client: reqwest::Client,
    config: MediaStoreConfig,
}

impl HttpMediaStore {
    pub fn new(config: MediaStoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Uploads a single image as a base64 data URI and returns its public URL
    async fn upload_one(&self, image: ImageUpload) -> Result<String, AppError> {
        let payload = UploadRequest {
            file: data_uri(&image),
            folder: &self.config.folder,
            api_key: self.config.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.config.upload_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Media host request failed");
                AppError::UploadError(e.to_string())
            })?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "Media host rejected upload");
            return Err(AppError::UploadError(format!(
                "media host returned {}",
                response.status()
            )));
        }

        let body: UploadResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to decode media host response");
            AppError::UploadError(e.to_string())
        })?;

        Ok(body.url)
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    /// Submits all images concurrently and joins on the whole batch.
    /// The first failure aborts the call; no partial URL list is returned.
    #[instrument(skip(self, images))]
    async fn upload_images(&self, images: Vec<ImageUpload>) -> Result<Vec<String>, AppError> {
        debug!(image_count = images.len(), "Uploading image batch");

        let uploads = images.into_iter().map(|image| self.upload_one(image));
        let urls = futures::future::try_join_all(uploads).await?;

        debug!(url_count = urls.len(), "Image batch uploaded successfully");
        Ok(urls)
    }
}

fn data_uri(image: &ImageUpload) -> String {
    format!(
        "data:{};base64,{}",
        image.content_type,
        STANDARD.encode(&image.data)
    )
}
