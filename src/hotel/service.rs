use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::HotelModel,
    repository::HotelRepository,
    types::HotelForm,
};
use crate::media::{ImageUpload, MediaStore};
use crate::shared::AppError;

/// Service for handling hotel business logic.
/// Every operation runs validate -> authorize -> ingest -> persist, so a
/// failing step leaves no partial writes behind.
pub struct HotelService {
    repository: Arc<dyn HotelRepository + Send + Sync>,
    media_store: Arc<dyn MediaStore + Send + Sync>,
}

impl HotelService {
    pub fn new(
        repository: Arc<dyn HotelRepository + Send + Sync>,
        media_store: Arc<dyn MediaStore + Send + Sync>,
    ) -> Self {
        Self {
            repository,
            media_store,
        }
    }

    /// Creates a new hotel for the given owner.
    /// Image ingestion happens after validation and before persistence, so an
    /// upload failure means no hotel record exists.
    #[instrument(skip(self, form, images))]
    pub async fn create_hotel(
        &self,
        owner_id: &str,
        form: HotelForm,
        images: Vec<ImageUpload>,
    ) -> Result<HotelModel, AppError> {
        let details = form.into_new_hotel()?;

        debug!(image_count = images.len(), "Ingesting image batch for new hotel");
        let image_urls = self.media_store.upload_images(images).await?;

        let hotel = HotelModel::new(owner_id.to_string(), details, image_urls);
        self.repository.create_hotel(&hotel).await?;

        info!(hotel_id = %hotel.id, owner_id = %owner_id, "Hotel created successfully");
        Ok(hotel)
    }

    /// Lists every hotel owned by the given user
    #[instrument(skip(self))]
    pub async fn list_hotels(&self, owner_id: &str) -> Result<Vec<HotelModel>, AppError> {
        let hotels = self.repository.list_hotels_by_owner(owner_id).await?;

        debug!(hotel_count = hotels.len(), "Hotels retrieved successfully");
        Ok(hotels)
    }

    /// Fetches one hotel, scoped by owner
    #[instrument(skip(self))]
    pub async fn get_hotel(&self, owner_id: &str, hotel_id: &str) -> Result<HotelModel, AppError> {
        self.repository
            .get_hotel_by_owner(owner_id, hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Hotel not found".to_string()))
    }

    /// Updates a hotel owned by the given user.
    ///
    /// The stored image set becomes the union of freshly uploaded URLs and
    /// the URLs the client retained. An absent `imageUrls` field keeps every
    /// previously stored URL; duplicates are never introduced.
    #[instrument(skip(self, form, images))]
    pub async fn update_hotel(
        &self,
        owner_id: &str,
        hotel_id: &str,
        form: HotelForm,
        images: Vec<ImageUpload>,
    ) -> Result<HotelModel, AppError> {
        let mut changes = form.into_hotel_changes()?;
        let retained = changes.image_urls.take();

        // Ownership check before any external call
        let mut hotel = self
            .repository
            .get_hotel_by_owner(owner_id, hotel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Hotel not found".to_string()))?;

        debug!(image_count = images.len(), "Ingesting image batch for update");
        let new_urls = self.media_store.upload_images(images).await?;

        let retained = retained.unwrap_or_else(|| hotel.image_urls.clone());

        hotel.apply_changes(changes);
        hotel.image_urls = reconcile_image_urls(new_urls, retained);
        hotel.last_updated = Utc::now();

        self.repository.update_hotel(&hotel).await?;

        info!(hotel_id = %hotel.id, owner_id = %owner_id, "Hotel updated successfully");
        Ok(hotel)
    }
}

/// Combines freshly uploaded URLs with the retained ones, newest first,
/// dropping duplicates while preserving order
fn reconcile_image_urls(new_urls: Vec<String>, retained: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    new_urls
        .into_iter()
        .chain(retained)
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
