use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::HotelModel;
use crate::shared::AppError;

/// Trait for hotel repository operations.
/// Every read and write is scoped by the owning user id; a hotel id alone
/// never resolves to another user's record.
#[async_trait]
pub trait HotelRepository {
    async fn create_hotel(&self, hotel: &HotelModel) -> Result<(), AppError>;
    async fn list_hotels_by_owner(&self, owner_id: &str) -> Result<Vec<HotelModel>, AppError>;
    async fn get_hotel_by_owner(
        &self,
        owner_id: &str,
        hotel_id: &str,
    ) -> Result<Option<HotelModel>, AppError>;
    /// Overwrites the stored record matching the hotel's id and owner;
    /// fails with `NotFound` when no such row exists
    async fn update_hotel(&self, hotel: &HotelModel) -> Result<(), AppError>;
}

/// In-memory implementation of HotelRepository for development and testing
pub struct InMemoryHotelRepository {
    hotels: Mutex<HashMap<String, HotelModel>>,
}

impl Default for InMemoryHotelRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHotelRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            hotels: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of hotels in the repository
    pub fn hotel_count(&self) -> usize {
        self.hotels.lock().unwrap().len()
    }
}

#[async_trait]
impl HotelRepository for InMemoryHotelRepository {
    #[instrument(skip(self, hotel))]
    async fn create_hotel(&self, hotel: &HotelModel) -> Result<(), AppError> {
        debug!(hotel_id = %hotel.id, user_id = %hotel.user_id, "Creating hotel in memory");

        let mut hotels = self.hotels.lock().unwrap();
        if hotels.contains_key(&hotel.id) {
            warn!(hotel_id = %hotel.id, "Hotel already exists in memory");
            return Err(AppError::DatabaseError("Hotel already exists".to_string()));
        }
        hotels.insert(hotel.id.clone(), hotel.clone());

        debug!(hotel_id = %hotel.id, "Hotel created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_hotels_by_owner(&self, owner_id: &str) -> Result<Vec<HotelModel>, AppError> {
        debug!(owner_id = %owner_id, "Listing hotels by owner in memory");

        let hotels = self.hotels.lock().unwrap();
        let owned = hotels
            .values()
            .filter(|h| h.user_id == owner_id)
            .cloned()
            .collect();

        Ok(owned)
    }

    #[instrument(skip(self))]
    async fn get_hotel_by_owner(
        &self,
        owner_id: &str,
        hotel_id: &str,
    ) -> Result<Option<HotelModel>, AppError> {
        debug!(owner_id = %owner_id, hotel_id = %hotel_id, "Fetching hotel from memory");

        let hotels = self.hotels.lock().unwrap();
        let hotel = hotels
            .get(hotel_id)
            .filter(|h| h.user_id == owner_id)
            .cloned();

        match &hotel {
            Some(h) => debug!(hotel_id = %h.id, "Hotel found in memory"),
            None => debug!(hotel_id = %hotel_id, "Hotel not found for this owner in memory"),
        }

        Ok(hotel)
    }

    #[instrument(skip(self, hotel))]
    async fn update_hotel(&self, hotel: &HotelModel) -> Result<(), AppError> {
        debug!(hotel_id = %hotel.id, "Updating hotel in memory");

        let mut hotels = self.hotels.lock().unwrap();
        match hotels.get(&hotel.id) {
            Some(existing) if existing.user_id == hotel.user_id => {
                hotels.insert(hotel.id.clone(), hotel.clone());
                debug!(hotel_id = %hotel.id, "Hotel updated successfully in memory");
                Ok(())
            }
            _ => {
                warn!(hotel_id = %hotel.id, "Hotel not found for update in memory");
                Err(AppError::NotFound("Hotel not found".to_string()))
            }
        }
    }
}

/// PostgreSQL implementation of hotel repository
pub struct PostgresHotelRepository {
    pool: PgPool,
}

impl PostgresHotelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn hotel_from_row(row: PgRow) -> HotelModel {
    HotelModel {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        city: row.get("city"),
        country: row.get("country"),
        description: row.get("description"),
        hotel_type: row.get("hotel_type"),
        price_per_night: row.get("price_per_night"),
        facilities: row.get("facilities"),
        image_urls: row.get("image_urls"),
        adult_count: row.get("adult_count"),
        child_count: row.get("child_count"),
        last_updated: row.get("last_updated"),
    }
}

#[async_trait]
impl HotelRepository for PostgresHotelRepository {
    #[instrument(skip(self, hotel))]
    async fn create_hotel(&self, hotel: &HotelModel) -> Result<(), AppError> {
        debug!(hotel_id = %hotel.id, user_id = %hotel.user_id, "Creating hotel in database");

        sqlx::query(
            "INSERT INTO hotels (id, user_id, name, city, country, description, hotel_type, price_per_night, facilities, image_urls, adult_count, child_count, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
        )
        .bind(&hotel.id)
        .bind(&hotel.user_id)
        .bind(&hotel.name)
        .bind(&hotel.city)
        .bind(&hotel.country)
        .bind(&hotel.description)
        .bind(&hotel.hotel_type)
        .bind(hotel.price_per_night)
        .bind(&hotel.facilities)
        .bind(&hotel.image_urls)
        .bind(hotel.adult_count)
        .bind(hotel.child_count)
        .bind(hotel.last_updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create hotel in database");
            AppError::DatabaseError(e.to_string())
        })?;

        debug!(hotel_id = %hotel.id, "Hotel created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_hotels_by_owner(&self, owner_id: &str) -> Result<Vec<HotelModel>, AppError> {
        debug!(owner_id = %owner_id, "Listing hotels by owner in database");

        let rows = sqlx::query(
            "SELECT id, user_id, name, city, country, description, hotel_type, price_per_night, facilities, image_urls, adult_count, child_count, last_updated \
             FROM hotels WHERE user_id = $1"
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list hotels from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(hotel_from_row).collect())
    }

    #[instrument(skip(self))]
    async fn get_hotel_by_owner(
        &self,
        owner_id: &str,
        hotel_id: &str,
    ) -> Result<Option<HotelModel>, AppError> {
        debug!(owner_id = %owner_id, hotel_id = %hotel_id, "Fetching hotel from database");

        let row = sqlx::query(
            "SELECT id, user_id, name, city, country, description, hotel_type, price_per_night, facilities, image_urls, adult_count, child_count, last_updated \
             FROM hotels WHERE id = $1 AND user_id = $2"
        )
        .bind(hotel_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, hotel_id = %hotel_id, "Failed to fetch hotel from database");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(hotel_from_row))
    }

    #[instrument(skip(self, hotel))]
    async fn update_hotel(&self, hotel: &HotelModel) -> Result<(), AppError> {
        debug!(hotel_id = %hotel.id, "Updating hotel in database");

        let result = sqlx::query(
            "UPDATE hotels SET name = $3, city = $4, country = $5, description = $6, hotel_type = $7, price_per_night = $8, facilities = $9, image_urls = $10, adult_count = $11, child_count = $12, last_updated = $13 \
             WHERE id = $1 AND user_id = $2"
        )
        .bind(&hotel.id)
        .bind(&hotel.user_id)
        .bind(&hotel.name)
        .bind(&hotel.city)
        .bind(&hotel.country)
        .bind(&hotel.description)
        .bind(&hotel.hotel_type)
        .bind(hotel.price_per_night)
        .bind(&hotel.facilities)
        .bind(&hotel.image_urls)
        .bind(hotel.adult_count)
        .bind(hotel.child_count)
        .bind(hotel.last_updated)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, hotel_id = %hotel.id, "Failed to update hotel in database");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            warn!(hotel_id = %hotel.id, "Hotel not found for update");
            return Err(AppError::NotFound("Hotel not found".to_string()));
        }

        debug!(hotel_id = %hotel.id, "Hotel updated successfully in database");
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::hotel::types::NewHotel;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn create_test_hotel(owner_id: &str, name: &str) -> HotelModel {
            HotelModel::new(
                owner_id.to_string(),
                NewHotel {
                    name: name.to_string(),
                    city: "Lisbon".to_string(),
                    country: "Portugal".to_string(),
                    description: "A quiet place by the water".to_string(),
                    hotel_type: "Boutique".to_string(),
                    price_per_night: 120.0,
                    facilities: vec!["Free WiFi".to_string()],
                    adult_count: 2,
                    child_count: 0,
                },
                vec![],
            )
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn test_create_and_get_hotel() {
        let repo = InMemoryHotelRepository::new();
        let hotel = create_test_hotel("owner-1", "Seaside Inn");

        repo.create_hotel(&hotel).await.unwrap();

        let retrieved = repo.get_hotel_by_owner("owner-1", &hotel.id).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().name, "Seaside Inn");
    }

    #[tokio::test]
    async fn test_get_hotel_scoped_by_owner() {
        let repo = InMemoryHotelRepository::new();
        let hotel = create_test_hotel("owner-1", "Seaside Inn");
        repo.create_hotel(&hotel).await.unwrap();

        // A different owner must not see the record, even with a valid id
        let result = repo.get_hotel_by_owner("owner-2", &hotel.id).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_hotels_filters_by_owner() {
        let repo = InMemoryHotelRepository::new();
        repo.create_hotel(&create_test_hotel("owner-1", "Seaside Inn"))
            .await
            .unwrap();
        repo.create_hotel(&create_test_hotel("owner-1", "Harbour Inn"))
            .await
            .unwrap();
        repo.create_hotel(&create_test_hotel("owner-2", "Mountain Lodge"))
            .await
            .unwrap();

        let owned = repo.list_hotels_by_owner("owner-1").await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|h| h.user_id == "owner-1"));
    }

    #[tokio::test]
    async fn test_list_hotels_empty() {
        let repo = InMemoryHotelRepository::new();

        let hotels = repo.list_hotels_by_owner("owner-1").await.unwrap();
        assert!(hotels.is_empty());
    }

    #[tokio::test]
    async fn test_update_hotel() {
        let repo = InMemoryHotelRepository::new();
        let mut hotel = create_test_hotel("owner-1", "Seaside Inn");
        repo.create_hotel(&hotel).await.unwrap();

        hotel.name = "Harbour Inn".to_string();
        repo.update_hotel(&hotel).await.unwrap();

        let retrieved = repo
            .get_hotel_by_owner("owner-1", &hotel.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved.name, "Harbour Inn");
    }

    #[tokio::test]
    async fn test_update_nonexistent_hotel() {
        let repo = InMemoryHotelRepository::new();
        let hotel = create_test_hotel("owner-1", "Seaside Inn");

        let result = repo.update_hotel(&hotel).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_scoped_by_owner() {
        let repo = InMemoryHotelRepository::new();
        let hotel = create_test_hotel("owner-1", "Seaside Inn");
        repo.create_hotel(&hotel).await.unwrap();

        // Same id, different owner: must not overwrite
        let mut foreign = hotel.clone();
        foreign.user_id = "owner-2".to_string();
        foreign.name = "Hijacked".to_string();

        let result = repo.update_hotel(&foreign).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let stored = repo
            .get_hotel_by_owner("owner-1", &hotel.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Seaside Inn");
    }

    #[tokio::test]
    async fn test_create_duplicate_hotel() {
        let repo = InMemoryHotelRepository::new();
        let hotel = create_test_hotel("owner-1", "Seaside Inn");

        repo.create_hotel(&hotel).await.unwrap();

        let result = repo.create_hotel(&hotel).await;
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::DatabaseError(_)));
        assert_eq!(repo.hotel_count(), 1);
    }
}
