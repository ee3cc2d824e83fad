use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::types::{HotelChanges, NewHotel};

/// Database model for the hotels table.
/// Serializes with the camelCase field names the frontend expects.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelModel {
    pub id: String,      // UUID v4 as string
    pub user_id: String, // Owning user, the scope key for every query
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    #[serde(rename = "type")]
    pub hotel_type: String,
    pub price_per_night: f64,
    pub facilities: Vec<String>,
    pub image_urls: Vec<String>,
    pub adult_count: i32,
    pub child_count: i32,
    pub last_updated: DateTime<Utc>,
}

impl HotelModel {
    /// Creates a new hotel model with generated ID and a fresh timestamp
    pub fn new(user_id: String, details: NewHotel, image_urls: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            name: details.name,
            city: details.city,
            country: details.country,
            description: details.description,
            hotel_type: details.hotel_type,
            price_per_night: details.price_per_night,
            facilities: details.facilities,
            image_urls,
            adult_count: details.adult_count,
            child_count: details.child_count,
            last_updated: Utc::now(),
        }
    }

    /// Overwrites every field the update supplied, leaving the rest untouched.
    /// Image URLs are reconciled separately because they mix uploads with
    /// retained URLs.
    pub fn apply_changes(&mut self, changes: HotelChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(city) = changes.city {
            self.city = city;
        }
        if let Some(country) = changes.country {
            self.country = country;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(hotel_type) = changes.hotel_type {
            self.hotel_type = hotel_type;
        }
        if let Some(price_per_night) = changes.price_per_night {
            self.price_per_night = price_per_night;
        }
        if let Some(facilities) = changes.facilities {
            self.facilities = facilities;
        }
        if let Some(adult_count) = changes.adult_count {
            self.adult_count = adult_count;
        }
        if let Some(child_count) = changes.child_count {
            self.child_count = child_count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_details() -> NewHotel {
        NewHotel {
            name: "Seaside Inn".to_string(),
            city: "Lisbon".to_string(),
            country: "Portugal".to_string(),
            description: "A quiet place by the water".to_string(),
            hotel_type: "Boutique".to_string(),
            price_per_night: 120.0,
            facilities: vec!["Free WiFi".to_string()],
            adult_count: 2,
            child_count: 1,
        }
    }

    #[test]
    fn test_new_hotel_model() {
        let hotel = HotelModel::new(
            "owner-1".to_string(),
            sample_details(),
            vec!["https://images.test/0.jpg".to_string()],
        );

        assert!(!hotel.id.is_empty());
        assert_eq!(hotel.user_id, "owner-1");
        assert_eq!(hotel.name, "Seaside Inn");
        assert_eq!(hotel.image_urls.len(), 1);
    }

    #[test]
    fn test_apply_changes_only_touches_supplied_fields() {
        let mut hotel = HotelModel::new("owner-1".to_string(), sample_details(), vec![]);

        hotel.apply_changes(HotelChanges {
            name: Some("Harbour Inn".to_string()),
            price_per_night: Some(150.0),
            ..Default::default()
        });

        assert_eq!(hotel.name, "Harbour Inn");
        assert_eq!(hotel.price_per_night, 150.0);
        // Untouched fields survive
        assert_eq!(hotel.city, "Lisbon");
        assert_eq!(hotel.facilities, vec!["Free WiFi".to_string()]);
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let hotel = HotelModel::new("owner-1".to_string(), sample_details(), vec![]);
        let json = serde_json::to_string(&hotel).unwrap();

        assert!(json.contains("\"pricePerNight\""));
        assert!(json.contains("\"imageUrls\""));
        assert!(json.contains("\"type\""));
        assert!(json.contains("\"lastUpdated\""));
    }
}
