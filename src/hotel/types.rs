use crate::shared::{AppError, FieldError};

/// Raw hotel fields as read from a multipart request body.
/// Everything is optional at this stage; `into_new_hotel` and
/// `into_hotel_changes` decide what is required.
#[derive(Debug, Default)]
pub struct HotelForm {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub hotel_type: Option<String>,
    pub price_per_night: Option<String>,
    pub adult_count: Option<String>,
    pub child_count: Option<String>,
    pub facilities: Vec<String>,
    /// `None` when the field was absent from the request, which on update
    /// means "keep every stored URL"
    pub image_urls: Option<Vec<String>>,
}

/// A fully validated set of fields for creating a hotel
#[derive(Debug)]
pub struct NewHotel {
    pub name: String,
    pub city: String,
    pub country: String,
    pub description: String,
    pub hotel_type: String,
    pub price_per_night: f64,
    pub facilities: Vec<String>,
    pub adult_count: i32,
    pub child_count: i32,
}

/// Validated partial update; `None` means the field was not supplied
#[derive(Debug, Default)]
pub struct HotelChanges {
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub hotel_type: Option<String>,
    pub price_per_night: Option<f64>,
    pub facilities: Option<Vec<String>>,
    pub adult_count: Option<i32>,
    pub child_count: Option<i32>,
    pub image_urls: Option<Vec<String>>,
}

const PRICE_MESSAGE: &str = "Price per night is required and must be a number greater than zero";

impl HotelForm {
    /// Validates the form for creation, reporting every failing field at once
    pub fn into_new_hotel(self) -> Result<NewHotel, AppError> {
        let mut errors = Vec::new();

        let name = require_text("name", "Hotel name is required", self.name, &mut errors);
        let city = require_text("city", "City is required", self.city, &mut errors);
        let country = require_text("country", "Country is required", self.country, &mut errors);
        let description = require_text(
            "description",
            "Description is required",
            self.description,
            &mut errors,
        );
        let hotel_type = require_text("type", "Hotel type is required", self.hotel_type, &mut errors);
        let price_per_night = require_price(self.price_per_night, &mut errors);
        let adult_count = require_count(
            "adultCount",
            "Adult count is required and must be at least 1",
            self.adult_count,
            1,
            &mut errors,
        );
        let child_count = require_count(
            "childCount",
            "Child count is required and must be zero or more",
            self.child_count,
            0,
            &mut errors,
        );
        let facilities = require_facilities(self.facilities, &mut errors);

        match (
            name,
            city,
            country,
            description,
            hotel_type,
            price_per_night,
            adult_count,
            child_count,
            facilities,
        ) {
            (
                Some(name),
                Some(city),
                Some(country),
                Some(description),
                Some(hotel_type),
                Some(price_per_night),
                Some(adult_count),
                Some(child_count),
                Some(facilities),
            ) if errors.is_empty() => Ok(NewHotel {
                name,
                city,
                country,
                description,
                hotel_type,
                price_per_night,
                facilities,
                adult_count,
                child_count,
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }

    /// Validates the form for an update: absent fields stay untouched,
    /// supplied fields must still pass the creation rules
    pub fn into_hotel_changes(self) -> Result<HotelChanges, AppError> {
        let mut errors = Vec::new();

        let name = optional_text("name", "Hotel name cannot be empty", self.name, &mut errors);
        let city = optional_text("city", "City cannot be empty", self.city, &mut errors);
        let country = optional_text("country", "Country cannot be empty", self.country, &mut errors);
        let description = optional_text(
            "description",
            "Description cannot be empty",
            self.description,
            &mut errors,
        );
        let hotel_type = optional_text("type", "Hotel type cannot be empty", self.hotel_type, &mut errors);

        let price_per_night = match self.price_per_night {
            None => None,
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(price) if price > 0.0 => Some(price),
                _ => {
                    errors.push(FieldError::new("pricePerNight", PRICE_MESSAGE));
                    None
                }
            },
        };

        let adult_count = optional_count(
            "adultCount",
            "Adult count must be at least 1",
            self.adult_count,
            1,
            &mut errors,
        );
        let child_count = optional_count(
            "childCount",
            "Child count must be zero or more",
            self.child_count,
            0,
            &mut errors,
        );

        let facilities = if self.facilities.is_empty() {
            None
        } else {
            require_facilities(self.facilities, &mut errors)
        };

        if errors.is_empty() {
            Ok(HotelChanges {
                name,
                city,
                country,
                description,
                hotel_type,
                price_per_night,
                facilities,
                adult_count,
                child_count,
                image_urls: self.image_urls,
            })
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

fn require_text(
    field: &str,
    message: &str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn optional_text(
    field: &str,
    message: &str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        None => None,
        Some(v) => {
            let trimmed = v.trim().to_string();
            if trimmed.is_empty() {
                errors.push(FieldError::new(field, message));
                None
            } else {
                Some(trimmed)
            }
        }
    }
}

fn require_price(value: Option<String>, errors: &mut Vec<FieldError>) -> Option<f64> {
    match value.as_deref().map(str::trim).map(str::parse::<f64>) {
        Some(Ok(price)) if price > 0.0 => Some(price),
        _ => {
            errors.push(FieldError::new("pricePerNight", PRICE_MESSAGE));
            None
        }
    }
}

fn require_count(
    field: &str,
    message: &str,
    value: Option<String>,
    min: i32,
    errors: &mut Vec<FieldError>,
) -> Option<i32> {
    match value.as_deref().map(str::trim).map(str::parse::<i32>) {
        Some(Ok(count)) if count >= min => Some(count),
        _ => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

fn optional_count(
    field: &str,
    message: &str,
    value: Option<String>,
    min: i32,
    errors: &mut Vec<FieldError>,
) -> Option<i32> {
    match value {
        None => None,
        Some(raw) => match raw.trim().parse::<i32>() {
            Ok(count) if count >= min => Some(count),
            _ => {
                errors.push(FieldError::new(field, message));
                None
            }
        },
    }
}

fn require_facilities(
    facilities: Vec<String>,
    errors: &mut Vec<FieldError>,
) -> Option<Vec<String>> {
    let entries: Vec<String> = facilities
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    if entries.is_empty() {
        errors.push(FieldError::new("facilities", "Facilities are required"));
        None
    } else {
        Some(entries)
    }
}
