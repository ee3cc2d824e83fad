use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{models::HotelModel, service::HotelService, types::HotelForm};
use crate::auth::AuthClaims;
use crate::media::ImageUpload;
use crate::shared::{AppError, AppState, FieldError};

/// Per-image ceiling enforced before ingestion is attempted
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024; // 5mb
/// Upload cap for a single create request
pub const MAX_IMAGES_PER_HOTEL: usize = 6;

/// HTTP handler for creating a new hotel
///
/// POST /api/my-hotels
/// Multipart body: hotel fields plus up to 6 `imageFiles` parts
#[instrument(name = "create_hotel", skip(state, claims, multipart))]
pub async fn create_hotel(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<HotelModel>), AppError> {
    info!(user_id = %claims.user_id, "Creating new hotel");

    let (form, images) = read_hotel_form(multipart).await?;
    if images.len() > MAX_IMAGES_PER_HOTEL {
        return Err(AppError::Validation(vec![FieldError::new(
            "imageFiles",
            "A hotel can have at most 6 images",
        )]));
    }

    let service = HotelService::new(
        Arc::clone(&state.hotel_repository),
        Arc::clone(&state.media_store),
    );
    let hotel = service.create_hotel(&claims.user_id, form, images).await?;

    info!(
        hotel_id = %hotel.id,
        user_id = %claims.user_id,
        "Hotel created successfully"
    );

    Ok((StatusCode::CREATED, Json(hotel)))
}

/// HTTP handler for listing the caller's hotels
///
/// GET /api/my-hotels
#[instrument(name = "list_hotels", skip(state, claims))]
pub async fn list_hotels(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
) -> Result<Json<Vec<HotelModel>>, AppError> {
    info!(user_id = %claims.user_id, "Listing hotels");

    let service = HotelService::new(
        Arc::clone(&state.hotel_repository),
        Arc::clone(&state.media_store),
    );
    let hotels = service.list_hotels(&claims.user_id).await?;

    info!(hotel_count = hotels.len(), "Hotels listed successfully");

    Ok(Json(hotels))
}

/// HTTP handler for fetching one of the caller's hotels
///
/// GET /api/my-hotels/:hotel_id
/// Responds 404 when the hotel does not exist or belongs to someone else
#[instrument(name = "get_hotel", skip(state, claims))]
pub async fn get_hotel(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Path(hotel_id): Path<String>,
) -> Result<Json<HotelModel>, AppError> {
    info!(user_id = %claims.user_id, hotel_id = %hotel_id, "Fetching hotel");

    let service = HotelService::new(
        Arc::clone(&state.hotel_repository),
        Arc::clone(&state.media_store),
    );
    let hotel = service.get_hotel(&claims.user_id, &hotel_id).await?;

    Ok(Json(hotel))
}

/// HTTP handler for updating one of the caller's hotels
///
/// PUT /api/my-hotels/:hotel_id
/// Multipart body: changed fields, retained `imageUrls`, optional new `imageFiles`
#[instrument(name = "update_hotel", skip(state, claims, multipart))]
pub async fn update_hotel(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Path(hotel_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<HotelModel>, AppError> {
    info!(user_id = %claims.user_id, hotel_id = %hotel_id, "Updating hotel");

    let (form, images) = read_hotel_form(multipart).await?;

    let service = HotelService::new(
        Arc::clone(&state.hotel_repository),
        Arc::clone(&state.media_store),
    );
    let hotel = service
        .update_hotel(&claims.user_id, &hotel_id, form, images)
        .await?;

    info!(hotel_id = %hotel.id, "Hotel updated successfully");

    Ok(Json(hotel))
}

/// Reads hotel fields and image files out of a multipart body.
/// Unknown parts are skipped; oversized images fail the whole request.
async fn read_hotel_form(
    mut multipart: Multipart,
) -> Result<(HotelForm, Vec<ImageUpload>), AppError> {
    let mut form = HotelForm::default();
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(malformed_body)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = Some(field.text().await.map_err(malformed_body)?),
            "city" => form.city = Some(field.text().await.map_err(malformed_body)?),
            "country" => form.country = Some(field.text().await.map_err(malformed_body)?),
            "description" => form.description = Some(field.text().await.map_err(malformed_body)?),
            "type" => form.hotel_type = Some(field.text().await.map_err(malformed_body)?),
            "pricePerNight" => {
                form.price_per_night = Some(field.text().await.map_err(malformed_body)?)
            }
            "adultCount" => form.adult_count = Some(field.text().await.map_err(malformed_body)?),
            "childCount" => form.child_count = Some(field.text().await.map_err(malformed_body)?),
            "facilities" => form
                .facilities
                .push(field.text().await.map_err(malformed_body)?),
            "imageUrls" => form
                .image_urls
                .get_or_insert_with(Vec::new)
                .push(field.text().await.map_err(malformed_body)?),
            "imageFiles" => {
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = field.bytes().await.map_err(malformed_body)?;
                if data.len() > MAX_IMAGE_BYTES {
                    return Err(AppError::Validation(vec![FieldError::new(
                        "imageFiles",
                        "Each image must be 5MB or smaller",
                    )]));
                }
                images.push(ImageUpload {
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {
                debug!(field = %name, "Ignoring unknown multipart field");
            }
        }
    }

    Ok((form, images))
}

fn malformed_body(err: MultipartError) -> AppError {
    warn!(error = %err, "Failed to read multipart body");
    AppError::Validation(vec![FieldError::new("body", "Malformed multipart body")])
}
