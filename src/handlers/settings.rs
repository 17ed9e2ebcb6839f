use axum::extract::{Extension, Path, State};
use axum::Json;
use sqlx::types::Json as Jsonb;

use crate::domain::types::EventType;
use crate::dtos::settings::{UpdateContactSettingsRequest, UpdateEventImagesRequest};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::settings::{ContactSettings, EventTypeImages};
use crate::state::AppState;

// GET /settings/contact - public; the seed row always exists
pub async fn get_contact_settings(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<ContactSettings>, AppError> {
    let settings = sqlx::query_as::<_, ContactSettings>(
        "SELECT id, phone, email, address, facebook, instagram, updated_at \
         FROM contact_settings WHERE id = 1",
    )
    .fetch_one(&db_pool)
    .await?;
    Ok(Json(settings))
}

// PUT /settings/contact - manager only; absent fields are left untouched
pub async fn update_contact_settings(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateContactSettingsRequest>,
) -> Result<Json<ContactSettings>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can edit contact settings"));
    }

    let settings = sqlx::query_as::<_, ContactSettings>(
        "UPDATE contact_settings SET \
         phone = COALESCE($1, phone), email = COALESCE($2, email), \
         address = COALESCE($3, address), facebook = COALESCE($4, facebook), \
         instagram = COALESCE($5, instagram), updated_at = NOW() \
         WHERE id = 1 \
         RETURNING id, phone, email, address, facebook, instagram, updated_at",
    )
    .bind(&req.phone)
    .bind(&req.email)
    .bind(&req.address)
    .bind(&req.facebook)
    .bind(&req.instagram)
    .fetch_one(&db_pool)
    .await?;

    Ok(Json(settings))
}

// GET /event-types/{event_type}/images - public gallery per event category
pub async fn get_event_images(
    State(AppState { db_pool }): State<AppState>,
    Path(event_type): Path<EventType>,
) -> Result<Json<EventTypeImages>, AppError> {
    let images = sqlx::query_as::<_, EventTypeImages>(
        "SELECT event_type, images, updated_at FROM event_type_images WHERE event_type = $1",
    )
    .bind(event_type)
    .fetch_optional(&db_pool)
    .await?;

    // Event types with no curated gallery read as empty.
    let images = images.unwrap_or(EventTypeImages {
        event_type,
        images: Jsonb(Vec::new()),
        updated_at: chrono::Utc::now(),
    });

    Ok(Json(images))
}

// PUT /event-types/{event_type}/images - manager upsert
pub async fn set_event_images(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(event_type): Path<EventType>,
    Json(req): Json<UpdateEventImagesRequest>,
) -> Result<Json<EventTypeImages>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can edit event galleries"));
    }

    let images = sqlx::query_as::<_, EventTypeImages>(
        "INSERT INTO event_type_images (event_type, images, updated_at) \
         VALUES ($1, $2, NOW()) \
         ON CONFLICT (event_type) \
         DO UPDATE SET images = EXCLUDED.images, updated_at = NOW() \
         RETURNING event_type, images, updated_at",
    )
    .bind(event_type)
    .bind(Jsonb(&req.images))
    .fetch_one(&db_pool)
    .await?;

    Ok(Json(images))
}
