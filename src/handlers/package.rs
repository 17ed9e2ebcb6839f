use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::Json;
use sqlx::types::Json as Jsonb;
use tracing::instrument;

use crate::domain::rules::main_image;
use crate::dtos::package::{CreatePackageRequest, UpdatePackageRequest};
use crate::error::AppError;
use crate::handlers::map_unique_violation;
use crate::middleware::auth::AuthContext;
use crate::models::package::Package;
use crate::state::AppState;

// GET /packages - public catalog
#[instrument(skip(state))]
pub async fn list_packages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Package>>, AppError> {
    let packages = sqlx::query_as::<_, Package>(&format!("{} ORDER BY price", Package::SELECT))
        .fetch_all(&state.db_pool)
        .await?;
    Ok(Json(packages))
}

// GET /packages/{id}
pub async fn get_package(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Package>, AppError> {
    let package = sqlx::query_as::<_, Package>(&format!("{} WHERE id = $1", Package::SELECT))
        .bind(id)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("Package not found"))?;
    Ok(Json(package))
}

// POST /packages - manager only
pub async fn create_package(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreatePackageRequest>,
) -> Result<(StatusCode, Json<Package>), AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can manage packages"));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Package name required"));
    }
    if payload.price < 0.0 {
        return Err(AppError::validation("Price cannot be negative"));
    }

    let image_url = main_image(&payload.gallery).cloned();

    let package = sqlx::query_as::<_, Package>(
        "INSERT INTO packages (name, description, price, features, icon, gradient, image_url, gallery) \
         VALUES ($1, $2, ($3)::FLOAT8, $4, $5, $6, $7, $8) \
         RETURNING id, name, description, price::FLOAT8 AS price, features, icon, \
                   gradient, image_url, gallery, created_at",
    )
    .bind(payload.name.trim())
    .bind(&payload.description)
    .bind(payload.price)
    .bind(Jsonb(&payload.features))
    .bind(&payload.icon)
    .bind(&payload.gradient)
    .bind(&image_url)
    .bind(Jsonb(&payload.gallery))
    .fetch_one(&db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "A package with this name already exists"))?;

    Ok((StatusCode::CREATED, Json(package)))
}

// PUT /packages/{id} - manager only
pub async fn update_package(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePackageRequest>,
) -> Result<Json<Package>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can manage packages"));
    }

    let existing = sqlx::query_as::<_, Package>(&format!("{} WHERE id = $1", Package::SELECT))
        .bind(id)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("Package not found"))?;

    let name = payload.name.unwrap_or(existing.name);
    if name.trim().is_empty() {
        return Err(AppError::validation("Package name required"));
    }
    let price = payload.price.unwrap_or(existing.price);
    if price < 0.0 {
        return Err(AppError::validation("Price cannot be negative"));
    }
    let description = payload.description.unwrap_or(existing.description);
    let features = payload.features.unwrap_or(existing.features.0);
    let icon = payload.icon.or(existing.icon);
    let gradient = payload.gradient.or(existing.gradient);
    let gallery = payload.gallery.unwrap_or(existing.gallery.0);
    // Re-derive the mirror on every write so it can never drift.
    let image_url = main_image(&gallery).cloned();

    let package = sqlx::query_as::<_, Package>(
        "UPDATE packages SET name = $2, description = $3, price = ($4)::FLOAT8, features = $5, \
         icon = $6, gradient = $7, image_url = $8, gallery = $9 \
         WHERE id = $1 \
         RETURNING id, name, description, price::FLOAT8 AS price, features, icon, \
                   gradient, image_url, gallery, created_at",
    )
    .bind(id)
    .bind(name.trim())
    .bind(&description)
    .bind(price)
    .bind(Jsonb(&features))
    .bind(&icon)
    .bind(&gradient)
    .bind(&image_url)
    .bind(Jsonb(&gallery))
    .fetch_one(&db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "A package with this name already exists"))?;

    Ok(Json(package))
}

// DELETE /packages/{id} - manager only
pub async fn delete_package(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can manage packages"));
    }

    let result = sqlx::query("DELETE FROM packages WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.code().as_deref() == Some("23503") => {
                AppError::conflict("Package is referenced by existing bookings")
            }
            other => other.into(),
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Package not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
