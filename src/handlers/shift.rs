use axum::extract::{Extension, Query, State};
use axum::Json;

use crate::domain::shifts::{week_view, WeekView};
use crate::domain::types::Role;
use crate::dtos::shift::WeekQuery;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::booking::Booking;
use crate::models::user::User;
use crate::state::AppState;

// GET /shifts/week?start=YYYY-MM-DD - staff x day assignment grid for the
// back office. The "unassigned" list is computed over all confirmed
// bookings, not just the displayed week.
pub async fn week_shifts(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<WeekQuery>,
) -> Result<Json<WeekView>, AppError> {
    if auth.role == Role::Customer {
        return Err(AppError::forbidden("Staff or manager access required"));
    }

    let staff = sqlx::query_as::<_, User>(&format!(
        "{} WHERE role = 'staff' AND is_active ORDER BY full_name",
        User::SELECT
    ))
    .fetch_all(&db_pool)
    .await?;

    let bookings = sqlx::query_as::<_, Booking>(&format!(
        "{} WHERE status = 'confirmed' AND jsonb_array_length(assigned_staff) > 0",
        Booking::SELECT
    ))
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(week_view(params.start, &staff, &bookings)))
}
