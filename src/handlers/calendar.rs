use axum::extract::{Query, State};
use axum::Json;

use crate::domain::calendar::{assemble_month, month_grid};
use crate::dtos::calendar::{CalendarQuery, CalendarResponse};
use crate::error::AppError;
use crate::models::booking::Booking;
use crate::models::closed_day::ClosedDay;
use crate::state::AppState;

// GET /calendar?year=&month= - month availability grid. Fetches the exact
// date window of the 42-cell grid, padding days included.
pub async fn month_view(
    State(AppState { db_pool }): State<AppState>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let grid = month_grid(params.year, params.month)
        .ok_or_else(|| AppError::validation("Invalid year/month"))?;
    let (grid_start, grid_end) = (grid[0], grid[grid.len() - 1]);

    // Cancelled and completed bookings are not shown on the availability
    // calendar.
    let bookings = sqlx::query_as::<_, Booking>(&format!(
        "{} WHERE event_date BETWEEN $1 AND $2 AND status IN ('pending', 'confirmed') \
         ORDER BY event_date, event_time",
        Booking::SELECT
    ))
    .bind(grid_start)
    .bind(grid_end)
    .fetch_all(&db_pool)
    .await?;

    let closed_days = sqlx::query_as::<_, ClosedDay>(
        "SELECT id, closed_date, reason, created_at FROM closed_days \
         WHERE closed_date BETWEEN $1 AND $2",
    )
    .bind(grid_start)
    .bind(grid_end)
    .fetch_all(&db_pool)
    .await?;

    let cells = assemble_month(params.year, params.month, &bookings, &closed_days)
        .ok_or_else(|| AppError::validation("Invalid year/month"))?;

    Ok(Json(CalendarResponse {
        year: params.year,
        month: params.month,
        cells,
    }))
}
