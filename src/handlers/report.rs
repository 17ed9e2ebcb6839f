use axum::extract::{Extension, Query, State};
use axum::Json;
use sqlx::PgPool;

use crate::domain::reports::summarize_bookings;
use crate::dtos::report::{DateRangeQuery, ReportSummaryResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::booking::Booking;
use crate::state::AppState;

/// Range query shared by the JSON summary and the CSV export so both always
/// operate on the same rows.
pub(crate) async fn fetch_report_bookings(
    db_pool: &PgPool,
    range: DateRangeQuery,
) -> Result<Vec<Booking>, AppError> {
    let mut sql = format!("{} WHERE 1=1", Booking::SELECT);
    let mut idx = 0;
    if range.from.is_some() {
        idx += 1;
        sql.push_str(&format!(" AND event_date >= ${idx}"));
    }
    if range.to.is_some() {
        idx += 1;
        sql.push_str(&format!(" AND event_date <= ${idx}"));
    }
    sql.push_str(" ORDER BY event_date, id");

    let mut query = sqlx::query_as::<_, Booking>(&sql);
    if let Some(from) = range.from {
        query = query.bind(from);
    }
    if let Some(to) = range.to {
        query = query.bind(to);
    }

    Ok(query.fetch_all(db_pool).await?)
}

// GET /reports/summary?from=&to= - manager financial overview over bookings
// in the event-date range
pub async fn report_summary(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<ReportSummaryResponse>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can view reports"));
    }

    let bookings = fetch_report_bookings(&db_pool, range).await?;
    let totals = summarize_bookings(&bookings, range.from, range.to);

    Ok(Json(ReportSummaryResponse {
        from: range.from,
        to: range.to,
        totals,
    }))
}
