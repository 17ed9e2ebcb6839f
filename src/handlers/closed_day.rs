use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::rules::{self, ClosedDayRejection};
use crate::dtos::closed_day::CreateClosedDayRequest;
use crate::dtos::report::DateRangeQuery;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::closed_day::ClosedDay;
use crate::state::AppState;

// GET /closed-days
pub async fn list_closed_days(
    State(AppState { db_pool }): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<ClosedDay>>, AppError> {
    let mut sql = String::from(
        "SELECT id, closed_date, reason, created_at FROM closed_days WHERE 1=1",
    );
    let mut idx = 0;
    if range.from.is_some() {
        idx += 1;
        sql.push_str(&format!(" AND closed_date >= ${idx}"));
    }
    if range.to.is_some() {
        idx += 1;
        sql.push_str(&format!(" AND closed_date <= ${idx}"));
    }
    sql.push_str(" ORDER BY closed_date");

    let mut query = sqlx::query_as::<_, ClosedDay>(&sql);
    if let Some(from) = range.from {
        query = query.bind(from);
    }
    if let Some(to) = range.to {
        query = query.bind(to);
    }

    Ok(Json(query.fetch_all(&db_pool).await?))
}

// POST /closed-days - manager declares a blackout date. Duplicates are
// rejected by an existence check before the insert.
pub async fn create_closed_day(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateClosedDayRequest>,
) -> Result<(StatusCode, Json<ClosedDay>), AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can close dates"));
    }
    let already_closed: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM closed_days WHERE closed_date = $1)",
    )
    .bind(req.closed_date)
    .fetch_one(&db_pool)
    .await?;

    let reason = rules::new_closed_day(&req.reason, already_closed).map_err(|e| match e {
        ClosedDayRejection::MissingReason => AppError::validation("A reason is required"),
        ClosedDayRejection::AlreadyClosed => {
            AppError::conflict("This date is already marked as closed")
        }
    })?;

    let day = sqlx::query_as::<_, ClosedDay>(
        "INSERT INTO closed_days (closed_date, reason) VALUES ($1, $2) \
         RETURNING id, closed_date, reason, created_at",
    )
    .bind(req.closed_date)
    .bind(reason)
    .fetch_one(&db_pool)
    .await?;

    Ok((StatusCode::CREATED, Json(day)))
}

// DELETE /closed-days/{id}
pub async fn delete_closed_day(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can reopen dates"));
    }

    let result = sqlx::query("DELETE FROM closed_days WHERE id = $1")
        .bind(id)
        .execute(&db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Closed day not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
