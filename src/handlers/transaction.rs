use axum::extract::{Extension, Query, State};
use axum::Json;
use sqlx::PgPool;

use crate::dtos::report::{DateRangeQuery, TransactionSummaryResponse};
use crate::domain::reports::summarize_transactions;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::transaction::Transaction;
use crate::state::AppState;

/// Transactions are row-level filtered by the owning manager, then by the
/// completed-at date range. Dates are compared in UTC so the query matches
/// the in-memory reducer regardless of the session timezone.
pub(crate) async fn fetch_transactions(
    db_pool: &PgPool,
    manager_id: i64,
    range: DateRangeQuery,
) -> Result<Vec<Transaction>, AppError> {
    let mut sql = format!("{} WHERE manager_id = $1", Transaction::SELECT);
    let mut idx = 1;
    if range.from.is_some() {
        idx += 1;
        sql.push_str(&format!(" AND (completed_at AT TIME ZONE 'UTC')::date >= ${idx}"));
    }
    if range.to.is_some() {
        idx += 1;
        sql.push_str(&format!(" AND (completed_at AT TIME ZONE 'UTC')::date <= ${idx}"));
    }
    sql.push_str(" ORDER BY completed_at DESC, id DESC");

    let mut query = sqlx::query_as::<_, Transaction>(&sql).bind(manager_id);
    if let Some(from) = range.from {
        query = query.bind(from);
    }
    if let Some(to) = range.to {
        query = query.bind(to);
    }

    Ok(query.fetch_all(db_pool).await?)
}

// GET /transactions?from=&to=
pub async fn list_transactions(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can view transactions"));
    }

    let transactions = fetch_transactions(&db_pool, auth.user_id, range).await?;
    Ok(Json(transactions))
}

// GET /transactions/summary?from=&to=
pub async fn transaction_summary(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<TransactionSummaryResponse>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can view transactions"));
    }

    let transactions = fetch_transactions(&db_pool, auth.user_id, range).await?;
    let totals = summarize_transactions(&transactions, range.from, range.to);

    Ok(Json(TransactionSummaryResponse {
        from: range.from,
        to: range.to,
        totals,
    }))
}
