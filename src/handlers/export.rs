use axum::extract::{Extension, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::domain::reports::{summarize_bookings, summarize_transactions};
use crate::dtos::report::DateRangeQuery;
use crate::error::AppError;
use crate::handlers::report::fetch_report_bookings;
use crate::handlers::transaction::fetch_transactions;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

fn csv_response(filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

// GET /reports/export.csv?from=&to= - same query and same reducer as the
// JSON summary, so exported totals always match the on-screen totals.
pub async fn export_report_csv(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Response, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can export reports"));
    }

    let bookings = fetch_report_bookings(&db_pool, range).await?;
    let totals = summarize_bookings(&bookings, range.from, range.to);

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(vec![]);
    writer
        .write_record([
            "id",
            "event_date",
            "customer",
            "event_type",
            "status",
            "total_price",
            "discount",
            "revenue",
            "amount_paid",
            "outstanding",
            "expenses",
        ])
        .map_err(|e| AppError::internal(format!("CSV error: {e}")))?;

    for b in &bookings {
        writer
            .write_record([
                b.id.to_string(),
                b.event_date.to_string(),
                b.customer_name.clone(),
                b.event_type.to_string(),
                b.status.to_string(),
                money(b.total_price),
                money(b.discount),
                money(b.revenue_amount()),
                money(b.amount_paid),
                money(b.outstanding()),
                money(b.expense_total()),
            ])
            .map_err(|e| AppError::internal(format!("CSV error: {e}")))?;
    }

    writer
        .write_record(["", ""])
        .and_then(|_| writer.write_record(["revenue", &money(totals.revenue)]))
        .and_then(|_| writer.write_record(["expenses", &money(totals.expenses)]))
        .and_then(|_| writer.write_record(["outstanding", &money(totals.outstanding)]))
        .and_then(|_| writer.write_record(["profit", &money(totals.profit)]))
        .map_err(|e| AppError::internal(format!("CSV error: {e}")))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV error: {e}")))?;

    Ok(csv_response("report.csv", bytes))
}

// GET /transactions/export.csv?from=&to=
pub async fn export_transactions_csv(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Response, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can export transactions"));
    }

    let transactions = fetch_transactions(&db_pool, auth.user_id, range).await?;
    let totals = summarize_transactions(&transactions, range.from, range.to);

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(vec![]);
    writer
        .write_record([
            "id",
            "booking_id",
            "completed_at",
            "event_date",
            "customer",
            "event_type",
            "package",
            "amount",
            "downpayment",
            "remaining_balance",
            "expenses",
            "profit",
        ])
        .map_err(|e| AppError::internal(format!("CSV error: {e}")))?;

    for t in &transactions {
        writer
            .write_record([
                t.id.to_string(),
                t.booking_id.to_string(),
                t.completed_at.to_rfc3339(),
                t.event_date.to_string(),
                t.customer_name.clone(),
                t.event_type.to_string(),
                t.package_name.clone().unwrap_or_default(),
                money(t.amount),
                money(t.downpayment),
                money(t.remaining_balance),
                money(t.total_expenses),
                money(t.profit),
            ])
            .map_err(|e| AppError::internal(format!("CSV error: {e}")))?;
    }

    writer
        .write_record(["", ""])
        .and_then(|_| writer.write_record(["amount", &money(totals.amount)]))
        .and_then(|_| writer.write_record(["expenses", &money(totals.expenses)]))
        .and_then(|_| writer.write_record(["profit", &money(totals.profit)]))
        .map_err(|e| AppError::internal(format!("CSV error: {e}")))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV error: {e}")))?;

    Ok(csv_response("transactions.csv", bytes))
}
