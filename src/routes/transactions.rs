use axum::{middleware, routing::get, Router};

use crate::handlers::export::export_transactions_csv;
use crate::handlers::transaction::{list_transactions, transaction_summary};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions/summary", get(transaction_summary))
        .route("/transactions/export.csv", get(export_transactions_csv))
        .route_layer(middleware::from_fn(require_auth))
}
