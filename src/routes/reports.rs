use axum::{middleware, routing::get, Router};

use crate::handlers::export::export_report_csv;
use crate::handlers::report::report_summary;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/summary", get(report_summary))
        .route("/reports/export.csv", get(export_report_csv))
        .route_layer(middleware::from_fn(require_auth))
}
