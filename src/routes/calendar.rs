use axum::{middleware, routing::get, Router};

use crate::handlers::calendar::month_view;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/calendar", get(month_view))
        .route_layer(middleware::from_fn(require_auth))
}
