use axum::{middleware, routing::get, Router};

use crate::handlers::shift::week_shifts;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shifts/week", get(week_shifts))
        .route_layer(middleware::from_fn(require_auth))
}
