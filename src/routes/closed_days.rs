use axum::{
    middleware,
    routing::{delete, get},
    Router,
};

use crate::handlers::closed_day::{create_closed_day, delete_closed_day, list_closed_days};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/closed-days", get(list_closed_days).post(create_closed_day))
        .route("/closed-days/{id}", delete(delete_closed_day))
        .route_layer(middleware::from_fn(require_auth))
}
