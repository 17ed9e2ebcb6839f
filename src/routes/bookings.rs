use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::booking::{
    assign_staff, cancel_booking, complete_booking, confirm_booking, create_booking,
    get_booking, list_bookings, record_payment, set_expenses, update_booking,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}", get(get_booking).patch(update_booking))
        .route("/bookings/{id}/confirm", post(confirm_booking))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/bookings/{id}/complete", post(complete_booking))
        .route("/bookings/{id}/payment", patch(record_payment))
        .route("/bookings/{id}/expenses", put(set_expenses))
        .route("/bookings/{id}/staff", put(assign_staff))
        .route_layer(middleware::from_fn(require_auth))
}
