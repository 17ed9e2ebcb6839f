pub mod bookings;
pub mod calendar;
pub mod closed_days;
pub mod packages;
pub mod reports;
pub mod settings;
pub mod shifts;
pub mod transactions;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(packages::routes())
        .merge(bookings::routes())
        .merge(closed_days::routes())
        .merge(calendar::routes())
        .merge(reports::routes())
        .merge(transactions::routes())
        .merge(shifts::routes())
        .merge(settings::routes())
}
