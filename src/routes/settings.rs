use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::handlers::settings::{
    get_contact_settings, get_event_images, set_event_images, update_contact_settings,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let open = Router::new()
        .route("/settings/contact", get(get_contact_settings))
        .route("/event-types/{event_type}/images", get(get_event_images));

    let protected = Router::new()
        .route("/settings/contact", put(update_contact_settings))
        .route("/event-types/{event_type}/images", put(set_event_images))
        .layer(middleware::from_fn(require_auth));

    open.merge(protected)
}
