use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::handlers::package::{
    create_package, delete_package, get_package, list_packages, update_package,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // The catalog is part of the public marketing pages.
    let open = Router::new()
        .route("/packages", get(list_packages))
        .route("/packages/{id}", get(get_package));

    let protected = Router::new()
        .route("/packages", post(create_package))
        .route("/packages/{id}", put(update_package).delete(delete_package))
        .layer(middleware::from_fn(require_auth));

    open.merge(protected)
}
