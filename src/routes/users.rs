use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::handlers::user::{
    change_password, create_staff, get_me, list_staff, login_user, register_user,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let open = Router::new()
        .route("/users/register", post(register_user))
        .route("/users/login", post(login_user));

    let protected = Router::new()
        .route("/users/me", get(get_me))
        .route("/users/me/password", patch(change_password))
        .route("/users/staff", get(list_staff).post(create_staff))
        .layer(middleware::from_fn(require_auth));

    open.merge(protected)
}
