use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::auth::jwt::verify_token;
use crate::domain::types::Role;

/// Request-scoped session attached by `require_auth`. Handlers read the
/// typed role from here instead of re-parsing the token.
#[derive(Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: Role,
    pub email: String,
}

impl AuthContext {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

pub async fn require_auth(mut req: Request<axum::body::Body>, next: Next) -> Response {
    let auth_header = match req.headers().get("Authorization").and_then(|v| v.to_str().ok()) {
        Some(h) => h,
        None => return unauthorized("Missing Authorization header"),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return unauthorized("Invalid Authorization format"),
    };

    let secret = match std::env::var("JWT_SECRET") {
        Ok(s) => s,
        Err(_) => return unauthorized("Server auth misconfiguration"),
    };

    let claims = match verify_token(token, &secret) {
        Ok(c) => c,
        Err(_) => return unauthorized("Invalid or expired token"),
    };

    let role = match claims.role.parse::<Role>() {
        Ok(r) => r,
        Err(_) => return unauthorized("Unknown role in token"),
    };

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        role,
        email: claims.email,
    });

    next.run(req).await
}

fn unauthorized(msg: &str) -> Response {
    let body = axum::Json(ErrorBody { error: msg.to_string(), code: "unauthorized" });
    (StatusCode::UNAUTHORIZED, body).into_response()
}
