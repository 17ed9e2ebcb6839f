use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::Json;
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::auth::jwt::{sign_token, TOKEN_LIFETIME_SECONDS};
use crate::domain::types::Role;
use crate::dtos::user::{
    ChangePasswordRequest, CreateStaffRequest, LoginRequest, LoginResponse, RegisterRequest,
    UserResponse,
};
use crate::error::AppError;
use crate::handlers::map_unique_violation;
use crate::middleware::auth::AuthContext;
use crate::models::user::User;
use crate::state::AppState;

fn validate_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email is required"));
    }
    if password.len() < 6 {
        return Err(AppError::validation("Password too short"));
    }
    Ok(())
}

// POST /users/register - public signup, always a customer account
pub async fn register_user(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    if payload.full_name.trim().is_empty() {
        return Err(AppError::validation("Name required"));
    }
    validate_credentials(&payload.email, &payload.password)?;

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (full_name, email, phone, password_hash, role) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, full_name, email, phone, password_hash, role, is_active, created_at",
    )
    .bind(payload.full_name.trim())
    .bind(payload.email.trim().to_lowercase())
    .bind(&payload.phone)
    .bind(&password_hash)
    .bind(Role::Customer)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "Email already registered"))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// POST /users/staff - manager creates back-office accounts
pub async fn create_staff(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateStaffRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can create staff accounts"));
    }
    if payload.role == Role::Customer {
        return Err(AppError::validation("Use /users/register for customer accounts"));
    }
    if payload.full_name.trim().is_empty() {
        return Err(AppError::validation("Name required"));
    }
    validate_credentials(&payload.email, &payload.password)?;

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (full_name, email, phone, password_hash, role) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, full_name, email, phone, password_hash, role, is_active, created_at",
    )
    .bind(payload.full_name.trim())
    .bind(payload.email.trim().to_lowercase())
    .bind(&payload.phone)
    .bind(&password_hash)
    .bind(payload.role)
    .fetch_one(&db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "Email already registered"))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// POST /users/login
pub async fn login_user(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::validation("Email required"));
    }
    if payload.password.is_empty() {
        return Err(AppError::validation("Password required"));
    }

    let user = sqlx::query_as::<_, User>(&format!("{} WHERE email = $1", User::SELECT))
        .bind(payload.email.trim().to_lowercase())
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    if !user.is_active {
        return Err(AppError::forbidden("Account is deactivated"));
    }

    let ok = verify(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !ok {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = sign_token(user.id, user.role, &user.email, &secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_LIFETIME_SECONDS,
    }))
}

// GET /users/me
pub async fn get_me(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!("{} WHERE id = $1", User::SELECT))
        .bind(auth.user_id)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}

// PATCH /users/me/password - requires re-verifying the current password
pub async fn change_password(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    if payload.new_password.len() < 6 {
        return Err(AppError::validation("Password too short"));
    }

    let user = sqlx::query_as::<_, User>(&format!("{} WHERE id = $1", User::SELECT))
        .bind(auth.user_id)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let ok = verify(&payload.current_password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;
    if !ok {
        return Err(AppError::unauthorized("Current password is incorrect"));
    }

    let password_hash = hash(&payload.new_password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(auth.user_id)
        .bind(&password_hash)
        .execute(&db_pool)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// GET /users/staff - manager lists active staff accounts
pub async fn list_staff(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    if !auth.is_manager() {
        return Err(AppError::forbidden("Only managers can list staff"));
    }

    let staff = sqlx::query_as::<_, User>(&format!(
        "{} WHERE role = $1 AND is_active ORDER BY full_name",
        User::SELECT
    ))
    .bind(Role::Staff)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(staff.into_iter().map(UserResponse::from).collect()))
}
