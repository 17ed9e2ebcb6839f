// src/models/user.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::types::Role;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub const SELECT: &'static str = "SELECT \
        id, full_name, email, phone, password_hash, role, is_active, created_at \
        FROM users";
}
