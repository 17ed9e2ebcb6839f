// src/models/package.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub features: Json<Vec<String>>,
    pub icon: Option<String>,
    pub gradient: Option<String>,
    /// Legacy single-image field; the write path keeps it equal to
    /// `gallery[0]` whenever the gallery is non-empty.
    pub image_url: Option<String>,
    pub gallery: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl Package {
    pub const SELECT: &'static str = "SELECT \
        id, name, description, price::FLOAT8 AS price, features, icon, \
        gradient, image_url, gallery, created_at \
        FROM packages";
}
