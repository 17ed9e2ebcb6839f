// src/models/settings.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;

use crate::domain::types::EventType;

/// Single-row table holding the public contact details.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ContactSettings {
    #[serde(skip_serializing)]
    pub id: i16,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub facebook: String,
    pub instagram: String,
    pub updated_at: DateTime<Utc>,
}

/// Image gallery for one of the six event categories. Independent of
/// packages.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct EventTypeImages {
    pub event_type: EventType,
    pub images: Json<Vec<String>>,
    pub updated_at: DateTime<Utc>,
}
