// src/models/closed_day.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ClosedDay {
    pub id: i64,
    pub closed_date: NaiveDate,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
