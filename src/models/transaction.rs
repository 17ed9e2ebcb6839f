// src/models/transaction.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::types::EventType;

/// Denormalized financial snapshot created when a booking is completed.
/// Never re-synced if the booking changes afterwards.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub booking_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub event_type: EventType,
    pub package_name: Option<String>,
    pub amount: f64,
    pub downpayment: f64,
    pub remaining_balance: f64,
    pub total_expenses: f64,
    pub profit: f64,
    pub status: String,
    pub event_date: NaiveDate,
    pub completed_at: DateTime<Utc>,
    pub manager_id: i64,
}

impl Transaction {
    pub const SELECT: &'static str = "SELECT \
        id, booking_id, customer_name, customer_email, event_type, package_name, \
        amount::FLOAT8 AS amount, \
        downpayment::FLOAT8 AS downpayment, \
        remaining_balance::FLOAT8 AS remaining_balance, \
        total_expenses::FLOAT8 AS total_expenses, \
        profit::FLOAT8 AS profit, \
        status, event_date, completed_at, manager_id \
        FROM transactions";
}
