// src/models/booking.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::types::Json;

use crate::domain::expenses::{expense_total, Expenses};
use crate::domain::types::{BookingStatus, EventType, PaymentStatus};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Booking {
    pub id: i64,
    pub user_id: Option<i64>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub event_type: EventType,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub guest_count: i32,
    pub location_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub package_id: Option<i64>,
    pub package_name: Option<String>,
    pub base_price: f64,
    pub food_addons_price: f64,
    pub service_addons_price: f64,
    pub discount: f64,
    pub total_price: f64,
    pub final_price: Option<f64>,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    pub amount_paid: f64,
    pub status: BookingStatus,
    pub cancel_reason: Option<String>,
    pub cancelled_by: Option<i64>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub assigned_staff: Json<Vec<i64>>,
    pub expenses: Option<Json<Expenses>>,
    pub price_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Column list with NUMERIC fields cast to FLOAT8 so runtime queries can
    /// decode them as f64.
    pub const SELECT: &'static str = "SELECT \
        id, user_id, customer_name, customer_email, customer_phone, \
        event_type, event_date, event_time, guest_count, location_address, \
        latitude, longitude, package_id, package_name, \
        base_price::FLOAT8 AS base_price, \
        food_addons_price::FLOAT8 AS food_addons_price, \
        service_addons_price::FLOAT8 AS service_addons_price, \
        discount::FLOAT8 AS discount, \
        total_price::FLOAT8 AS total_price, \
        final_price::FLOAT8 AS final_price, \
        payment_status, payment_method, \
        amount_paid::FLOAT8 AS amount_paid, \
        status, cancel_reason, cancelled_by, cancelled_at, \
        assigned_staff, expenses, price_notes, created_at \
        FROM bookings";

    /// Price after discount.
    pub fn net_price(&self) -> f64 {
        self.total_price - self.discount
    }

    /// Revenue attributed to this booking: the post-event adjusted price when
    /// one was recorded, otherwise the discounted total.
    pub fn revenue_amount(&self) -> f64 {
        self.final_price.unwrap_or_else(|| self.net_price())
    }

    /// Uncollected balance, floored at zero.
    pub fn outstanding(&self) -> f64 {
        (self.net_price() - self.amount_paid).max(0.0)
    }

    pub fn expense_total(&self) -> f64 {
        expense_total(self.expenses.as_deref())
    }
}
