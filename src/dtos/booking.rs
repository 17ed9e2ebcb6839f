use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::expenses::Expenses;
use crate::domain::types::{BookingStatus, EventType};

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub event_type: EventType,
    pub event_date: NaiveDate,
    /// 24h "HH:MM".
    pub event_time: String,
    pub guest_count: i32,
    pub location_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub package_id: Option<i64>,
    /// Required when no package is selected; ignored otherwise.
    pub base_price: Option<f64>,
    pub food_addons_price: Option<f64>,
    pub service_addons_price: Option<f64>,
    pub discount: Option<f64>,
    pub price_notes: Option<String>,
}

/// Manager edit of commercial and scheduling fields. Absent fields are left
/// untouched.
#[derive(Deserialize)]
pub struct UpdateBookingRequest {
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub guest_count: Option<i32>,
    pub location_address: Option<String>,
    pub food_addons_price: Option<f64>,
    pub service_addons_price: Option<f64>,
    pub discount: Option<f64>,
    pub final_price: Option<f64>,
    pub price_notes: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelBookingRequest {
    pub reason: String,
}

#[derive(Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: f64,
    pub payment_method: Option<String>,
}

#[derive(Deserialize)]
pub struct SetExpensesRequest {
    /// Either a bare number (legacy shape) or an itemized list.
    pub expenses: Expenses,
}

#[derive(Deserialize)]
pub struct AssignStaffRequest {
    pub staff_ids: Vec<i64>,
}

#[derive(Deserialize)]
pub struct CompleteBookingRequest {
    /// Post-event price adjustment; defaults to totalPrice - discount.
    pub final_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
