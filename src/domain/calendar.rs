// src/domain/calendar.rs
//
// Month view assembly. The grid is always 6 weeks of 7 days starting on a
// Sunday, padded with days from the adjacent months, which is how the booking
// calendar has always rendered.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::booking::Booking;
use crate::models::closed_day::ClosedDay;

pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// False for the padding cells taken from the adjacent months.
    pub in_month: bool,
    pub is_closed: bool,
    pub closed_reason: Option<String>,
    pub bookings: Vec<CalendarBooking>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarBooking {
    pub id: i64,
    pub customer_name: String,
    pub event_type: crate::domain::types::EventType,
    pub event_time: String,
    pub status: crate::domain::types::BookingStatus,
    pub guest_count: i32,
}

/// The 42 consecutive dates shown for a month, starting on the Sunday on or
/// before the 1st. Returns None for an invalid year/month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = first.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(offset);
    Some((0..GRID_CELLS as i64).map(|i| start + Duration::days(i)).collect())
}

/// Bucket bookings and closed days into the month grid. A closed day wins
/// over any bookings that happen to exist on the same date: the cell reports
/// the closure reason and suppresses the bookings.
pub fn assemble_month(
    year: i32,
    month: u32,
    bookings: &[Booking],
    closed_days: &[ClosedDay],
) -> Option<Vec<CalendarCell>> {
    let grid = month_grid(year, month)?;

    let closed_by_date: HashMap<NaiveDate, &str> = closed_days
        .iter()
        .map(|day| (day.closed_date, day.reason.as_str()))
        .collect();

    let cells = grid
        .into_iter()
        .map(|date| {
            if let Some(reason) = closed_by_date.get(&date) {
                return CalendarCell {
                    date,
                    in_month: date.month() == month,
                    is_closed: true,
                    closed_reason: Some((*reason).to_string()),
                    bookings: Vec::new(),
                };
            }

            let day_bookings = bookings
                .iter()
                .filter(|b| b.event_date == date)
                .map(|b| CalendarBooking {
                    id: b.id,
                    customer_name: b.customer_name.clone(),
                    event_type: b.event_type,
                    event_time: b.event_time.clone(),
                    status: b.status,
                    guest_count: b.guest_count,
                })
                .collect();

            CalendarCell {
                date,
                in_month: date.month() == month,
                is_closed: false,
                closed_reason: None,
                bookings: day_bookings,
            }
        })
        .collect();

    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn booking_on(id: i64, date: &str) -> Booking {
        use crate::domain::types::{BookingStatus, EventType, PaymentStatus};
        use sqlx::types::Json;

        Booking {
            id,
            user_id: None,
            customer_name: format!("Customer {id}"),
            customer_email: "c@example.com".to_string(),
            customer_phone: "0917 000 0000".to_string(),
            event_type: EventType::Birthday,
            event_date: date.parse().unwrap(),
            event_time: "18:00".to_string(),
            guest_count: 50,
            location_address: "Somewhere".to_string(),
            latitude: None,
            longitude: None,
            package_id: None,
            package_name: None,
            base_price: 10000.0,
            food_addons_price: 0.0,
            service_addons_price: 0.0,
            discount: 0.0,
            total_price: 10000.0,
            final_price: None,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            amount_paid: 0.0,
            status: BookingStatus::Confirmed,
            cancel_reason: None,
            cancelled_by: None,
            cancelled_at: None,
            assigned_staff: Json(Vec::new()),
            expenses: None,
            price_notes: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn closed_on(id: i64, date: &str, reason: &str) -> ClosedDay {
        ClosedDay {
            id,
            closed_date: date.parse().unwrap(),
            reason: reason.to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn grid_has_42_consecutive_cells() {
        for (year, month) in [(2025, 3), (2025, 12), (2024, 2), (2026, 1)] {
            let grid = month_grid(year, month).unwrap();
            assert_eq!(grid.len(), GRID_CELLS);
            assert_eq!(grid[0].weekday(), Weekday::Sun);
            for pair in grid.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
        }
    }

    #[test]
    fn first_of_month_lands_on_its_weekday_column() {
        // March 1st 2025 is a Saturday, column index 6.
        let grid = month_grid(2025, 3).unwrap();
        let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let pos = grid.iter().position(|d| *d == first).unwrap();
        assert_eq!(pos % 7, first.weekday().num_days_from_sunday() as usize);
        // The 1st always falls in the leading week.
        assert!(pos < 7);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(month_grid(2025, 0).is_none());
        assert!(month_grid(2025, 13).is_none());
    }

    #[test]
    fn bookings_bucket_by_exact_day() {
        let bookings = vec![booking_on(1, "2025-03-15"), booking_on(2, "2025-03-15"), booking_on(3, "2025-03-16")];
        let cells = assemble_month(2025, 3, &bookings, &[]).unwrap();

        let cell = cells.iter().find(|c| c.date.to_string() == "2025-03-15").unwrap();
        assert_eq!(cell.bookings.len(), 2);
        assert!(cell.in_month);

        let other = cells.iter().find(|c| c.date.to_string() == "2025-03-16").unwrap();
        assert_eq!(other.bookings.len(), 1);
    }

    #[test]
    fn closed_day_suppresses_bookings_on_the_same_date() {
        let bookings = vec![booking_on(1, "2025-12-25")];
        let closed = vec![closed_on(1, "2025-12-25", "Holiday")];
        let cells = assemble_month(2025, 12, &bookings, &closed).unwrap();

        let cell = cells.iter().find(|c| c.date.to_string() == "2025-12-25").unwrap();
        assert!(cell.is_closed);
        assert_eq!(cell.closed_reason.as_deref(), Some("Holiday"));
        assert!(cell.bookings.is_empty());
    }

    #[test]
    fn padding_cells_are_marked_out_of_month() {
        let cells = assemble_month(2025, 3, &[], &[]).unwrap();
        // March 2025 starts on a Saturday, so the leading week is padding
        // from February.
        assert!(!cells[0].in_month);
        assert_eq!(cells[0].date.to_string(), "2025-02-23");
        assert!(cells.iter().filter(|c| c.in_month).count() == 31);
    }
}
