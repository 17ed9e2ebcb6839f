// src/domain/shifts.rs
//
// Weekly staff assignment grid. Assignments come from confirmed bookings
// carrying a non-empty assigned_staff list; each (staff, booking) pair is one
// assignment bucketed by the exact event day.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::types::{BookingStatus, EventType};
use crate::models::booking::Booking;
use crate::models::user::User;

#[derive(Debug, Clone, Serialize)]
pub struct StaffAssignment {
    pub booking_id: i64,
    pub customer_name: String,
    pub event_type: EventType,
    pub event_date: NaiveDate,
    pub event_time: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffWeekRow {
    pub staff_id: i64,
    pub staff_name: String,
    /// One bucket per day of the displayed week, Sunday-relative to
    /// `week_start` (index 0 = week_start).
    pub days: Vec<Vec<StaffAssignment>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaffSummary {
    pub staff_id: i64,
    pub staff_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub rows: Vec<StaffWeekRow>,
    /// Staff with no assignment anywhere in the dataset, not just in the
    /// displayed week.
    pub unassigned: Vec<StaffSummary>,
}

/// One assignment record per (staff id, booking) pair, from confirmed
/// bookings only.
pub fn staff_assignments(bookings: &[Booking]) -> Vec<(i64, StaffAssignment)> {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .flat_map(|b| {
            b.assigned_staff.iter().map(move |staff_id| {
                (
                    *staff_id,
                    StaffAssignment {
                        booking_id: b.id,
                        customer_name: b.customer_name.clone(),
                        event_type: b.event_type,
                        event_date: b.event_date,
                        event_time: b.event_time.clone(),
                    },
                )
            })
        })
        .collect()
}

/// Build the week grid for a movable 7-day window starting at `week_start`.
pub fn week_view(week_start: NaiveDate, staff: &[User], bookings: &[Booking]) -> WeekView {
    let days: Vec<NaiveDate> = (0..7).map(|i| week_start + Duration::days(i)).collect();
    let assignments = staff_assignments(bookings);

    let mut rows = Vec::with_capacity(staff.len());
    let mut unassigned = Vec::new();

    for member in staff {
        let theirs: Vec<&StaffAssignment> = assignments
            .iter()
            .filter(|(staff_id, _)| *staff_id == member.id)
            .map(|(_, a)| a)
            .collect();

        if theirs.is_empty() {
            unassigned.push(StaffSummary {
                staff_id: member.id,
                staff_name: member.full_name.clone(),
            });
        }

        let day_buckets = days
            .iter()
            .map(|day| {
                theirs
                    .iter()
                    .filter(|a| a.event_date == *day)
                    .map(|a| (*a).clone())
                    .collect()
            })
            .collect();

        rows.push(StaffWeekRow {
            staff_id: member.id,
            staff_name: member.full_name.clone(),
            days: day_buckets,
        });
    }

    WeekView { week_start, days, rows, unassigned }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{PaymentStatus, Role};
    use sqlx::types::Json;

    fn staff_member(id: i64, name: &str) -> User {
        User {
            id,
            full_name: name.to_string(),
            email: format!("{name}@example.com").to_lowercase(),
            phone: None,
            password_hash: "x".to_string(),
            role: Role::Staff,
            is_active: true,
            created_at: chrono::Utc::now(),
        }
    }

    fn confirmed_booking(id: i64, date: &str, staff_ids: Vec<i64>) -> Booking {
        Booking {
            id,
            user_id: None,
            customer_name: format!("Customer {id}"),
            customer_email: "c@example.com".to_string(),
            customer_phone: "0917 000 0000".to_string(),
            event_type: EventType::Corporate,
            event_date: date.parse().unwrap(),
            event_time: "12:00".to_string(),
            guest_count: 30,
            location_address: "Somewhere".to_string(),
            latitude: None,
            longitude: None,
            package_id: None,
            package_name: None,
            base_price: 5000.0,
            food_addons_price: 0.0,
            service_addons_price: 0.0,
            discount: 0.0,
            total_price: 5000.0,
            final_price: None,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            amount_paid: 0.0,
            status: BookingStatus::Confirmed,
            cancel_reason: None,
            cancelled_by: None,
            cancelled_at: None,
            assigned_staff: Json(staff_ids),
            expenses: None,
            price_notes: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn assignments_flatten_one_record_per_staff_per_booking() {
        let bookings = vec![confirmed_booking(1, "2025-06-02", vec![10, 11])];
        let flat = staff_assignments(&bookings);
        assert_eq!(flat.len(), 2);
        assert!(flat.iter().any(|(id, _)| *id == 10));
        assert!(flat.iter().any(|(id, _)| *id == 11));
    }

    #[test]
    fn non_confirmed_bookings_are_ignored() {
        let mut pending = confirmed_booking(1, "2025-06-02", vec![10]);
        pending.status = BookingStatus::Pending;
        assert!(staff_assignments(&[pending]).is_empty());
    }

    #[test]
    fn week_grid_buckets_by_exact_day() {
        let staff = vec![staff_member(10, "Ana")];
        let bookings = vec![
            confirmed_booking(1, "2025-06-02", vec![10]),
            confirmed_booking(2, "2025-06-04", vec![10]),
        ];

        let view = week_view("2025-06-01".parse().unwrap(), &staff, &bookings);
        assert_eq!(view.days.len(), 7);
        let row = &view.rows[0];
        assert_eq!(row.days[1].len(), 1); // Jun 2
        assert_eq!(row.days[3].len(), 1); // Jun 4
        assert_eq!(row.days[0].len(), 0);
        assert!(view.unassigned.is_empty());
    }

    #[test]
    fn unassigned_is_global_not_scoped_to_the_week() {
        let staff = vec![staff_member(10, "Ana"), staff_member(11, "Ben")];
        // Ana's only assignment is months away from the displayed week.
        let bookings = vec![confirmed_booking(1, "2025-09-20", vec![10])];

        let view = week_view("2025-06-01".parse().unwrap(), &staff, &bookings);
        assert!(view.rows.iter().all(|r| r.days.iter().all(Vec::is_empty)));

        let unassigned: Vec<i64> = view.unassigned.iter().map(|s| s.staff_id).collect();
        assert_eq!(unassigned, vec![11]);
    }
}
