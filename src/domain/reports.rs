// src/domain/reports.rs
//
// The one reducer shared by the reports, accounting and transactions screens
// and their CSV exports. Revenue is always price-after-discount, expenses
// always go through the expense normalizer, and profit is always
// revenue - expenses. Remaining balance is a collections figure, never a
// cost, so it must not appear in any profit calculation.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::types::BookingStatus;
use crate::models::booking::Booking;
use crate::models::transaction::Transaction;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct ReportTotals {
    pub revenue: f64,
    pub expenses: f64,
    pub outstanding: f64,
    pub profit: f64,
    pub total_bookings: usize,
    pub counted_bookings: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct TransactionTotals {
    pub amount: f64,
    pub expenses: f64,
    pub profit: f64,
    pub count: usize,
}

pub fn in_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if let Some(from) = from {
        if date < from {
            return false;
        }
    }
    if let Some(to) = to {
        if date > to {
            return false;
        }
    }
    true
}

/// Bookings counted toward revenue and expenses: confirmed or completed.
/// Outstanding is wider: any non-cancelled booking may still owe money.
fn counts_toward_revenue(b: &Booking) -> bool {
    matches!(b.status, BookingStatus::Confirmed | BookingStatus::Completed)
}

/// Reduce a booking list to the report totals for a date range. The range is
/// applied against the event date here as well as in the query layer, so the
/// CSV export path can re-run the identical filter over the in-memory list.
pub fn summarize_bookings(
    bookings: &[Booking],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> ReportTotals {
    let in_scope: Vec<&Booking> = bookings
        .iter()
        .filter(|b| in_range(b.event_date, from, to))
        .collect();

    let mut totals = ReportTotals {
        total_bookings: in_scope.len(),
        ..ReportTotals::default()
    };

    for booking in in_scope {
        if booking.status != BookingStatus::Cancelled {
            totals.outstanding += booking.outstanding();
        }
        if !counts_toward_revenue(booking) {
            continue;
        }
        totals.counted_bookings += 1;
        totals.revenue += booking.revenue_amount();
        totals.expenses += booking.expense_total();
    }

    totals.profit = totals.revenue - totals.expenses;
    totals
}

/// Reduce transaction snapshots for a completed-at date range.
pub fn summarize_transactions(
    transactions: &[Transaction],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> TransactionTotals {
    let mut totals = TransactionTotals::default();

    for tx in transactions
        .iter()
        .filter(|t| in_range(t.completed_at.date_naive(), from, to))
    {
        totals.count += 1;
        totals.amount += tx.amount;
        totals.expenses += tx.total_expenses;
        totals.profit += tx.profit;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expenses::{ExpenseItem, Expenses};
    use crate::domain::types::{EventType, PaymentStatus};
    use sqlx::types::Json;

    fn booking(date: &str, total: f64, discount: f64, paid: f64, status: BookingStatus) -> Booking {
        Booking {
            id: 1,
            user_id: None,
            customer_name: "Customer".to_string(),
            customer_email: "c@example.com".to_string(),
            customer_phone: "0917 000 0000".to_string(),
            event_type: EventType::Wedding,
            event_date: date.parse().unwrap(),
            event_time: "17:00".to_string(),
            guest_count: 100,
            location_address: "Somewhere".to_string(),
            latitude: None,
            longitude: None,
            package_id: None,
            package_name: None,
            base_price: total,
            food_addons_price: 0.0,
            service_addons_price: 0.0,
            discount,
            total_price: total,
            final_price: None,
            payment_status: PaymentStatus::Partial,
            payment_method: None,
            amount_paid: paid,
            status,
            cancel_reason: None,
            cancelled_by: None,
            cancelled_at: None,
            assigned_staff: Json(Vec::new()),
            expenses: None,
            price_notes: None,
            created_at: chrono::Utc::now(),
        }
    }

    fn march() -> (Option<NaiveDate>, Option<NaiveDate>) {
        (Some("2025-03-01".parse().unwrap()), Some("2025-03-31".parse().unwrap()))
    }

    #[test]
    fn confirmed_booking_counts_toward_revenue_and_outstanding() {
        // totalPrice=50000, discount=5000, amountPaid=20000, confirmed.
        let rows = vec![booking("2025-03-15", 50000.0, 5000.0, 20000.0, BookingStatus::Confirmed)];
        let (from, to) = march();

        let totals = summarize_bookings(&rows, from, to);
        assert_eq!(totals.revenue, 45000.0);
        assert_eq!(totals.outstanding, 25000.0);
        assert_eq!(totals.counted_bookings, 1);
    }

    #[test]
    fn out_of_range_booking_is_excluded() {
        let rows = vec![booking("2025-03-15", 50000.0, 5000.0, 20000.0, BookingStatus::Confirmed)];
        let october = summarize_bookings(
            &rows,
            Some("2025-10-01".parse().unwrap()),
            Some("2025-10-31".parse().unwrap()),
        );
        assert_eq!(october.revenue, 0.0);
        assert_eq!(october.total_bookings, 0);
    }

    #[test]
    fn pending_and_cancelled_do_not_count_toward_revenue() {
        let rows = vec![
            booking("2025-03-10", 10000.0, 0.0, 0.0, BookingStatus::Pending),
            booking("2025-03-11", 20000.0, 0.0, 0.0, BookingStatus::Cancelled),
        ];
        let (from, to) = march();
        let totals = summarize_bookings(&rows, from, to);
        assert_eq!(totals.revenue, 0.0);
        assert_eq!(totals.total_bookings, 2);
        assert_eq!(totals.counted_bookings, 0);
        // The cancelled balance is written off; the pending one is still owed.
        assert_eq!(totals.outstanding, 10000.0);
    }

    #[test]
    fn pending_unpaid_balance_counts_as_outstanding() {
        let rows = vec![booking("2025-03-15", 50000.0, 5000.0, 20000.0, BookingStatus::Pending)];
        let (from, to) = march();

        let totals = summarize_bookings(&rows, from, to);
        assert_eq!(totals.revenue, 0.0);
        assert_eq!(totals.outstanding, 25000.0);
        assert_eq!(totals.counted_bookings, 0);
    }

    #[test]
    fn both_expense_shapes_feed_the_same_total() {
        let mut itemized = booking("2025-03-05", 40000.0, 0.0, 0.0, BookingStatus::Completed);
        itemized.expenses = Some(Json(Expenses::Itemized(vec![
            ExpenseItem { amount: 1000.0, description: None, category: None, date: None },
            ExpenseItem { amount: 2500.0, description: None, category: None, date: None },
        ])));

        let mut flat = booking("2025-03-06", 30000.0, 0.0, 0.0, BookingStatus::Completed);
        flat.expenses = Some(Json(Expenses::Flat(3000.0)));

        let (from, to) = march();
        let totals = summarize_bookings(&[itemized, flat], from, to);
        assert_eq!(totals.expenses, 6500.0);
        assert_eq!(totals.profit, 70000.0 - 6500.0);
    }

    #[test]
    fn profit_is_revenue_minus_expenses_not_downpayment() {
        let mut row = booking("2025-03-20", 50000.0, 0.0, 30000.0, BookingStatus::Completed);
        row.expenses = Some(Json(Expenses::Flat(10000.0)));

        let (from, to) = march();
        let totals = summarize_bookings(&[row], from, to);
        // amount_paid must have no effect on profit.
        assert_eq!(totals.profit, 40000.0);
    }

    #[test]
    fn final_price_overrides_discounted_total() {
        let mut row = booking("2025-03-21", 50000.0, 5000.0, 0.0, BookingStatus::Completed);
        row.final_price = Some(48000.0);

        let (from, to) = march();
        let totals = summarize_bookings(&[row], from, to);
        assert_eq!(totals.revenue, 48000.0);
    }

    #[test]
    fn overpaid_booking_never_produces_negative_outstanding() {
        let rows = vec![booking("2025-03-15", 10000.0, 0.0, 12000.0, BookingStatus::Confirmed)];
        let (from, to) = march();
        assert_eq!(summarize_bookings(&rows, from, to).outstanding, 0.0);
    }

    #[test]
    fn transaction_summary_filters_on_completed_at() {
        let tx = Transaction {
            id: 1,
            booking_id: 9,
            customer_name: "Customer".to_string(),
            customer_email: "c@example.com".to_string(),
            event_type: EventType::Corporate,
            package_name: None,
            amount: 45000.0,
            downpayment: 20000.0,
            remaining_balance: 25000.0,
            total_expenses: 5000.0,
            profit: 40000.0,
            status: "completed".to_string(),
            event_date: "2025-03-15".parse().unwrap(),
            completed_at: "2025-03-18T10:00:00Z".parse().unwrap(),
            manager_id: 2,
        };

        let (from, to) = march();
        let totals = summarize_transactions(&[tx.clone()], from, to);
        assert_eq!(totals.amount, 45000.0);
        assert_eq!(totals.profit, 40000.0);
        assert_eq!(totals.count, 1);

        let april = summarize_transactions(
            &[tx],
            Some("2025-04-01".parse().unwrap()),
            None,
        );
        assert_eq!(april.count, 0);
    }

    #[test]
    fn completed_at_range_is_evaluated_in_utc() {
        let mut tx = Transaction {
            id: 1,
            booking_id: 9,
            customer_name: "Customer".to_string(),
            customer_email: "c@example.com".to_string(),
            event_type: EventType::Corporate,
            package_name: None,
            amount: 45000.0,
            downpayment: 20000.0,
            remaining_balance: 25000.0,
            total_expenses: 5000.0,
            profit: 40000.0,
            status: "completed".to_string(),
            event_date: "2025-03-15".parse().unwrap(),
            // Local April 1st, but still March 31st in UTC.
            completed_at: "2025-04-01T00:30:00+02:00".parse().unwrap(),
            manager_id: 2,
        };

        let (from, to) = march();
        assert_eq!(summarize_transactions(&[tx.clone()], from, to).count, 1);

        tx.completed_at = "2025-04-01T00:30:00Z".parse().unwrap();
        assert_eq!(summarize_transactions(&[tx], from, to).count, 0);
    }
}
