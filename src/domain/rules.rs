// src/domain/rules.rs
//
// Write-path rules for bookings, closed days and packages. Each rule is a
// pure function so the policy stays pinned by unit tests independently of
// the handlers that apply it.

use crate::domain::types::PaymentStatus;

/// A cancellation must carry a reason. Returns the trimmed reason; checked
/// before anything is written.
pub fn cancel_reason(raw: &str) -> Result<&str, String> {
    let reason = raw.trim();
    if reason.is_empty() {
        return Err("A cancellation reason is required".to_string());
    }
    Ok(reason)
}

/// Why a closed-day request was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum ClosedDayRejection {
    MissingReason,
    AlreadyClosed,
}

/// One blackout row per calendar date, reason required. The caller supplies
/// the result of the existence check; on success the trimmed reason is
/// returned for insertion.
pub fn new_closed_day(raw_reason: &str, already_closed: bool) -> Result<&str, ClosedDayRejection> {
    let reason = raw_reason.trim();
    if reason.is_empty() {
        return Err(ClosedDayRejection::MissingReason);
    }
    if already_closed {
        return Err(ClosedDayRejection::AlreadyClosed);
    }
    Ok(reason)
}

/// The legacy single-image field mirrors the head of the gallery.
pub fn main_image(gallery: &[String]) -> Option<&String> {
    gallery.first()
}

/// Apply a collected payment. `amount_paid` only ever grows and may never
/// exceed the discounted price.
pub fn register_payment(
    current_paid: f64,
    payment: f64,
    net_price: f64,
) -> Result<(f64, PaymentStatus), String> {
    if payment <= 0.0 {
        return Err("Payment amount must be greater than 0".to_string());
    }
    let new_amount_paid = current_paid + payment;
    if new_amount_paid > net_price {
        return Err(format!(
            "Total payment ({new_amount_paid}) would exceed the discounted price ({net_price})"
        ));
    }
    let status = if new_amount_paid >= net_price {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Partial
    };
    Ok((new_amount_paid, status))
}

/// Figures stamped onto the transaction snapshot when a booking completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionFigures {
    pub amount: f64,
    pub downpayment: f64,
    pub remaining_balance: f64,
    pub total_expenses: f64,
    pub profit: f64,
    pub payment_status: PaymentStatus,
}

/// Derive the snapshot figures. Profit is amount minus expenses; the
/// remaining balance is a collections figure and never enters it. A booking
/// completed with nothing collected keeps a pending payment status.
pub fn completion_figures(
    final_price: Option<f64>,
    net_price: f64,
    amount_paid: f64,
    total_expenses: f64,
) -> CompletionFigures {
    let amount = final_price.unwrap_or(net_price);
    let downpayment = amount_paid;
    let remaining_balance = amount - downpayment;
    let payment_status = if remaining_balance <= 0.0 {
        PaymentStatus::Paid
    } else if downpayment > 0.0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    };

    CompletionFigures {
        amount,
        downpayment,
        remaining_balance,
        total_expenses,
        profit: amount - total_expenses,
        payment_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_requires_a_non_empty_reason() {
        assert!(cancel_reason("").is_err());
        assert!(cancel_reason("   ").is_err());
        assert_eq!(cancel_reason("  client moved the date  "), Ok("client moved the date"));
    }

    #[test]
    fn duplicate_closed_date_is_rejected() {
        assert_eq!(new_closed_day("Holiday", true), Err(ClosedDayRejection::AlreadyClosed));
        assert_eq!(new_closed_day("Holiday", false), Ok("Holiday"));
    }

    #[test]
    fn closed_day_requires_a_reason_even_when_the_date_is_free() {
        assert_eq!(new_closed_day("   ", false), Err(ClosedDayRejection::MissingReason));
    }

    #[test]
    fn image_url_mirrors_the_gallery_head() {
        let gallery = vec!["hall.jpg".to_string(), "buffet.jpg".to_string()];
        assert_eq!(main_image(&gallery), Some(&"hall.jpg".to_string()));
        assert_eq!(main_image(&[]), None);
    }

    #[test]
    fn payment_may_not_exceed_the_discounted_price() {
        // net = 45000, 20000 already collected.
        assert!(register_payment(20000.0, 30000.0, 45000.0).is_err());
        assert_eq!(
            register_payment(20000.0, 10000.0, 45000.0),
            Ok((30000.0, PaymentStatus::Partial))
        );
        assert_eq!(
            register_payment(20000.0, 25000.0, 45000.0),
            Ok((45000.0, PaymentStatus::Paid))
        );
    }

    #[test]
    fn non_positive_payments_are_rejected() {
        assert!(register_payment(0.0, 0.0, 1000.0).is_err());
        assert!(register_payment(0.0, -5.0, 1000.0).is_err());
    }

    #[test]
    fn completion_profit_ignores_the_downpayment() {
        let figures = completion_figures(None, 50000.0, 30000.0, 10000.0);
        assert_eq!(figures.amount, 50000.0);
        assert_eq!(figures.profit, 40000.0);
        assert_eq!(figures.remaining_balance, 20000.0);
        assert_eq!(figures.payment_status, PaymentStatus::Partial);
    }

    #[test]
    fn completion_with_nothing_collected_stays_pending() {
        let figures = completion_figures(None, 50000.0, 0.0, 0.0);
        assert_eq!(figures.payment_status, PaymentStatus::Pending);
        assert_eq!(figures.remaining_balance, 50000.0);
    }

    #[test]
    fn completion_amount_prefers_the_final_price() {
        let figures = completion_figures(Some(48000.0), 45000.0, 48000.0, 0.0);
        assert_eq!(figures.amount, 48000.0);
        assert_eq!(figures.payment_status, PaymentStatus::Paid);

        // Without an adjustment the discounted total stands.
        assert_eq!(completion_figures(None, 45000.0, 0.0, 0.0).amount, 45000.0);
    }
}
