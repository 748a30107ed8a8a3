//! Late-fee computation.

use chrono::{Local, NaiveDate};

/// Flat penalty applied when a challan is settled after its due date.
pub const LATE_FEE: f64 = 500.0;

/// Binary late-fee model: the full `LATE_FEE` when the payment date is
/// strictly after the due date, zero otherwise. No proration. A challan
/// without a due date can never be late.
///
/// `payment_date` defaults to today when absent. Comparison is date-only.
pub fn compute_fine(due_date: Option<NaiveDate>, payment_date: Option<NaiveDate>) -> f64 {
    let Some(due) = due_date else {
        return 0.0;
    };
    let paid = payment_date.unwrap_or_else(|| Local::now().date_naive());
    if paid > due {
        LATE_FEE
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn payment_after_due_date_incurs_late_fee() {
        assert_eq!(compute_fine(Some(d("2025-11-30")), Some(d("2025-12-01"))), 500.0);
    }

    #[test]
    fn payment_on_due_date_is_not_late() {
        assert_eq!(compute_fine(Some(d("2025-11-30")), Some(d("2025-11-30"))), 0.0);
    }

    #[test]
    fn payment_before_due_date_is_not_late() {
        assert_eq!(compute_fine(Some(d("2025-11-30")), Some(d("2025-11-25"))), 0.0);
    }

    #[test]
    fn missing_due_date_never_fines() {
        assert_eq!(compute_fine(None, Some(d("2030-01-01"))), 0.0);
        assert_eq!(compute_fine(None, None), 0.0);
    }

    #[test]
    fn missing_payment_date_defaults_to_today() {
        // A due date far in the past is late as of today, far in the future is not.
        assert_eq!(compute_fine(Some(d("2000-01-01")), None), LATE_FEE);
        assert_eq!(compute_fine(Some(d("2999-01-01")), None), 0.0);
    }
}
