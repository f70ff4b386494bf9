//! Free-text checks for the two enumerated policy fields.
//!
//! The interactive loop re-asks until these return true; they never prompt.

use crate::types::{PaymentMethod, Province};

/// True iff `code` names one of the 13 provinces or territories, any case.
pub fn validate_province(code: &str) -> bool {
    code.parse::<Province>().is_ok()
}

/// True iff `method` is `FULL`, `MONTHLY` or `DOWN PAY`, any case.
pub fn validate_payment_method(method: &str) -> bool {
    method.parse::<PaymentMethod>().is_ok()
}
