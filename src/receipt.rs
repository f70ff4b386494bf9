use std::fmt;

use crate::policy::PolicyRecord;
use crate::types::PaymentMethod;

/// Customer-facing summary of an issued policy.
pub struct Receipt<'a>(pub &'a PolicyRecord);

fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let c = &r.customer;

        writeln!(f, "----- Insurance Receipt -----")?;
        writeln!(f, "Policy Number: {}", r.policy_number)?;
        writeln!(f, "Customer: {} {}", c.first_name, c.last_name)?;
        writeln!(f, "Address: {}, {}, {}, {}", c.address, c.city, c.province, c.postal_code)?;
        writeln!(f, "Phone: {}", c.phone_number)?;
        writeln!(f, "Number of Cars: {}", r.num_cars)?;
        writeln!(f, "Extra Liability: {}", yes_no(r.coverage.extra_liability))?;
        writeln!(f, "Glass Coverage: {}", yes_no(r.coverage.glass_coverage))?;
        writeln!(f, "Loaner Car: {}", yes_no(r.coverage.loaner_car))?;
        writeln!(f, "Payment Method: {}", r.payment_method.label())?;
        if r.payment_method == PaymentMethod::DownPay {
            writeln!(f, "Down Payment: ${:.2}", r.down_payment)?;
        }
        writeln!(f, "Total Premium (before tax): ${:.2}", r.total_premium)?;
        writeln!(f, "HST: ${:.2}", r.hst)?;
        writeln!(f, "Total Cost: ${:.2}", r.total_cost)?;
        if r.monthly_payment > 0.0 {
            writeln!(f, "Monthly Payment: ${:.2}", r.monthly_payment)?;
        }

        writeln!(f)?;
        writeln!(f, "Previous Claims:")?;
        writeln!(f, "Claim #    Claim Date    Amount")?;
        for claim in &r.claims {
            writeln!(
                f,
                "{}    {}    ${:.2}",
                claim.claim_number, claim.claim_date, claim.claim_amount
            )?;
        }
        Ok(())
    }
}
