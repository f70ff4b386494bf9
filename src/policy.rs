use serde::{Deserialize, Serialize};

use crate::premium::{Coverage, Pricing};
use crate::types::{PaymentMethod, PolicyNumber, Province};

/// A prior claim reported by the customer. Dates are kept as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_number: String,
    /// `YYYY-MM-DD`, not validated.
    pub claim_date: String,
    pub claim_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub province: Province,
    pub postal_code: String,
    pub phone_number: String,
}

/// Everything gathered from the customer before pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyApplication {
    pub customer: Customer,
    /// At least one; the interview enforces this.
    pub num_cars: u32,
    pub coverage: Coverage,
    pub payment_method: PaymentMethod,
    /// Only meaningful for `DOWN PAY`.
    pub down_payment: f64,
    pub claims: Vec<Claim>,
}

/// One issued policy, exactly as written to the policy log.
///
/// Serializes flat: customer and coverage fields sit beside the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub policy_number: PolicyNumber,
    #[serde(flatten)]
    pub customer: Customer,
    pub num_cars: u32,
    #[serde(flatten)]
    pub coverage: Coverage,
    pub payment_method: PaymentMethod,
    pub down_payment: f64,
    pub total_premium: f64,
    pub hst: f64,
    pub total_cost: f64,
    pub monthly_payment: f64,
    pub claims: Vec<Claim>,
}

impl PolicyRecord {
    /// Freezes an application and its pricing under `policy_number`.
    /// The down payment is recorded as zero unless the method is `DOWN PAY`.
    pub fn issue(
        policy_number: PolicyNumber,
        application: PolicyApplication,
        pricing: &Pricing,
    ) -> Self {
        let down_payment = match application.payment_method {
            PaymentMethod::DownPay => application.down_payment,
            _ => 0.0,
        };
        PolicyRecord {
            policy_number,
            customer: application.customer,
            num_cars: application.num_cars,
            coverage: application.coverage,
            payment_method: application.payment_method,
            down_payment,
            total_premium: pricing.quote.total_premium,
            hst: pricing.settlement.hst,
            total_cost: pricing.settlement.total_cost,
            monthly_payment: pricing.settlement.monthly_payment,
            claims: application.claims,
        }
    }
}
