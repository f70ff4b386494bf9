//! Premium rules for a multi-car auto policy.
//!
//! ```text
//! base    = basic + (cars - 1) * basic * (1 - discount)
//! extras  = cars * (liability? + glass? + loaner?)
//! premium = base + extras
//! ```
//!
//! Tax and installments are applied afterwards by [`settle`]. All arithmetic
//! is plain `f64` in the order written above, so results match the rate card
//! to the last bit rather than being rounded to cents.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Constants, keys};
use crate::error::MissingConstantError;
use crate::types::PaymentMethod;

/// Every non-`FULL` balance is split into this many payments, including
/// plain `MONTHLY` with no down payment.
pub const INSTALLMENTS: u32 = 8;

/// Optional add-ons, each charged once per insured car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coverage {
    pub extra_liability: bool,
    pub glass_coverage: bool,
    pub loaner_car: bool,
}

/// The five constants the premium formula reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateCard {
    pub basic_premium: f64,
    pub discount_per_additional_car: f64,
    pub extra_liability_cost: f64,
    pub glass_coverage_cost: f64,
    pub loaner_car_cost: f64,
}

impl RateCard {
    /// Fails on the first absent key, in formula order.
    pub fn from_constants(constants: &Constants) -> Result<Self, MissingConstantError> {
        Ok(RateCard {
            basic_premium: constants.require(keys::BASIC_PREMIUM)?,
            discount_per_additional_car: constants.require(keys::DISCOUNT_PER_ADDITIONAL_CAR)?,
            extra_liability_cost: constants.require(keys::EXTRA_LIABILITY_COST)?,
            glass_coverage_cost: constants.require(keys::GLASS_COVERAGE_COST)?,
            loaner_car_cost: constants.require(keys::LOANER_CAR_COST)?,
        })
    }

    /// `num_cars` is not checked: zero cars yields a negative base premium.
    pub fn quote(&self, num_cars: u32, coverage: Coverage) -> PremiumQuote {
        let cars = f64::from(num_cars);
        let flag = |b: bool| if b { 1.0 } else { 0.0 };

        let base_premium = self.basic_premium
            + (cars - 1.0) * self.basic_premium * (1.0 - self.discount_per_additional_car);
        let extra_costs = cars
            * (flag(coverage.extra_liability) * self.extra_liability_cost
                + flag(coverage.glass_coverage) * self.glass_coverage_cost
                + flag(coverage.loaner_car) * self.loaner_car_cost);

        PremiumQuote { base_premium, extra_costs, total_premium: base_premium + extra_costs }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PremiumQuote {
    pub base_premium: f64,
    pub extra_costs: f64,
    /// Before tax.
    pub total_premium: f64,
}

/// Pre-tax premium for `num_cars` cars with the given add-ons.
pub fn calculate(
    constants: &Constants,
    num_cars: u32,
    coverage: Coverage,
) -> Result<PremiumQuote, MissingConstantError> {
    let quote = RateCard::from_constants(constants)?.quote(num_cars, coverage);
    debug!(num_cars, ?coverage, ?quote, "premium calculated");
    Ok(quote)
}

/// What the customer owes once tax, fees and any down payment are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    pub hst: f64,
    pub total_cost: f64,
    /// Zero when paid in full.
    pub monthly_payment: f64,
}

/// Applies HST, then for installment plans adds the processing fee, takes
/// off the down payment (`DOWN PAY` only) and divides by [`INSTALLMENTS`].
///
/// `processing_fee` is only required for installment plans.
pub fn settle(
    constants: &Constants,
    total_premium: f64,
    method: PaymentMethod,
    down_payment: f64,
) -> Result<Settlement, MissingConstantError> {
    let hst = total_premium * constants.require(keys::HST_RATE)?;
    let mut total_cost = total_premium + hst;

    let monthly_payment = if method.is_installment() {
        total_cost += constants.require(keys::PROCESSING_FEE)?;
        if method == PaymentMethod::DownPay && down_payment > 0.0 {
            total_cost -= down_payment;
        }
        total_cost / f64::from(INSTALLMENTS)
    } else {
        0.0
    };

    Ok(Settlement { hst, total_cost, monthly_payment })
}

/// Premium plus settlement, resolved together so a missing constant is
/// caught before anything is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub quote: PremiumQuote,
    pub settlement: Settlement,
}

pub fn price(
    constants: &Constants,
    num_cars: u32,
    coverage: Coverage,
    method: PaymentMethod,
    down_payment: f64,
) -> Result<Pricing, MissingConstantError> {
    let quote = calculate(constants, num_cars, coverage)?;
    let settlement = settle(constants, quote.total_premium, method, down_payment)?;
    Ok(Pricing { quote, settlement })
}
