//! Vehicle financing: the lender's terms, a buyer's chosen plan, and the
//! on-road price breakdown shown next to it.
//!
//! A [`FinancingPlan`] stores only its inputs. Down payment, loan amount and
//! installment are recomputed from them on every call so the derived values
//! can never drift from what the buyer selected.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use showroom_core::calculations::{FinancingPlan, FinancingTerms};
//! use showroom_core::calculations::common::round_to_display_unit;
//!
//! let terms = FinancingTerms::default();
//! let plan = FinancingPlan::new(dec!(6000000), 20, 36, &terms).unwrap();
//!
//! assert_eq!(plan.down_payment_amount(), Ok(dec!(1200000)));
//! assert_eq!(plan.loan_amount(), Ok(dec!(4800000)));
//! assert_eq!(round_to_display_unit(plan.monthly_installment().unwrap()), dec!(151524));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::amortization::monthly_installment;
use super::common::{percent_of, round_to_display_unit};
use crate::models::CatalogEntry;

/// Errors that can occur while building or evaluating a financing plan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FinancingError {
    #[error("down payment {percent}% is outside {min}%..={max}%")]
    DownPaymentOutOfRange { percent: u32, min: u32, max: u32 },

    #[error("tenure of {0} months is not offered")]
    UnsupportedTenure(u32),

    #[error("tenure must be at least one month")]
    ZeroTenure,

    #[error("principal {0} is negative")]
    NegativePrincipal(Decimal),

    #[error("interest rate {0}% is negative")]
    NegativeRate(Decimal),

    #[error("installment calculation overflowed")]
    Overflow,

    #[error("invalid financing terms: {0}")]
    InvalidTerms(&'static str),
}

/// Lender terms offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingTerms {
    /// Fixed annual interest rate, in percent.
    pub annual_rate: Decimal,
    pub min_down_payment_percent: u32,
    pub max_down_payment_percent: u32,
    /// Tenures a buyer may pick, in months.
    pub tenure_options: Vec<u32>,
}

impl Default for FinancingTerms {
    fn default() -> Self {
        Self {
            annual_rate: Decimal::new(85, 1),
            min_down_payment_percent: 10,
            max_down_payment_percent: 50,
            tenure_options: vec![12, 24, 36, 48, 60],
        }
    }
}

impl FinancingTerms {
    /// Checks that the terms can produce at least one valid plan.
    pub fn validate(&self) -> Result<(), FinancingError> {
        if self.annual_rate.is_sign_negative() && !self.annual_rate.is_zero() {
            return Err(FinancingError::NegativeRate(self.annual_rate));
        }
        if self.min_down_payment_percent > self.max_down_payment_percent {
            return Err(FinancingError::InvalidTerms(
                "minimum down payment exceeds maximum",
            ));
        }
        if self.max_down_payment_percent > 100 {
            return Err(FinancingError::InvalidTerms(
                "down payment cannot exceed 100%",
            ));
        }
        if self.tenure_options.is_empty() {
            return Err(FinancingError::InvalidTerms("no tenure options"));
        }
        if self.tenure_options.contains(&0) {
            return Err(FinancingError::ZeroTenure);
        }
        Ok(())
    }

    pub fn offers_tenure(
        &self,
        months: u32,
    ) -> bool {
        self.tenure_options.contains(&months)
    }
}

/// A buyer's financing selection for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingPlan {
    on_road_price: Decimal,
    down_payment_percent: u32,
    tenure_months: u32,
    annual_rate: Decimal,
}

impl FinancingPlan {
    /// Validates the selection against `terms`.
    ///
    /// # Errors
    ///
    /// Returns [`FinancingError`] if the price is negative, the down payment
    /// is outside the allowed range, the tenure is not offered, or the
    /// down payment cannot be computed for this price.
    pub fn new(
        on_road_price: Decimal,
        down_payment_percent: u32,
        tenure_months: u32,
        terms: &FinancingTerms,
    ) -> Result<Self, FinancingError> {
        if on_road_price.is_sign_negative() && !on_road_price.is_zero() {
            return Err(FinancingError::NegativePrincipal(on_road_price));
        }
        if !(terms.min_down_payment_percent..=terms.max_down_payment_percent)
            .contains(&down_payment_percent)
        {
            return Err(FinancingError::DownPaymentOutOfRange {
                percent: down_payment_percent,
                min: terms.min_down_payment_percent,
                max: terms.max_down_payment_percent,
            });
        }
        if tenure_months == 0 {
            return Err(FinancingError::ZeroTenure);
        }
        if !terms.offers_tenure(tenure_months) {
            return Err(FinancingError::UnsupportedTenure(tenure_months));
        }

        let plan = Self {
            on_road_price,
            down_payment_percent,
            tenure_months,
            annual_rate: terms.annual_rate,
        };
        plan.loan_amount()?;
        Ok(plan)
    }

    pub fn on_road_price(&self) -> Decimal {
        self.on_road_price
    }

    pub fn down_payment_percent(&self) -> u32 {
        self.down_payment_percent
    }

    pub fn tenure_months(&self) -> u32 {
        self.tenure_months
    }

    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    pub fn down_payment_amount(&self) -> Result<Decimal, FinancingError> {
        percent_of(self.on_road_price, Decimal::from(self.down_payment_percent))
            .ok_or(FinancingError::Overflow)
    }

    /// Amount borrowed: on-road price minus down payment. Never negative.
    pub fn loan_amount(&self) -> Result<Decimal, FinancingError> {
        Ok(self.on_road_price - self.down_payment_amount()?)
    }

    pub fn monthly_installment(&self) -> Result<Decimal, FinancingError> {
        monthly_installment(self.loan_amount()?, self.annual_rate, self.tenure_months)
    }

    /// Down payment plus every installment.
    pub fn total_payable(&self) -> Result<Decimal, FinancingError> {
        self.down_payment_amount()?
            .checked_add(self.total_installments()?)
            .ok_or(FinancingError::Overflow)
    }

    /// Installments paid beyond the loan amount.
    pub fn total_interest(&self) -> Result<Decimal, FinancingError> {
        Ok(self.total_installments()? - self.loan_amount()?)
    }

    fn total_installments(&self) -> Result<Decimal, FinancingError> {
        self.monthly_installment()?
            .checked_mul(Decimal::from(self.tenure_months))
            .ok_or(FinancingError::Overflow)
    }
}

/// How a vehicle's on-road price is presented at checkout.
///
/// Registration, insurance and accessories are shown as 5%, 3% and 2% of
/// the ex-showroom price, each rounded to whole rupees. The total is the
/// catalog's on-road price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub ex_showroom: Decimal,
    pub registration: Decimal,
    pub insurance: Decimal,
    pub accessories: Decimal,
    pub total_on_road: Decimal,
}

impl PriceBreakdown {
    const REGISTRATION_PERCENT: i64 = 5;
    const INSURANCE_PERCENT: i64 = 3;
    const ACCESSORIES_PERCENT: i64 = 2;

    /// # Errors
    ///
    /// [`FinancingError::Overflow`] when a share of the ex-showroom price
    /// does not fit in a [`Decimal`].
    pub fn for_entry(entry: &CatalogEntry) -> Result<Self, FinancingError> {
        let share = |percent: i64| {
            percent_of(entry.base_price, Decimal::from(percent))
                .map(round_to_display_unit)
                .ok_or(FinancingError::Overflow)
        };

        Ok(Self {
            ex_showroom: entry.base_price,
            registration: share(Self::REGISTRATION_PERCENT)?,
            insurance: share(Self::INSURANCE_PERCENT)?,
            accessories: share(Self::ACCESSORIES_PERCENT)?,
            total_on_road: entry.on_road_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::FuelType;

    fn terms() -> FinancingTerms {
        FinancingTerms::default()
    }

    // =========================================================================
    // FinancingTerms tests
    // =========================================================================

    #[test]
    fn default_terms_are_valid() {
        let terms = terms();

        assert_eq!(terms.annual_rate, dec!(8.5));
        assert_eq!(terms.validate(), Ok(()));
    }

    #[test]
    fn terms_with_inverted_bounds_are_invalid() {
        let terms = FinancingTerms {
            min_down_payment_percent: 60,
            max_down_payment_percent: 50,
            ..terms()
        };

        assert!(matches!(
            terms.validate(),
            Err(FinancingError::InvalidTerms(_))
        ));
    }

    #[test]
    fn terms_without_tenures_are_invalid() {
        let terms = FinancingTerms {
            tenure_options: Vec::new(),
            ..terms()
        };

        assert!(terms.validate().is_err());
    }

    #[test]
    fn terms_with_zero_tenure_are_invalid() {
        let terms = FinancingTerms {
            tenure_options: vec![0, 12],
            ..terms()
        };

        assert_eq!(terms.validate(), Err(FinancingError::ZeroTenure));
    }

    // =========================================================================
    // FinancingPlan tests
    // =========================================================================

    #[test]
    fn plan_derives_amounts_from_inputs() {
        let plan = FinancingPlan::new(dec!(6000000), 20, 36, &terms()).unwrap();

        assert_eq!(plan.down_payment_amount(), Ok(dec!(1200000)));
        assert_eq!(plan.loan_amount(), Ok(dec!(4800000)));
        assert_eq!(
            round_to_display_unit(plan.monthly_installment().unwrap()),
            dec!(151524)
        );
    }

    #[test]
    fn plan_totals_include_interest() {
        let plan = FinancingPlan::new(dec!(6000000), 20, 36, &terms()).unwrap();

        assert_eq!(
            round_to_display_unit(plan.total_interest().unwrap()),
            dec!(654870)
        );
        assert_eq!(
            round_to_display_unit(plan.total_payable().unwrap()),
            dec!(6654870)
        );
    }

    #[test]
    fn plan_accepts_bounds_inclusively() {
        assert!(FinancingPlan::new(dec!(1000000), 10, 12, &terms()).is_ok());
        assert!(FinancingPlan::new(dec!(1000000), 50, 60, &terms()).is_ok());
    }

    #[test]
    fn plan_rejects_down_payment_outside_bounds() {
        let result = FinancingPlan::new(dec!(1000000), 55, 36, &terms());

        assert_eq!(
            result,
            Err(FinancingError::DownPaymentOutOfRange {
                percent: 55,
                min: 10,
                max: 50
            })
        );
    }

    #[test]
    fn plan_rejects_tenure_not_offered() {
        let result = FinancingPlan::new(dec!(1000000), 20, 18, &terms());

        assert_eq!(result, Err(FinancingError::UnsupportedTenure(18)));
    }

    #[test]
    fn plan_rejects_negative_price() {
        let result = FinancingPlan::new(dec!(-1), 20, 36, &terms());

        assert_eq!(result, Err(FinancingError::NegativePrincipal(dec!(-1))));
    }

    #[test]
    fn plan_rejects_price_too_large_to_split() {
        let price = dec!(7922816251426433759354395033.5);

        let result = FinancingPlan::new(price, 20, 36, &terms());

        assert_eq!(result, Err(FinancingError::Overflow));
    }

    #[test]
    fn unvalidated_plan_reports_overflow() {
        let plan = FinancingPlan {
            on_road_price: dec!(7922816251426433759354395033.5),
            down_payment_percent: 20,
            tenure_months: 36,
            annual_rate: dec!(8.5),
        };

        assert_eq!(plan.down_payment_amount(), Err(FinancingError::Overflow));
        assert_eq!(plan.loan_amount(), Err(FinancingError::Overflow));
        assert_eq!(plan.monthly_installment(), Err(FinancingError::Overflow));
        assert_eq!(plan.total_payable(), Err(FinancingError::Overflow));
    }

    #[test]
    fn zero_rate_terms_split_loan_evenly() {
        let terms = FinancingTerms {
            annual_rate: Decimal::ZERO,
            ..terms()
        };
        let plan = FinancingPlan::new(dec!(1200000), 50, 12, &terms).unwrap();

        assert_eq!(plan.monthly_installment().unwrap(), dec!(50000));
        assert_eq!(plan.total_interest().unwrap(), Decimal::ZERO);
    }

    // =========================================================================
    // PriceBreakdown tests
    // =========================================================================

    fn entry() -> CatalogEntry {
        CatalogEntry {
            id: "330li".to_string(),
            name: "330Li M Sport".to_string(),
            series: "3 Series".to_string(),
            fuel_type: FuelType::Petrol,
            base_price: dec!(6290010),
            on_road_price: dec!(7200000),
            engine: "1998 cc".to_string(),
            power: "254 hp".to_string(),
            top_speed: "250 km/h".to_string(),
            mileage: "15.4 km/l".to_string(),
            seating_capacity: 5,
            transmission: "8-speed Steptronic".to_string(),
            details: Default::default(),
        }
    }

    #[test]
    fn breakdown_rounds_each_share() {
        let breakdown = PriceBreakdown::for_entry(&entry()).unwrap();

        assert_eq!(breakdown.ex_showroom, dec!(6290010));
        assert_eq!(breakdown.registration, dec!(314501));
        assert_eq!(breakdown.insurance, dec!(188700));
        assert_eq!(breakdown.accessories, dec!(125800));
        assert_eq!(breakdown.total_on_road, dec!(7200000));
    }

    #[test]
    fn breakdown_reports_overflow() {
        let entry = CatalogEntry {
            base_price: Decimal::MAX,
            ..entry()
        };

        assert_eq!(
            PriceBreakdown::for_entry(&entry),
            Err(FinancingError::Overflow)
        );
    }
}
