//! Purchase checkout, run on the same controller as the booking wizard.
//!
//! Step 1 collects the payment method and, optionally, a financing
//! selection. It is ready once the payment method is one of the offered
//! codes, the vehicle's price breakdown can be computed, and any requested
//! financing forms a valid [`FinancingPlan`].
//! Step 2 is a read-only review and is always ready.

use rust_decimal::Decimal;
use serde::Serialize;

use super::controller::{StepFields, StepPolicy, Workflow};
use crate::calculations::{FinancingError, FinancingPlan, FinancingTerms, PriceBreakdown};
use crate::models::{CatalogEntry, PaymentMethod};
use crate::notify::Notification;

/// Field names used by the checkout flow.
pub mod field {
    pub const PAYMENT_METHOD: &str = "payment_method";
    /// `yes`, `true` or `on` requests financing; anything else pays in full.
    pub const FINANCING: &str = "financing";
    pub const DOWN_PAYMENT_PERCENT: &str = "down_payment_percent";
    pub const TENURE_MONTHS: &str = "tenure_months";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Payment = 1,
    Review = 2,
}

impl CheckoutStep {
    pub const COUNT: usize = 2;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(step: usize) -> Option<Self> {
        match step {
            1 => Some(Self::Payment),
            2 => Some(Self::Review),
            _ => None,
        }
    }
}

/// Finalized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub payment_method: PaymentMethod,
    pub breakdown: PriceBreakdown,
    pub financing: Option<FinancingPlan>,
}

impl CheckoutSummary {
    /// Amount due now: the down payment when financed, otherwise the full
    /// on-road price.
    pub fn due_now(&self) -> Result<Decimal, FinancingError> {
        self.financing
            .as_ref()
            .map_or(Ok(self.breakdown.total_on_road), FinancingPlan::down_payment_amount)
    }
}

enum FinancingChoice {
    PayInFull,
    Financed(FinancingPlan),
    Invalid,
}

#[derive(Debug, Clone)]
pub struct CheckoutPolicy<'a> {
    vehicle: &'a CatalogEntry,
    terms: &'a FinancingTerms,
}

impl<'a> CheckoutPolicy<'a> {
    pub fn new(
        vehicle: &'a CatalogEntry,
        terms: &'a FinancingTerms,
    ) -> Self {
        Self { vehicle, terms }
    }

    pub fn vehicle(&self) -> &'a CatalogEntry {
        self.vehicle
    }

    fn payment_method(
        &self,
        fields: &StepFields,
    ) -> Option<PaymentMethod> {
        fields
            .present(CheckoutStep::Payment.index(), field::PAYMENT_METHOD)
            .and_then(PaymentMethod::parse)
    }

    fn financing(
        &self,
        fields: &StepFields,
    ) -> FinancingChoice {
        let step = CheckoutStep::Payment.index();
        let requested = fields
            .present(step, field::FINANCING)
            .is_some_and(|value| {
                ["yes", "true", "on"]
                    .iter()
                    .any(|flag| value.eq_ignore_ascii_case(flag))
            });
        if !requested {
            return FinancingChoice::PayInFull;
        }

        let percent = fields
            .present(step, field::DOWN_PAYMENT_PERCENT)
            .and_then(|value| value.parse::<u32>().ok());
        let tenure = fields
            .present(step, field::TENURE_MONTHS)
            .and_then(|value| value.parse::<u32>().ok());

        match (percent, tenure) {
            (Some(percent), Some(tenure)) => {
                FinancingPlan::new(self.vehicle.on_road_price, percent, tenure, self.terms)
                    .map_or(FinancingChoice::Invalid, FinancingChoice::Financed)
            }
            _ => FinancingChoice::Invalid,
        }
    }
}

impl StepPolicy for CheckoutPolicy<'_> {
    type Summary = CheckoutSummary;

    fn total_steps(&self) -> usize {
        CheckoutStep::COUNT
    }

    fn is_ready(
        &self,
        step: usize,
        fields: &StepFields,
    ) -> bool {
        match CheckoutStep::from_index(step) {
            Some(CheckoutStep::Payment) => {
                self.payment_method(fields).is_some()
                    && PriceBreakdown::for_entry(self.vehicle).is_ok()
                    && !matches!(self.financing(fields), FinancingChoice::Invalid)
            }
            Some(CheckoutStep::Review) => true,
            None => false,
        }
    }

    fn summarize(
        &self,
        fields: &StepFields,
    ) -> Option<CheckoutSummary> {
        let financing = match self.financing(fields) {
            FinancingChoice::PayInFull => None,
            FinancingChoice::Financed(plan) => Some(plan),
            FinancingChoice::Invalid => return None,
        };

        Some(CheckoutSummary {
            vehicle_id: self.vehicle.id.clone(),
            vehicle_name: self.vehicle.name.clone(),
            payment_method: self.payment_method(fields)?,
            breakdown: PriceBreakdown::for_entry(self.vehicle).ok()?,
            financing,
        })
    }

    fn completion_notice(
        &self,
        summary: &CheckoutSummary,
    ) -> Notification {
        Notification::success(
            "Order Placed Successfully!",
            format!(
                "Your {} {} order has been confirmed. Our team will contact you shortly.",
                CatalogEntry::BRAND,
                summary.vehicle_name
            ),
        )
    }
}

pub type CheckoutFlow<'a> = Workflow<CheckoutPolicy<'a>>;
