//! Price and financing calculations.
//!
//! Everything here is a pure function of its inputs, so a checkout page can
//! recompute on every change and get the same answer for the same inputs.

pub mod amortization;
pub mod common;
pub mod financing;

pub use amortization::monthly_installment;
pub use financing::{FinancingError, FinancingPlan, FinancingTerms, PriceBreakdown};
