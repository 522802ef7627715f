//! Fixed-installment loan amortization.
//!
//! For principal `P`, annual rate `R` (percent) and tenure `T` months:
//!
//! | Quantity      | Formula                              |
//! |---------------|--------------------------------------|
//! | monthly rate  | `r = R / 12 / 100`                   |
//! | installment   | `P × r × (1+r)^T / ((1+r)^T − 1)`    |
//! | zero rate     | `P / T`                              |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use showroom_core::calculations::common::round_to_display_unit;
//! use showroom_core::calculations::monthly_installment;
//!
//! let installment = monthly_installment(dec!(1000000), dec!(8.5), 36).unwrap();
//!
//! assert_eq!(round_to_display_unit(installment), dec!(31568));
//! ```

use rust_decimal::{Decimal, MathematicalOps};

use super::financing::FinancingError;

/// Monthly installment at full precision.
///
/// # Errors
///
/// Returns [`FinancingError`] if:
/// - `tenure_months` is zero
/// - `principal` or `annual_rate_percent` is negative
/// - the compound growth factor overflows
pub fn monthly_installment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: u32,
) -> Result<Decimal, FinancingError> {
    if tenure_months == 0 {
        return Err(FinancingError::ZeroTenure);
    }
    if principal.is_sign_negative() && !principal.is_zero() {
        return Err(FinancingError::NegativePrincipal(principal));
    }
    if annual_rate_percent.is_sign_negative() && !annual_rate_percent.is_zero() {
        return Err(FinancingError::NegativeRate(annual_rate_percent));
    }

    let tenure = Decimal::from(tenure_months);
    let monthly_rate = monthly_rate(annual_rate_percent);
    // rates below 1e-28 a month round to zero here
    if monthly_rate.is_zero() {
        return Ok(principal / tenure);
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(tenure_months))
        .ok_or(FinancingError::Overflow)?;
    let denominator = growth - Decimal::ONE;

    principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denominator))
        .ok_or(FinancingError::Overflow)
}

/// Converts an annual percentage rate into a monthly fraction.
fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / Decimal::from(12) / Decimal::ONE_HUNDRED
}
