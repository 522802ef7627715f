//! Shared helpers for price arithmetic and presentation.
//!
//! Derived amounts keep full precision everywhere in the core. Rounding to
//! whole currency units happens only when a value is displayed.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the smallest display unit (whole rupees), half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use showroom_core::calculations::common::round_to_display_unit;
///
/// assert_eq!(round_to_display_unit(dec!(31567.537)), dec!(31568));
/// assert_eq!(round_to_display_unit(dec!(12.5)), dec!(13));
/// assert_eq!(round_to_display_unit(dec!(-12.5)), dec!(-13));
/// ```
pub fn round_to_display_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `percent` percent of `amount`, unrounded. `None` when the product
/// does not fit in a [`Decimal`].
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use showroom_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(6000000), dec!(20)), Some(dec!(1200000)));
/// assert_eq!(percent_of(Decimal::MAX, dec!(20)), None);
/// ```
pub fn percent_of(
    amount: Decimal,
    percent: Decimal,
) -> Option<Decimal> {
    amount
        .checked_mul(percent)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Formats an amount as rupees with Indian digit grouping, rounded to the
/// display unit: `₹12,34,567`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use showroom_core::calculations::common::format_price;
///
/// assert_eq!(format_price(dec!(7250000)), "₹72,50,000");
/// assert_eq!(format_price(dec!(999.6)), "₹1,000");
/// ```
pub fn format_price(amount: Decimal) -> String {
    let rounded = round_to_display_unit(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}₹{}", group_indian(&digits))
}

/// Last three digits form one group, the rest are grouped in pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
