use showroom_core::catalog::SortMode;
use showroom_core::models::{FuelType, PaymentMethod};
use thiserror::Error;

/// Error returned when a command-line value names no known option.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseArgError {
    #[error("unknown fuel type '{0}' (expected petrol, diesel, electric or hybrid)")]
    FuelType(String),

    #[error("unknown sort mode '{0}' (expected name, price-low or price-high)")]
    SortMode(String),

    #[error("unknown payment method '{0}' (expected upi, credit, debit or netbanking)")]
    PaymentMethod(String),
}

/// Case-insensitive fuel type, for use as a clap value parser.
pub fn parse_fuel_type(s: &str) -> Result<FuelType, ParseArgError> {
    FuelType::parse(s).ok_or_else(|| ParseArgError::FuelType(s.to_string()))
}

pub fn parse_sort_mode(s: &str) -> Result<SortMode, ParseArgError> {
    SortMode::parse(&s.to_lowercase()).ok_or_else(|| ParseArgError::SortMode(s.to_string()))
}

pub fn parse_payment_method(s: &str) -> Result<PaymentMethod, ParseArgError> {
    PaymentMethod::parse(s).ok_or_else(|| ParseArgError::PaymentMethod(s.to_string()))
}

/// Formats an optional value for display, using "—" when `None`.
pub fn opt_display(value: Option<&str>) -> &str {
    value.unwrap_or("—")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_fuel_type_ignores_case() {
        assert_eq!(parse_fuel_type("ELECTRIC"), Ok(FuelType::Electric));
        assert_eq!(
            parse_fuel_type("steam"),
            Err(ParseArgError::FuelType("steam".to_string()))
        );
    }

    #[test]
    fn parse_sort_mode_accepts_page_names() {
        assert_eq!(parse_sort_mode("price-high"), Ok(SortMode::PriceDescending));
        assert_eq!(parse_sort_mode("Price-Low"), Ok(SortMode::PriceAscending));
        assert!(parse_sort_mode("rating").is_err());
    }

    #[test]
    fn parse_payment_method_uses_codes() {
        assert_eq!(parse_payment_method("netbanking"), Ok(PaymentMethod::NetBanking));
        assert!(parse_payment_method("cash").is_err());
    }

    #[test]
    fn opt_display_uses_dash_for_none() {
        assert_eq!(opt_display(None), "—");
        assert_eq!(opt_display(Some("front desk")), "front desk");
    }
}
