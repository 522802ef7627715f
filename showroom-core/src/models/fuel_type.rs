use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    /// Every fuel type, in the order the catalog filter offers them.
    pub const ALL: [FuelType; 4] = [
        FuelType::Petrol,
        FuelType::Diesel,
        FuelType::Electric,
        FuelType::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petrol => "Petrol",
            Self::Diesel => "Diesel",
            Self::Electric => "Electric",
            Self::Hybrid => "Hybrid",
        }
    }

    /// Case-insensitive parse of a fuel type label.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|fuel| fuel.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for FuelType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(FuelType::parse("electric"), Some(FuelType::Electric));
        assert_eq!(FuelType::parse(" DIESEL "), Some(FuelType::Diesel));
        assert_eq!(FuelType::parse("Hybrid"), Some(FuelType::Hybrid));
    }

    #[test]
    fn parse_rejects_unknown_labels() {
        assert_eq!(FuelType::parse("Hydrogen"), None);
        assert_eq!(FuelType::parse(""), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for fuel in FuelType::ALL {
            assert_eq!(FuelType::parse(fuel.as_str()), Some(fuel));
        }
    }
}
