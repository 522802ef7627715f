use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::FuelType;

/// Result ordering offered by the catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    #[default]
    NameAscending,
    PriceAscending,
    PriceDescending,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAscending => "name",
            Self::PriceAscending => "price-low",
            Self::PriceDescending => "price-high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "name" => Some(Self::NameAscending),
            "price-low" => Some(Self::PriceAscending),
            "price-high" => Some(Self::PriceDescending),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NameAscending => "Name (A-Z)",
            Self::PriceAscending => "Price: Low to High",
            Self::PriceDescending => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search, filter and sort parameters for one catalog query.
///
/// Every combination of values is valid. The default value selects the
/// whole catalog ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    /// Substring matched case-insensitively against name and series.
    pub text: String,
    pub fuel_type: Option<FuelType>,
    pub series: Option<String>,
    pub sort: SortMode,
}

impl QueryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(
        mut self,
        text: impl Into<String>,
    ) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_fuel_type(
        mut self,
        fuel_type: FuelType,
    ) -> Self {
        self.fuel_type = Some(fuel_type);
        self
    }

    pub fn with_series(
        mut self,
        series: impl Into<String>,
    ) -> Self {
        self.series = Some(series.into());
        self
    }

    pub fn sorted_by(
        mut self,
        sort: SortMode,
    ) -> Self {
        self.sort = sort;
        self
    }

    /// True when any filter narrows the result. Sort mode is not a filter.
    pub fn has_active_filters(&self) -> bool {
        !self.text.is_empty() || self.fuel_type.is_some() || self.series.is_some()
    }

    /// Resets every filter and the sort mode.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_criteria_has_no_active_filters() {
        let criteria = QueryCriteria::default();

        assert!(!criteria.has_active_filters());
        assert_eq!(criteria.sort, SortMode::NameAscending);
    }

    #[test]
    fn sort_mode_alone_is_not_a_filter() {
        let criteria = QueryCriteria::new().sorted_by(SortMode::PriceDescending);

        assert!(!criteria.has_active_filters());
    }

    #[test]
    fn any_filter_marks_criteria_active() {
        assert!(QueryCriteria::new().with_text("x").has_active_filters());
        assert!(
            QueryCriteria::new()
                .with_fuel_type(FuelType::Diesel)
                .has_active_filters()
        );
        assert!(QueryCriteria::new().with_series("X Series").has_active_filters());
    }

    #[test]
    fn clear_restores_defaults() {
        let mut criteria = QueryCriteria::new()
            .with_text("m340")
            .with_fuel_type(FuelType::Petrol)
            .with_series("3 Series")
            .sorted_by(SortMode::PriceAscending);

        criteria.clear();

        assert_eq!(criteria, QueryCriteria::default());
    }

    #[test]
    fn sort_mode_parses_its_own_codes() {
        assert_eq!(SortMode::parse("price-low"), Some(SortMode::PriceAscending));
        assert_eq!(SortMode::parse("price-high"), Some(SortMode::PriceDescending));
        assert_eq!(SortMode::parse("name"), Some(SortMode::NameAscending));
        assert_eq!(SortMode::parse("rating"), None);
    }
}
