//! Catalog query engine.
//!
//! A query is a pure function of the catalog slice and a [`QueryCriteria`]
//! value. Filters are conjunctive and the result borrows the matching
//! entries from the catalog in the requested order. No criteria value is
//! rejected: when nothing matches the result is simply empty.
//!
//! # Ordering
//!
//! | Sort mode          | Key                                     |
//! |--------------------|-----------------------------------------|
//! | `NameAscending`    | collation key of the display name       |
//! | `PriceAscending`   | base price, cheapest first              |
//! | `PriceDescending`  | base price, most expensive first        |
//!
//! All three orderings are stable, so entries with equal keys keep their
//! catalog order.

use std::cmp::Reverse;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::criteria::{QueryCriteria, SortMode};
use crate::models::CatalogEntry;

/// Filters and sorts `catalog` according to `criteria`.
pub fn query<'a>(
    catalog: &'a [CatalogEntry],
    criteria: &QueryCriteria,
) -> Vec<&'a CatalogEntry> {
    let needle = criteria.text.to_lowercase();

    let mut result: Vec<&CatalogEntry> = catalog
        .iter()
        .filter(|entry| matches_text(entry, &needle))
        .filter(|entry| {
            criteria
                .fuel_type
                .is_none_or(|fuel| entry.fuel_type == fuel)
        })
        .filter(|entry| {
            criteria
                .series
                .as_deref()
                .is_none_or(|series| entry.series == series)
        })
        .collect();

    // slice sorts are stable; ties keep catalog order
    match criteria.sort {
        SortMode::NameAscending => result.sort_by_cached_key(|entry| collation_key(&entry.name)),
        SortMode::PriceAscending => result.sort_by_key(|entry| entry.base_price),
        SortMode::PriceDescending => result.sort_by_key(|entry| Reverse(entry.base_price)),
    }

    debug!(
        text = %criteria.text,
        fuel_type = ?criteria.fuel_type,
        series = ?criteria.series,
        sort = %criteria.sort,
        matched = result.len(),
        total = catalog.len(),
        "catalog query evaluated"
    );

    result
}

/// `needle` must already be lowercased. An empty needle matches everything.
fn matches_text(
    entry: &CatalogEntry,
    needle: &str,
) -> bool {
    needle.is_empty()
        || entry.name.to_lowercase().contains(needle)
        || entry.series.to_lowercase().contains(needle)
}

/// Sort key for display names: compatibility decomposition with combining
/// marks removed, then lowercased, so `"Émile"` sorts with `"emile"`.
pub(crate) fn collation_key(name: &str) -> String {
    name.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::FuelType;

    fn entry(
        id: &str,
        name: &str,
        series: &str,
        fuel_type: FuelType,
        base_price: Decimal,
    ) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: name.to_string(),
            series: series.to_string(),
            fuel_type,
            base_price,
            on_road_price: base_price * dec!(1.1),
            engine: "2998 cc".to_string(),
            power: "374 hp".to_string(),
            top_speed: "250 km/h".to_string(),
            mileage: "13 km/l".to_string(),
            seating_capacity: 5,
            transmission: "Automatic".to_string(),
            details: Default::default(),
        }
    }

    fn test_catalog() -> Vec<CatalogEntry> {
        vec![
            entry("x5", "X5 xDrive40i", "X Series", FuelType::Petrol, dec!(9600000)),
            entry("i4", "i4 eDrive40", "i Series", FuelType::Electric, dec!(7250000)),
            entry("320d", "320d M Sport", "3 Series", FuelType::Diesel, dec!(5600000)),
            entry("x1", "X1 sDrive18d", "X Series", FuelType::Diesel, dec!(5000000)),
            entry("330li", "330Li M Sport", "3 Series", FuelType::Petrol, dec!(5600000)),
            entry("xm", "XM", "M Series", FuelType::Hybrid, dec!(26000000)),
        ]
    }

    fn ids(result: &[&CatalogEntry]) -> Vec<String> {
        result.iter().map(|entry| entry.id.clone()).collect()
    }

    // =========================================================================
    // filtering
    // =========================================================================

    #[test]
    fn default_criteria_returns_whole_catalog_sorted_by_name() {
        let catalog = test_catalog();

        let result = query(&catalog, &QueryCriteria::default());

        assert_eq!(ids(&result), vec!["320d", "330li", "i4", "x1", "x5", "xm"]);
    }

    #[test]
    fn fuel_filter_keeps_only_matching_entries() {
        let catalog = vec![
            entry("a", "A", "Series A", FuelType::Electric, dec!(5000000)),
            entry("b", "B", "Series B", FuelType::Diesel, dec!(3000000)),
        ];
        let criteria = QueryCriteria::new().with_fuel_type(FuelType::Electric);

        let result = query(&catalog, &criteria);

        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn text_filter_matches_name_case_insensitively() {
        let catalog = test_catalog();
        let criteria = QueryCriteria::new().with_text("M SPORT");

        let result = query(&catalog, &criteria);

        assert_eq!(ids(&result), vec!["320d", "330li"]);
    }

    #[test]
    fn text_filter_matches_series() {
        let catalog = test_catalog();
        let criteria = QueryCriteria::new().with_text("x series");

        let result = query(&catalog, &criteria);

        assert_eq!(ids(&result), vec!["x1", "x5"]);
    }

    #[test]
    fn series_filter_requires_exact_series() {
        let catalog = test_catalog();
        let criteria = QueryCriteria::new().with_series("3 Series");

        let result = query(&catalog, &criteria);

        assert_eq!(ids(&result), vec!["320d", "330li"]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let catalog = test_catalog();
        let criteria = QueryCriteria::new()
            .with_series("X Series")
            .with_fuel_type(FuelType::Diesel)
            .with_text("x");

        let result = query(&catalog, &criteria);

        assert_eq!(ids(&result), vec!["x1"]);
    }

    #[test]
    fn no_match_yields_empty_result() {
        let catalog = test_catalog();
        let criteria = QueryCriteria::new().with_text("roadster");

        let result = query(&catalog, &criteria);

        assert!(result.is_empty());
    }

    #[test]
    fn empty_catalog_yields_empty_result() {
        let result = query(&[], &QueryCriteria::new().with_text("x5"));

        assert!(result.is_empty());
    }

    #[test]
    fn every_result_is_borrowed_from_catalog_and_passes_filters() {
        let catalog = test_catalog();
        let criteria = QueryCriteria::new()
            .with_text("s")
            .with_fuel_type(FuelType::Petrol);

        let result = query(&catalog, &criteria);

        assert!(!result.is_empty());
        for found in result {
            assert!(catalog.iter().any(|entry| std::ptr::eq(entry, found)));
            assert_eq!(found.fuel_type, FuelType::Petrol);
            assert!(
                found.name.to_lowercase().contains('s') || found.series.to_lowercase().contains('s')
            );
        }
    }

    // =========================================================================
    // sorting
    // =========================================================================

    #[test]
    fn price_ascending_is_stable_for_equal_prices() {
        let catalog = test_catalog();
        let criteria = QueryCriteria::new().sorted_by(SortMode::PriceAscending);

        let result = query(&catalog, &criteria);

        // 320d and 330li share a price; catalog order is 320d first
        assert_eq!(ids(&result), vec!["x1", "320d", "330li", "i4", "x5", "xm"]);
    }

    #[test]
    fn price_descending_is_stable_for_equal_prices() {
        let catalog = test_catalog();
        let criteria = QueryCriteria::new().sorted_by(SortMode::PriceDescending);

        let result = query(&catalog, &criteria);

        assert_eq!(ids(&result), vec!["xm", "x5", "i4", "320d", "330li", "x1"]);
    }

    #[test]
    fn name_sort_ignores_case_and_diacritics() {
        let catalog = vec![
            entry("1", "beta", "S", FuelType::Petrol, dec!(1)),
            entry("2", "Ángel", "S", FuelType::Petrol, dec!(1)),
            entry("3", "Alpha", "S", FuelType::Petrol, dec!(1)),
        ];

        let result = query(&catalog, &QueryCriteria::default());

        assert_eq!(ids(&result), vec!["3", "2", "1"]);
    }

    #[test]
    fn query_is_idempotent() {
        let catalog = test_catalog();
        let criteria = QueryCriteria::new()
            .with_text("series")
            .sorted_by(SortMode::PriceDescending);

        let first = ids(&query(&catalog, &criteria));
        let second = ids(&query(&catalog, &criteria));

        assert_eq!(first, second);
    }

    #[test]
    fn collation_key_folds_accents_and_case() {
        assert_eq!(collation_key("Émile"), "emile");
        assert_eq!(collation_key("X5 M"), "x5 m");
    }
}
