//! Vehicle catalog: the immutable entry list, the query engine that derives
//! filtered and sorted views of it, and the sources it is loaded from.

pub mod centers;
pub mod criteria;
pub mod query;
pub mod source;

use serde::Serialize;

pub use centers::find_service_centers;
pub use criteria::{QueryCriteria, SortMode};
pub use query::query;
pub use source::{CatalogError, CatalogRegistry, CatalogSource, CatalogSourceFactory, SourceConfig};

use crate::models::{CatalogEntry, FuelType};

/// The full, ordered catalog. Never mutated after loading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Distinct series tags in first-seen catalog order.
    pub fn series(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.series.as_str()) {
                seen.push(&entry.series);
            }
        }
        seen
    }

    /// Fuel types offered by the filter, regardless of catalog content.
    pub fn fuel_types(&self) -> [FuelType; 4] {
        FuelType::ALL
    }

    /// See [`query()`].
    pub fn query(
        &self,
        criteria: &QueryCriteria,
    ) -> Vec<&CatalogEntry> {
        query::query(&self.entries, criteria)
    }
}
