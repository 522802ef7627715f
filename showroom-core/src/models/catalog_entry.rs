use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FuelType;

/// One purchasable vehicle in the static catalog.
///
/// Only `name`, `series`, `fuel_type` and the two prices take part in
/// querying and financing; the remaining fields are shown on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub series: String,
    pub fuel_type: FuelType,

    // Pricing
    pub base_price: Decimal,
    pub on_road_price: Decimal,

    // Descriptive specs
    pub engine: String,
    pub power: String,
    pub top_speed: String,
    pub mileage: String,
    pub seating_capacity: u8,
    pub transmission: String,

    #[serde(default)]
    pub details: VehicleDetails,
}

impl CatalogEntry {
    /// Marque every catalog model belongs to.
    pub const BRAND: &'static str = "BMW";

    /// Model name with the marque in front, e.g. `BMW i4 eDrive40`.
    pub fn full_name(&self) -> String {
        format!("{} {}", Self::BRAND, self.name)
    }
}

/// Performance figures, equipment lists and marketing copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleDetails {
    pub torque: String,
    pub acceleration: String,
    pub boot_space: String,
    pub description: String,
    /// Paint options, in the order they are offered.
    pub colors: Vec<String>,
    pub features: Vec<String>,
    pub safety_features: Vec<String>,
}
