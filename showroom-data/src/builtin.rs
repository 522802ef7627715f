//! Static tables shipped with the binary.

use rust_decimal::Decimal;
use showroom_core::catalog::Catalog;
use showroom_core::models::{ServiceCenter, ServiceType};

use crate::loader::{CatalogLoadError, CatalogLoader, ServiceCenterLoader};

const CATALOG_CSV: &str = include_str!("../data/catalog.csv");
const SERVICE_CENTERS_CSV: &str = include_str!("../data/service_centers.csv");

/// Appointment slots offered by the booking wizard.
pub const TIME_SLOTS: [&str; 8] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "02:00 PM", "03:00 PM", "04:00 PM", "05:00 PM",
];

pub fn catalog() -> Result<Catalog, CatalogLoadError> {
    CatalogLoader::load_from_str(CATALOG_CSV)
}

pub fn service_centers() -> Result<Vec<ServiceCenter>, CatalogLoadError> {
    ServiceCenterLoader::load_from_str(SERVICE_CENTERS_CSV)
}

/// Bookable workshop services, in the order the booking form lists them.
pub fn service_types() -> Vec<ServiceType> {
    [
        ("general", "General Service", 15000, "3-4 hours"),
        ("oil-change", "Oil Change", 8000, "1-2 hours"),
        ("full-service", "Full Service", 35000, "6-8 hours"),
        ("ac-service", "AC Service", 12000, "2-3 hours"),
        ("brake-check", "Brake Inspection", 5000, "1 hour"),
        ("tire-rotation", "Tire Rotation & Alignment", 6000, "1-2 hours"),
    ]
    .into_iter()
    .map(|(id, name, price, duration)| ServiceType {
        id: id.to_string(),
        name: name.to_string(),
        price: Decimal::from(price),
        duration: duration.to_string(),
    })
    .collect()
}
