//! CSV loaders for the vehicle catalog and the service-center directory.
//!
//! ## Catalog format
//!
//! | Column             | Type    | Notes                                        |
//! |--------------------|---------|----------------------------------------------|
//! | `id`               | string  | unique within the file                       |
//! | `model`            | string  | display name                                 |
//! | `series`           | string  | e.g. `X Series`                              |
//! | `fuel_type`        | string  | `Petrol`, `Diesel`, `Electric` or `Hybrid`   |
//! | `starting_price`   | decimal | ex-showroom price, non-negative              |
//! | `on_road_price`    | decimal | non-negative                                 |
//! | `engine`           | string  |                                              |
//! | `power`            | string  |                                              |
//! | `top_speed`        | string  |                                              |
//! | `mileage`          | string  |                                              |
//! | `seating_capacity` | integer |                                              |
//! | `transmission`     | string  |                                              |
//! | `torque`           | string  | optional                                     |
//! | `acceleration`     | string  | optional                                     |
//! | `boot_space`       | string  | optional                                     |
//! | `colors`           | list    | optional, `;`-separated                      |
//! | `features`         | list    | optional, `;`-separated                      |
//! | `safety_features`  | list    | optional, `;`-separated                      |
//! | `description`      | string  | optional                                     |
//!
//! ## Service-center format
//!
//! `id,name,address,city,state,pincode,phone,email,working_hours,working_days,services,rating,latitude,longitude`
//! with `services` separated by `;`. `latitude` and `longitude` are optional
//! but must be given together.
//!
//! Row numbers in errors are 1-based and do not count the header.
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use showroom_core::catalog::Catalog;
use showroom_core::models::{CatalogEntry, Coordinates, FuelType, ServiceCenter, VehicleDetails};
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Rows mirroring the CSV layouts
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    model: String,
    series: String,
    fuel_type: String,
    starting_price: Decimal,
    on_road_price: Decimal,
    engine: String,
    power: String,
    top_speed: String,
    mileage: String,
    seating_capacity: u8,
    transmission: String,
    #[serde(default)]
    torque: String,
    #[serde(default)]
    acceleration: String,
    #[serde(default)]
    boot_space: String,
    #[serde(default)]
    colors: String,
    #[serde(default)]
    features: String,
    #[serde(default)]
    safety_features: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ServiceCenterRow {
    id: String,
    name: String,
    address: String,
    city: String,
    state: String,
    pincode: String,
    phone: String,
    email: String,
    working_hours: String,
    working_days: String,
    services: String,
    rating: Decimal,
    #[serde(default)]
    latitude: Option<Decimal>,
    #[serde(default)]
    longitude: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while reading catalog or service-center CSV data.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// Structural problem: missing column, bad number, and so on.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognised fuel type '{value}' on row {row}")]
    InvalidFuelType { value: String, row: usize },

    #[error("negative {column} for '{id}' on row {row}")]
    NegativePrice {
        id: String,
        column: &'static str,
        row: usize,
    },

    #[error("duplicate id '{id}' on row {row}")]
    DuplicateId { id: String, row: usize },

    #[error("'{id}' on row {row} has only one of latitude and longitude")]
    PartialCoordinates { id: String, row: usize },
}

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn ensure_unique(
    seen: &mut HashSet<String>,
    id: &str,
    row: usize,
) -> Result<(), CatalogLoadError> {
    if seen.insert(id.to_string()) {
        Ok(())
    } else {
        Err(CatalogLoadError::DuplicateId {
            id: id.to_string(),
            row,
        })
    }
}

/// Splits a `;`-separated list column, dropping blank items.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_file(path: &Path) -> Result<String, CatalogLoadError> {
    fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Loader for the vehicle catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse a catalog from any reader. Entries keep file order.
    pub fn parse<R: Read>(input: R) -> Result<Catalog, CatalogLoadError> {
        let mut csv_reader = reader(input);
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row_number = index + 1;
            let row: CatalogRow = result?;
            ensure_unique(&mut seen, &row.id, row_number)?;
            entries.push(Self::convert_row(row, row_number)?);
        }

        debug!(entries = entries.len(), "parsed catalog");
        Ok(Catalog::new(entries))
    }

    pub fn load_from_str(input: &str) -> Result<Catalog, CatalogLoadError> {
        Self::parse(input.as_bytes())
    }

    pub fn load_from_file(path: &Path) -> Result<Catalog, CatalogLoadError> {
        Self::load_from_str(&read_file(path)?)
    }

    fn convert_row(
        row: CatalogRow,
        row_number: usize,
    ) -> Result<CatalogEntry, CatalogLoadError> {
        let fuel_type = FuelType::parse(&row.fuel_type).ok_or_else(|| {
            CatalogLoadError::InvalidFuelType {
                value: row.fuel_type.clone(),
                row: row_number,
            }
        })?;

        for (column, price) in [
            ("starting_price", row.starting_price),
            ("on_road_price", row.on_road_price),
        ] {
            if price.is_sign_negative() && !price.is_zero() {
                return Err(CatalogLoadError::NegativePrice {
                    id: row.id,
                    column,
                    row: row_number,
                });
            }
        }

        Ok(CatalogEntry {
            id: row.id,
            name: row.model,
            series: row.series,
            fuel_type,
            base_price: row.starting_price,
            on_road_price: row.on_road_price,
            engine: row.engine,
            power: row.power,
            top_speed: row.top_speed,
            mileage: row.mileage,
            seating_capacity: row.seating_capacity,
            transmission: row.transmission,
            details: VehicleDetails {
                torque: row.torque,
                acceleration: row.acceleration,
                boot_space: row.boot_space,
                description: row.description,
                colors: split_list(&row.colors),
                features: split_list(&row.features),
                safety_features: split_list(&row.safety_features),
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Service centers
// ---------------------------------------------------------------------------

/// Loader for the service-center directory.
pub struct ServiceCenterLoader;

impl ServiceCenterLoader {
    pub fn parse<R: Read>(input: R) -> Result<Vec<ServiceCenter>, CatalogLoadError> {
        let mut csv_reader = reader(input);
        let mut seen = HashSet::new();
        let mut centers = Vec::new();

        for (index, result) in csv_reader.deserialize().enumerate() {
            let row_number = index + 1;
            let row: ServiceCenterRow = result?;
            ensure_unique(&mut seen, &row.id, row_number)?;
            centers.push(Self::convert_row(row, row_number)?);
        }

        debug!(centers = centers.len(), "parsed service centers");
        Ok(centers)
    }

    pub fn load_from_str(input: &str) -> Result<Vec<ServiceCenter>, CatalogLoadError> {
        Self::parse(input.as_bytes())
    }

    pub fn load_from_file(path: &Path) -> Result<Vec<ServiceCenter>, CatalogLoadError> {
        Self::load_from_str(&read_file(path)?)
    }

    fn convert_row(
        row: ServiceCenterRow,
        row_number: usize,
    ) -> Result<ServiceCenter, CatalogLoadError> {
        let coordinates = match (row.latitude, row.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            (None, None) => None,
            _ => {
                return Err(CatalogLoadError::PartialCoordinates {
                    id: row.id,
                    row: row_number,
                });
            }
        };

        Ok(ServiceCenter {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            state: row.state,
            pincode: row.pincode,
            phone: row.phone,
            email: row.email,
            working_hours: row.working_hours,
            working_days: row.working_days,
            services: split_list(&row.services),
            rating: row.rating,
            coordinates,
        })
    }
}
