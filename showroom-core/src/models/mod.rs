mod catalog_entry;
mod fuel_type;
mod payment_method;
mod service_center;
mod service_type;

pub use catalog_entry::{CatalogEntry, VehicleDetails};
pub use fuel_type::FuelType;
pub use payment_method::PaymentMethod;
pub use service_center::{Coordinates, ServiceCenter};
pub use service_type::ServiceType;
