pub mod builtin;
pub mod loader;
pub mod sources;

pub use loader::{CatalogLoadError, CatalogLoader, ServiceCenterLoader};
pub use sources::{BuiltinCatalogSource, CsvCatalogSource, default_registry};
