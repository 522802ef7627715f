use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bookable workshop service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    /// Human-readable estimate such as `"3-4 hours"`.
    pub duration: String,
}
