//! Entry points into the transactional flows.
//!
//! Authentication lives outside this crate. The caller passes the current
//! status in and these helpers refuse to construct a flow for a signed-out
//! user; the workflows themselves never look at it again.

use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::FinancingTerms;
use crate::catalog::Catalog;
use crate::models::ServiceType;
use crate::workflow::{BookingPolicy, BookingWizard, CheckoutFlow, CheckoutPolicy, Clock, Workflow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    SignedIn,
    #[default]
    SignedOut,
}

impl AuthStatus {
    pub fn is_signed_in(self) -> bool {
        self == Self::SignedIn
    }
}

impl From<bool> for AuthStatus {
    fn from(signed_in: bool) -> Self {
        if signed_in {
            Self::SignedIn
        } else {
            Self::SignedOut
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("sign in to continue")]
    NotAuthenticated,

    #[error("vehicle '{0}' is not in the catalog")]
    VehicleNotFound(String),
}

fn require_sign_in(
    auth: AuthStatus,
    flow: &str,
) -> Result<(), EntryError> {
    if auth.is_signed_in() {
        Ok(())
    } else {
        warn!(flow, "refusing to start flow for signed-out user");
        Err(EntryError::NotAuthenticated)
    }
}

/// Starts a fresh booking wizard at step 1.
pub fn begin_booking<'a, C: Clock>(
    auth: AuthStatus,
    catalog: &'a Catalog,
    services: &'a [ServiceType],
    clock: C,
) -> Result<BookingWizard<'a, C>, EntryError> {
    require_sign_in(auth, "booking")?;
    debug!("starting booking wizard");
    Ok(Workflow::new(BookingPolicy::new(catalog, services, clock)))
}

/// Starts a checkout for the vehicle with id `vehicle_id`.
pub fn begin_checkout<'a>(
    auth: AuthStatus,
    catalog: &'a Catalog,
    vehicle_id: &str,
    terms: &'a FinancingTerms,
) -> Result<CheckoutFlow<'a>, EntryError> {
    require_sign_in(auth, "checkout")?;
    let vehicle = catalog
        .get(vehicle_id)
        .ok_or_else(|| EntryError::VehicleNotFound(vehicle_id.to_string()))?;
    debug!(vehicle = %vehicle.id, "starting checkout");
    Ok(Workflow::new(CheckoutPolicy::new(vehicle, terms)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{CatalogEntry, FuelType};
    use crate::workflow::FixedClock;

    fn catalog() -> Catalog {
        Catalog::new(vec![CatalogEntry {
            id: "m340i".to_string(),
            name: "M340i xDrive".to_string(),
            series: "3 Series".to_string(),
            fuel_type: FuelType::Petrol,
            base_price: dec!(7290000),
            on_road_price: dec!(8350000),
            engine: "2998 cc".to_string(),
            power: "374 hp".to_string(),
            top_speed: "250 km/h".to_string(),
            mileage: "13 km/l".to_string(),
            seating_capacity: 5,
            transmission: "8-speed Steptronic".to_string(),
            details: Default::default(),
        }])
    }

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    #[test]
    fn signed_out_user_cannot_book() {
        let catalog = catalog();

        let result = begin_booking(AuthStatus::SignedOut, &catalog, &[], clock());

        assert_eq!(result.err(), Some(EntryError::NotAuthenticated));
    }

    #[test]
    fn signed_in_user_starts_at_step_one() {
        let catalog = catalog();

        let wizard = begin_booking(AuthStatus::from(true), &catalog, &[], clock()).unwrap();

        assert_eq!(wizard.current_step(), 1);
        assert!(!wizard.is_terminal());
    }

    #[test]
    fn checkout_requires_known_vehicle() {
        let catalog = catalog();
        let terms = FinancingTerms::default();

        let result = begin_checkout(AuthStatus::SignedIn, &catalog, "x7", &terms);

        assert_eq!(result.err(), Some(EntryError::VehicleNotFound("x7".to_string())));
    }

    #[test]
    fn checkout_checks_auth_before_lookup() {
        let catalog = catalog();
        let terms = FinancingTerms::default();

        let result = begin_checkout(AuthStatus::SignedOut, &catalog, "x7", &terms);

        assert_eq!(result.err(), Some(EntryError::NotAuthenticated));
    }

    #[test]
    fn checkout_binds_vehicle() {
        let catalog = catalog();
        let terms = FinancingTerms::default();

        let flow = begin_checkout(AuthStatus::SignedIn, &catalog, "m340i", &terms).unwrap();

        assert_eq!(flow.policy().vehicle().name, "M340i xDrive");
        assert_eq!(flow.total_steps(), 2);
    }
}
