//! Service-appointment booking wizard.
//!
//! | Step | Name        | Fields                                | Ready when |
//! |------|-------------|---------------------------------------|------------|
//! | 1    | `Selection` | `vehicle`, `service_type`             | both present |
//! | 2    | `Schedule`  | `date`, `time_slot`, `notes`          | date and slot present, date not before today |
//! | 3    | `Review`    | `payment_method`                      | always |
//!
//! The date is compared by calendar day only, so a slot earlier today is
//! still accepted. The payment method is recorded for the summary but not
//! validated; payment happens outside this crate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::clock::{Clock, SystemClock};
use super::controller::{StepFields, StepPolicy, Workflow};
use crate::catalog::Catalog;
use crate::models::ServiceType;
use crate::notify::Notification;

/// Field names used by the booking wizard.
pub mod field {
    pub const VEHICLE: &str = "vehicle";
    pub const SERVICE_TYPE: &str = "service_type";
    pub const DATE: &str = "date";
    pub const TIME_SLOT: &str = "time_slot";
    pub const NOTES: &str = "notes";
    pub const PAYMENT_METHOD: &str = "payment_method";
}

/// `date` fields are entered as ISO calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    Selection = 1,
    Schedule = 2,
    Review = 3,
}

impl BookingStep {
    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(step: usize) -> Option<Self> {
        match step {
            1 => Some(Self::Selection),
            2 => Some(Self::Schedule),
            3 => Some(Self::Review),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Selection => "Select Car & Service",
            Self::Schedule => "Select Date & Time",
            Self::Review => "Booking Summary",
        }
    }
}

/// Finalized booking, resolved against the catalog and service table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub vehicle_id: String,
    /// Display name, when the id is present in the catalog.
    pub vehicle_name: Option<String>,
    pub service_type_id: String,
    /// Resolved service, when the id is present in the service table.
    pub service: Option<ServiceType>,
    pub date: NaiveDate,
    pub time_slot: String,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
    /// Price of the selected service, zero when it cannot be resolved.
    pub total_amount: Decimal,
}

impl BookingSummary {
    /// Service name for display, falling back to its id.
    pub fn service_name(&self) -> &str {
        self.service
            .as_ref()
            .map_or(self.service_type_id.as_str(), |service| service.name.as_str())
    }
}

/// Readiness table and summary builder for the booking wizard.
#[derive(Debug, Clone)]
pub struct BookingPolicy<'a, C = SystemClock> {
    catalog: &'a Catalog,
    services: &'a [ServiceType],
    clock: C,
}

impl<'a, C: Clock> BookingPolicy<'a, C> {
    pub fn new(
        catalog: &'a Catalog,
        services: &'a [ServiceType],
        clock: C,
    ) -> Self {
        Self {
            catalog,
            services,
            clock,
        }
    }

    pub fn services(&self) -> &'a [ServiceType] {
        self.services
    }

    fn scheduled_date(
        &self,
        fields: &StepFields,
    ) -> Option<NaiveDate> {
        let raw = fields.present(BookingStep::Schedule.index(), field::DATE)?;
        NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
    }
}

impl<C: Clock> StepPolicy for BookingPolicy<'_, C> {
    type Summary = BookingSummary;

    fn total_steps(&self) -> usize {
        BookingStep::COUNT
    }

    fn is_ready(
        &self,
        step: usize,
        fields: &StepFields,
    ) -> bool {
        match BookingStep::from_index(step) {
            Some(BookingStep::Selection) => {
                fields.present(step, field::VEHICLE).is_some()
                    && fields.present(step, field::SERVICE_TYPE).is_some()
            }
            Some(BookingStep::Schedule) => {
                let date_ok = self
                    .scheduled_date(fields)
                    .is_some_and(|date| date >= self.clock.today());
                date_ok && fields.present(step, field::TIME_SLOT).is_some()
            }
            Some(BookingStep::Review) => true,
            None => false,
        }
    }

    fn summarize(
        &self,
        fields: &StepFields,
    ) -> Option<BookingSummary> {
        let selection = BookingStep::Selection.index();
        let schedule = BookingStep::Schedule.index();
        let review = BookingStep::Review.index();

        let vehicle_id = fields.present(selection, field::VEHICLE)?;
        let service_type_id = fields.present(selection, field::SERVICE_TYPE)?;
        let service = self
            .services
            .iter()
            .find(|service| service.id == service_type_id)
            .cloned();

        Some(BookingSummary {
            vehicle_id: vehicle_id.to_string(),
            vehicle_name: self.catalog.get(vehicle_id).map(|entry| entry.name.clone()),
            service_type_id: service_type_id.to_string(),
            total_amount: service
                .as_ref()
                .map_or(Decimal::ZERO, |service| service.price),
            service,
            date: self.scheduled_date(fields)?,
            time_slot: fields.present(schedule, field::TIME_SLOT)?.to_string(),
            notes: fields.present(schedule, field::NOTES).map(str::to_string),
            payment_method: fields
                .present(review, field::PAYMENT_METHOD)
                .map(str::to_string),
        })
    }

    fn completion_notice(
        &self,
        summary: &BookingSummary,
    ) -> Notification {
        Notification::success(
            "Service Booked Successfully!",
            format!(
                "Your {} appointment is confirmed for {} at {}.",
                summary.service_name(),
                summary.date.format(DATE_FORMAT),
                summary.time_slot
            ),
        )
    }
}

pub type BookingWizard<'a, C = SystemClock> = Workflow<BookingPolicy<'a, C>>;
