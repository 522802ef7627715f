//! Multi-step flows built on one shared controller.

pub mod booking;
pub mod checkout;
pub mod clock;
pub mod controller;
pub mod error;

pub use booking::{BookingPolicy, BookingStep, BookingSummary, BookingWizard};
pub use checkout::{CheckoutFlow, CheckoutPolicy, CheckoutStep, CheckoutSummary};
pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{Completed, StepFields, StepPolicy, Workflow, WorkflowState};
pub use error::{Transition, WorkflowError};
