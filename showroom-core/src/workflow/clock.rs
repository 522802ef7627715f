use chrono::{Local, NaiveDate};

/// Source of the current calendar day for date-gated steps.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local calendar day of the machine running the flow.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
