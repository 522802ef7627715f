//! Command handlers behind the `showroom` binary.
//!
//! Each handler returns the text to print so the binary stays a thin shell
//! and tests can drive the same paths without a terminal.

use anyhow::{Context, Result, anyhow};
use showroom_core::calculations::common::format_price;
use showroom_core::calculations::{FinancingPlan, FinancingTerms, PriceBreakdown};
use showroom_core::catalog::{Catalog, QueryCriteria, find_service_centers};
use showroom_core::models::{CatalogEntry, PaymentMethod, ServiceCenter, ServiceType};
use showroom_core::notify::Notification;
use showroom_core::session::{AuthStatus, begin_booking, begin_checkout};
use showroom_core::workflow::booking::{self, BookingStep, BookingSummary};
use showroom_core::workflow::checkout::{self, CheckoutSummary};
use showroom_core::workflow::{
    BookingWizard, CheckoutFlow, Clock, Completed, StepPolicy, Workflow, WorkflowError,
};
use showroom_data::{builtin, default_registry};
use tracing::{debug, info, warn};

use crate::config::ShowroomConfig;
use crate::utils::opt_display;

/// Printable result of a transactional command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub report: String,
    pub notification: Notification,
}

impl Outcome {
    fn rejected(
        report: impl Into<String>,
        error: &impl std::fmt::Display,
    ) -> Self {
        Self {
            report: report.into(),
            notification: Notification::rejected(error),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingRequest {
    pub vehicle: String,
    pub service: String,
    pub date: String,
    pub time_slot: String,
    pub notes: Option<String>,
    pub payment: Option<String>,
}

/// Financing selection for a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinanceRequest {
    pub down_payment_percent: u32,
    pub tenure_months: u32,
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub vehicle: String,
    pub payment: PaymentMethod,
    pub finance: Option<FinanceRequest>,
}

/// Everything the commands read: catalog, service tables and lender terms.
pub struct Showroom {
    catalog: Catalog,
    centers: Vec<ServiceCenter>,
    services: Vec<ServiceType>,
    terms: FinancingTerms,
}

impl Showroom {
    pub fn new(
        catalog: Catalog,
        centers: Vec<ServiceCenter>,
        services: Vec<ServiceType>,
        terms: FinancingTerms,
    ) -> Self {
        Self {
            catalog,
            centers,
            services,
            terms,
        }
    }

    /// Loads the catalog through the configured backend and the service
    /// tables from the built-in data.
    pub async fn load(config: &ShowroomConfig) -> Result<Self> {
        let source_config = config.catalog.source_config();
        debug!(backend = %source_config.backend, "opening catalog source");

        let source = default_registry()
            .create(&source_config)
            .await
            .context("failed to open catalog source")?;
        let catalog = source.load().await.context("failed to load catalog")?;
        let centers = builtin::service_centers().context("failed to load service centers")?;

        info!(
            vehicles = catalog.len(),
            centers = centers.len(),
            "showroom ready"
        );
        Ok(Self::new(
            catalog,
            centers,
            builtin::service_types(),
            config.financing.clone(),
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn vehicle(
        &self,
        id: &str,
    ) -> Result<&CatalogEntry> {
        self.catalog
            .get(id)
            .ok_or_else(|| anyhow!("no vehicle with id '{id}'"))
    }

    // ─── browsing ────────────────────────────────────────────────────────────

    pub fn search(
        &self,
        criteria: &QueryCriteria,
    ) -> String {
        let results = self.catalog.query(criteria);
        if results.is_empty() {
            return "No cars found matching your criteria.".to_string();
        }

        let mut lines = vec![format!(
            "Showing {} of {} cars (sorted by {})",
            results.len(),
            self.catalog.len(),
            criteria.sort.label()
        )];
        lines.extend(results.into_iter().map(|entry| {
            format!(
                "  {:<24} {:<24} {:<10} {:<8} {:>14}",
                entry.id,
                entry.name,
                entry.series,
                entry.fuel_type.as_str(),
                format_price(entry.base_price)
            )
        }));
        lines.join("\n")
    }

    pub fn show(
        &self,
        id: &str,
    ) -> Result<String> {
        let entry = self.vehicle(id)?;
        let breakdown = PriceBreakdown::for_entry(entry)?;
        let details = &entry.details;

        let mut lines = vec![format!("{} ({})", entry.full_name(), entry.series)];
        if !details.description.is_empty() {
            lines.push(format!("  {}", details.description));
        }
        lines.extend([
            String::new(),
            format!("  Fuel:          {}", entry.fuel_type),
            format!("  Engine:        {}", entry.engine),
            format!("  Power:         {}", entry.power),
            format!("  Torque:        {}", opt_display(non_empty(&details.torque))),
            format!("  0-100 km/h:    {}", opt_display(non_empty(&details.acceleration))),
            format!("  Top speed:     {}", entry.top_speed),
            format!("  Mileage:       {}", entry.mileage),
            format!("  Seats:         {}", entry.seating_capacity),
            format!("  Boot space:    {}", opt_display(non_empty(&details.boot_space))),
            format!("  Transmission:  {}", entry.transmission),
        ]);
        for (heading, items) in [
            ("Available Colors", &details.colors),
            ("Safety Features", &details.safety_features),
            ("Premium Features", &details.features),
        ] {
            if !items.is_empty() {
                lines.push(String::new());
                lines.push(heading.to_string());
                lines.extend(items.iter().map(|item| format!("  - {item}")));
            }
        }
        lines.push(String::new());
        lines.push(render_breakdown(&breakdown));
        Ok(lines.join("\n"))
    }

    /// Live financing calculator for one vehicle.
    pub fn emi(
        &self,
        id: &str,
        down_payment_percent: u32,
        tenure_months: u32,
    ) -> Result<String> {
        let entry = self.vehicle(id)?;
        let plan = FinancingPlan::new(
            entry.on_road_price,
            down_payment_percent,
            tenure_months,
            &self.terms,
        )?;

        Ok(format!("{}\n{}", entry.name, render_plan(&plan)?))
    }

    pub fn centers(
        &self,
        search: &str,
    ) -> String {
        let found = find_service_centers(&self.centers, search);
        if found.is_empty() {
            return "No service centers found.".to_string();
        }

        found
            .into_iter()
            .map(|center| {
                let mut block = format!(
                    "{} ({}★)\n  {}, {}, {} - {}\n  {} | {}\n  {}, {}\n  Services: {}",
                    center.name,
                    center.rating,
                    center.address,
                    center.city,
                    center.state,
                    center.pincode,
                    center.phone,
                    center.email,
                    center.working_days,
                    center.working_hours,
                    center.services.join(", ")
                );
                if let Some(url) = center.directions_url() {
                    block.push_str(&format!("\n  Directions: {url}"));
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    // ─── transactional flows ─────────────────────────────────────────────────

    pub fn book<C: Clock>(
        &self,
        request: &BookingRequest,
        auth: AuthStatus,
        clock: C,
    ) -> Outcome {
        let mut wizard = match begin_booking(auth, &self.catalog, &self.services, clock) {
            Ok(wizard) => wizard,
            Err(err) => return Outcome::rejected("Booking not started.", &err),
        };

        match run_booking(&mut wizard, request) {
            Ok(completed) => Outcome {
                report: render_booking(&completed.summary),
                notification: completed.notification,
            },
            Err(err) => {
                let step = wizard.current_step();
                let title = BookingStep::from_index(step).map_or("", BookingStep::title);
                Outcome::rejected(stopped_at(&wizard, title), &err)
            }
        }
    }

    pub fn checkout(
        &self,
        request: &CheckoutRequest,
        auth: AuthStatus,
    ) -> Outcome {
        let mut flow = match begin_checkout(auth, &self.catalog, &request.vehicle, &self.terms) {
            Ok(flow) => flow,
            Err(err) => return Outcome::rejected("Checkout not started.", &err),
        };

        if let Some(finance) = request.finance {
            let on_road = flow.policy().vehicle().on_road_price;
            if let Err(err) = FinancingPlan::new(
                on_road,
                finance.down_payment_percent,
                finance.tenure_months,
                &self.terms,
            ) {
                return Outcome::rejected("Financing selection is not valid.", &err);
            }
        }

        match run_checkout(&mut flow, request) {
            Ok(completed) => checkout_outcome(completed),
            Err(err) => Outcome::rejected(stopped_at(&flow, "Payment"), &err),
        }
    }
}

fn run_booking<C: Clock>(
    wizard: &mut BookingWizard<'_, C>,
    request: &BookingRequest,
) -> Result<Completed<BookingSummary>, WorkflowError> {
    let step = BookingStep::Selection.index();
    wizard.set_field(step, booking::field::VEHICLE, request.vehicle.as_str())?;
    wizard.set_field(step, booking::field::SERVICE_TYPE, request.service.as_str())?;
    wizard.advance()?;

    let step = BookingStep::Schedule.index();
    wizard.set_field(step, booking::field::DATE, request.date.as_str())?;
    wizard.set_field(step, booking::field::TIME_SLOT, request.time_slot.as_str())?;
    if let Some(notes) = &request.notes {
        wizard.set_field(step, booking::field::NOTES, notes.as_str())?;
    }
    wizard.advance()?;

    if let Some(payment) = &request.payment {
        let step = BookingStep::Review.index();
        wizard.set_field(step, booking::field::PAYMENT_METHOD, payment.as_str())?;
    }
    wizard.complete()
}

fn run_checkout(
    flow: &mut CheckoutFlow<'_>,
    request: &CheckoutRequest,
) -> Result<Completed<CheckoutSummary>, WorkflowError> {
    flow.set_field(1, checkout::field::PAYMENT_METHOD, request.payment.code())?;
    if let Some(finance) = request.finance {
        flow.set_field(1, checkout::field::FINANCING, "yes")?;
        flow.set_field(
            1,
            checkout::field::DOWN_PAYMENT_PERCENT,
            finance.down_payment_percent.to_string(),
        )?;
        flow.set_field(
            1,
            checkout::field::TENURE_MONTHS,
            finance.tenure_months.to_string(),
        )?;
    }
    flow.advance()?;
    flow.complete()
}

/// The order stands once the flow has completed, so a summary that cannot
/// be rendered is reported alongside the success notice.
fn checkout_outcome(completed: Completed<CheckoutSummary>) -> Outcome {
    let report = render_checkout(&completed.summary).unwrap_or_else(|err| {
        warn!(error = %err, "order summary could not be rendered");
        format!("Order placed. Summary unavailable: {err}")
    });
    Outcome {
        report,
        notification: completed.notification,
    }
}

fn stopped_at<P: StepPolicy>(
    workflow: &Workflow<P>,
    title: &str,
) -> String {
    format!(
        "Stopped at step {} of {}: {title}",
        workflow.current_step(),
        workflow.total_steps()
    )
}

// ─── rendering ───────────────────────────────────────────────────────────────

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|value| !value.is_empty())
}

fn render_breakdown(breakdown: &PriceBreakdown) -> String {
    [
        "Price Breakdown".to_string(),
        format!("  Ex-showroom price:  {:>14}", format_price(breakdown.ex_showroom)),
        format!("  Registration:       {:>14}", format_price(breakdown.registration)),
        format!("  Insurance:          {:>14}", format_price(breakdown.insurance)),
        format!("  Accessories:        {:>14}", format_price(breakdown.accessories)),
        format!("  Total on-road:      {:>14}", format_price(breakdown.total_on_road)),
    ]
    .join("\n")
}

fn render_plan(plan: &FinancingPlan) -> Result<String> {
    Ok([
        format!("  On-road price:   {:>14}", format_price(plan.on_road_price())),
        format!(
            "  Down payment:    {:>14} ({}%)",
            format_price(plan.down_payment_amount()?),
            plan.down_payment_percent()
        ),
        format!("  Loan amount:     {:>14}", format_price(plan.loan_amount()?)),
        format!("  Interest rate:   {:>13}% p.a.", plan.annual_rate()),
        format!("  Tenure:          {:>7} months", plan.tenure_months()),
        format!("  Monthly EMI:     {:>14}", format_price(plan.monthly_installment()?)),
        format!("  Total interest:  {:>14}", format_price(plan.total_interest()?)),
        format!("  Total payable:   {:>14}", format_price(plan.total_payable()?)),
    ]
    .join("\n"))
}

fn render_booking(summary: &BookingSummary) -> String {
    let service = match &summary.service {
        Some(service) => format!("{} ({})", service.name, service.duration),
        None => summary.service_type_id.clone(),
    };

    [
        "Booking Summary".to_string(),
        format!(
            "  Vehicle:  {}",
            summary.vehicle_name.as_deref().unwrap_or(&summary.vehicle_id)
        ),
        format!("  Service:  {service}"),
        format!("  Date:     {}", summary.date.format(booking::DATE_FORMAT)),
        format!("  Time:     {}", summary.time_slot),
        format!("  Notes:    {}", opt_display(summary.notes.as_deref())),
        format!("  Payment:  {}", opt_display(summary.payment_method.as_deref())),
        format!("  Total:    {}", format_price(summary.total_amount)),
    ]
    .join("\n")
}

fn render_checkout(summary: &CheckoutSummary) -> Result<String> {
    let mut sections = vec![
        format!("Order Summary: {}", summary.vehicle_name),
        format!("  Payment method: {}", summary.payment_method),
        render_breakdown(&summary.breakdown),
    ];
    if let Some(plan) = &summary.financing {
        sections.push("Financing".to_string());
        sections.push(render_plan(plan)?);
    }
    sections.push(format!("Due now: {}", format_price(summary.due_now()?)));
    Ok(sections.join("\n"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use showroom_core::calculations::FinancingError;
    use showroom_core::models::{FuelType, VehicleDetails};
    use showroom_core::workflow::{FixedClock, StepFields};

    use super::*;

    fn huge_entry() -> CatalogEntry {
        CatalogEntry {
            id: "huge".to_string(),
            name: "Huge".to_string(),
            base_price: Decimal::MAX,
            on_road_price: Decimal::MAX,
            ..x1()
        }
    }

    fn showroom() -> Showroom {
        Showroom::new(
            Catalog::new(vec![x1(), huge_entry()]),
            Vec::new(),
            builtin::service_types(),
            FinancingTerms::default(),
        )
    }

    fn x1() -> CatalogEntry {
        CatalogEntry {
            id: "x1".to_string(),
            name: "X1 sDrive18d".to_string(),
            series: "X Series".to_string(),
            fuel_type: FuelType::Diesel,
            base_price: dec!(5000000),
            on_road_price: dec!(6000000),
            engine: "1995 cc".to_string(),
            power: "148 hp".to_string(),
            top_speed: "219 km/h".to_string(),
            mileage: "20.4 km/l".to_string(),
            seating_capacity: 5,
            transmission: "7-speed DCT".to_string(),
            details: VehicleDetails {
                torque: "360 Nm".to_string(),
                colors: vec!["Alpine White".to_string(), "Utah Orange".to_string()],
                safety_features: vec!["6 Airbags".to_string()],
                description: "A compact SAV.".to_string(),
                ..VehicleDetails::default()
            },
        }
    }

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())
    }

    #[test]
    fn emi_matches_worked_example() {
        let report = showroom().emi("x1", 20, 36).unwrap();

        assert!(report.contains("₹12,00,000 (20%)"));
        assert!(report.contains("₹48,00,000"));
        assert!(report.contains("₹1,51,524"));
        assert!(report.contains("₹6,54,870"));
    }

    #[test]
    fn emi_rejects_out_of_range_down_payment() {
        let err = showroom().emi("x1", 5, 36).unwrap_err();

        assert!(err.to_string().contains("outside 10%..=50%"));
    }

    #[test]
    fn show_lists_breakdown() {
        let report = showroom().show("x1").unwrap();

        assert!(report.contains("Registration:"));
        assert!(report.contains("₹2,50,000"));
        assert!(report.contains("₹60,00,000"));
    }

    #[test]
    fn show_lists_detail_page_content() {
        let report = showroom().show("x1").unwrap();

        assert!(report.starts_with("BMW X1 sDrive18d (X Series)\n  A compact SAV."));
        assert!(report.contains("Torque:        360 Nm"));
        assert!(report.contains("Boot space:    —"));
        assert!(report.contains("Available Colors\n  - Alpine White\n  - Utah Orange"));
        assert!(report.contains("Safety Features\n  - 6 Airbags"));
        assert!(!report.contains("Premium Features"));
    }

    #[test]
    fn oversized_price_is_an_error_not_a_panic() {
        let showroom = showroom();

        let emi = showroom.emi("huge", 20, 36).unwrap_err();
        let show = showroom.show("huge").unwrap_err();

        assert_eq!(emi.to_string(), FinancingError::Overflow.to_string());
        assert_eq!(show.to_string(), FinancingError::Overflow.to_string());
    }

    #[test]
    fn oversized_financed_checkout_is_rejected() {
        let request = CheckoutRequest {
            vehicle: "huge".to_string(),
            payment: PaymentMethod::Upi,
            finance: Some(FinanceRequest {
                down_payment_percent: 20,
                tenure_months: 36,
            }),
        };

        let outcome = showroom().checkout(&request, AuthStatus::SignedIn);

        assert_eq!(outcome.report, "Financing selection is not valid.");
        assert_eq!(
            outcome.notification.description,
            "installment calculation overflowed"
        );
    }

    #[test]
    fn completed_checkout_stays_successful_when_summary_cannot_render() {
        let plan: FinancingPlan = toml::from_str(&format!(
            "on_road_price = \"{}\"\ndown_payment_percent = 20\ntenure_months = 36\nannual_rate = \"8.5\"\n",
            Decimal::MAX
        ))
        .unwrap();
        let completed = Completed {
            summary: CheckoutSummary {
                vehicle_id: "huge".to_string(),
                vehicle_name: "Huge".to_string(),
                payment_method: PaymentMethod::Upi,
                breakdown: PriceBreakdown::for_entry(&x1()).unwrap(),
                financing: Some(plan),
            },
            fields: StepFields::default(),
            notification: Notification::success("Order Placed Successfully!", "confirmed"),
        };

        let outcome = checkout_outcome(completed);

        assert!(outcome.notification.is_success());
        assert_eq!(outcome.notification.title, "Order Placed Successfully!");
        assert_eq!(
            outcome.report,
            "Order placed. Summary unavailable: installment calculation overflowed"
        );
    }

    #[test]
    fn booking_in_the_past_stops_at_schedule() {
        let request = BookingRequest {
            vehicle: "x1".to_string(),
            service: "general".to_string(),
            date: "2025-06-01".to_string(),
            time_slot: "10:00 AM".to_string(),
            ..Default::default()
        };

        let outcome = showroom().book(&request, AuthStatus::SignedIn, clock());

        assert!(!outcome.notification.is_success());
        assert_eq!(outcome.report, "Stopped at step 2 of 3: Select Date & Time");
    }

    #[test]
    fn checkout_with_invalid_tenure_is_rejected_up_front() {
        let request = CheckoutRequest {
            vehicle: "x1".to_string(),
            payment: PaymentMethod::Upi,
            finance: Some(FinanceRequest {
                down_payment_percent: 20,
                tenure_months: 18,
            }),
        };

        let outcome = showroom().checkout(&request, AuthStatus::SignedIn);

        assert_eq!(outcome.report, "Financing selection is not valid.");
        assert_eq!(
            outcome.notification.description,
            "tenure of 18 months is not offered"
        );
    }
}
