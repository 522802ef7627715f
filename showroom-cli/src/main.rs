use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use showroom_core::catalog::{QueryCriteria, SortMode};
use showroom_core::models::{FuelType, PaymentMethod};
use showroom_core::notify::NotificationSink;
use showroom_core::session::AuthStatus;
use showroom_core::workflow::SystemClock;
use showroom_data::builtin::TIME_SLOTS;
use tracing::{debug, warn};

use showroom_cli::app::{BookingRequest, CheckoutRequest, FinanceRequest, Outcome, Showroom};
use showroom_cli::config::ShowroomConfig;
use showroom_cli::console::ConsoleSink;
use showroom_cli::logging;
use showroom_cli::utils::{parse_fuel_type, parse_payment_method, parse_sort_mode};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Browse the vehicle catalog, price a loan, book a service or place an order.
#[derive(Debug, Parser)]
#[command(name = "showroom", version, about)]
struct Cli {
    /// Configuration file. Defaults to `showroom.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read the catalog from this CSV file instead of the configured source.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log level or EnvFilter directive. Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search and filter the catalog.
    Search {
        /// Matched against model name and series.
        #[arg(long, default_value = "")]
        text: String,

        #[arg(long, value_parser = parse_fuel_type)]
        fuel: Option<FuelType>,

        #[arg(long)]
        series: Option<String>,

        /// name, price-low or price-high.
        #[arg(long, value_parser = parse_sort_mode, default_value = "name")]
        sort: SortMode,
    },

    /// Specifications and price breakdown for one vehicle.
    Show { id: String },

    /// Monthly installment for a financed purchase.
    Emi {
        id: String,

        #[arg(long, default_value_t = 20)]
        down_payment: u32,

        /// Loan tenure in months.
        #[arg(long, default_value_t = 36)]
        tenure: u32,
    },

    /// Book a service appointment.
    Book {
        #[arg(long)]
        vehicle: String,

        /// Service type id, e.g. `general` or `oil-change`.
        #[arg(long)]
        service: String,

        /// Appointment date, YYYY-MM-DD.
        #[arg(long)]
        date: String,

        /// Time slot, e.g. "10:00 AM".
        #[arg(long)]
        time: String,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        payment: Option<String>,

        #[arg(long)]
        signed_in: bool,
    },

    /// Place an order for a vehicle.
    Checkout {
        id: String,

        /// upi, credit, debit or netbanking.
        #[arg(long, value_parser = parse_payment_method)]
        payment: PaymentMethod,

        /// Finance the purchase instead of paying in full.
        #[arg(long)]
        finance: bool,

        #[arg(long, default_value_t = 20, requires = "finance")]
        down_payment: u32,

        #[arg(long, default_value_t = 36, requires = "finance")]
        tenure: u32,

        #[arg(long)]
        signed_in: bool,
    },

    /// Find service centers by city, name or state.
    Centers {
        #[arg(default_value = "")]
        query: String,
    },
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn report(outcome: Outcome) {
    println!("{}", outcome.report);
    ConsoleSink.notify(&outcome.notification);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref().unwrap_or("info"));

    let mut config =
        ShowroomConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if cli.log_level.is_none() && std::env::var_os("RUST_LOG").is_none() {
        logging::set_log_level(&config.logging.level)?;
    }
    if let Some(path) = &config.logging.file {
        logging::enable_file_logging(path)?;
    }
    if let Some(path) = &cli.catalog {
        config.catalog.backend = "csv".to_string();
        config.catalog.location = path.display().to_string();
    }

    debug!(?cli.command, "running command");
    let showroom = Showroom::load(&config).await?;

    match cli.command {
        Command::Search {
            text,
            fuel,
            series,
            sort,
        } => {
            let criteria = QueryCriteria {
                text,
                fuel_type: fuel,
                series,
                sort,
            };
            println!("{}", showroom.search(&criteria));
        }
        Command::Show { id } => println!("{}", showroom.show(&id)?),
        Command::Emi {
            id,
            down_payment,
            tenure,
        } => println!("{}", showroom.emi(&id, down_payment, tenure)?),
        Command::Book {
            vehicle,
            service,
            date,
            time,
            notes,
            payment,
            signed_in,
        } => {
            if !TIME_SLOTS.contains(&time.as_str()) {
                warn!(time = %time, "time slot is not one of the offered slots");
            }
            let request = BookingRequest {
                vehicle,
                service,
                date,
                time_slot: time,
                notes,
                payment,
            };
            report(showroom.book(&request, AuthStatus::from(signed_in), SystemClock));
        }
        Command::Checkout {
            id,
            payment,
            finance,
            down_payment,
            tenure,
            signed_in,
        } => {
            let request = CheckoutRequest {
                vehicle: id,
                payment,
                finance: finance.then_some(FinanceRequest {
                    down_payment_percent: down_payment,
                    tenure_months: tenure,
                }),
            };
            report(showroom.checkout(&request, AuthStatus::from(signed_in)));
        }
        Command::Centers { query } => println!("{}", showroom.centers(&query)),
    }

    Ok(())
}
