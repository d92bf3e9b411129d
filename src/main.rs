use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use greencart_sim::api::fleet_dto::OrderDto;
use greencart_sim::api::simulation_dto::{SimulationRequestDto, SimulationResponseDto, SimulationRunDto};
use greencart_sim::domain::simulation::controller::SimulationRunController;
use greencart_sim::domain::simulation::ledger::export_ledger;
use greencart_sim::domain::store::fleet_repository::FleetRepository;
use greencart_sim::domain::store::run_history::RunHistory;
use greencart_sim::domain::utils::clock::SystemClock;
use greencart_sim::domain::utils::id::OperatorId;
use greencart_sim::{load_engine_config, load_fleet_store, logger};

#[derive(Parser, Debug)]
#[command(name = "greencart-sim", about = "GreenCart delivery simulation and KPI engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Allocate pending orders to drivers and report the run KPIs.
    Run {
        /// Fleet JSON with drivers, routes and orders.
        #[arg(long)]
        fleet: PathBuf,

        /// Number of drivers to put on shift.
        #[arg(long)]
        drivers: i64,

        /// Route start time, HH:MM.
        #[arg(long)]
        start: String,

        /// Hour cap per driver, including hours already worked today.
        #[arg(long)]
        max_hours: Decimal,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long, default_value = "cli")]
        operator: String,

        /// JSON file overriding company rules.
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Write a `;`-separated delivery ledger here.
        #[arg(long)]
        ledger_csv: Option<PathBuf>,

        /// Write the fleet, with delivered orders updated, back to this file.
        #[arg(long)]
        save_fleet: Option<PathBuf>,
    },

    /// Show what a fleet file holds.
    Inspect {
        #[arg(long)]
        fleet: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();

    match Cli::parse().command {
        Command::Run { fleet, drivers, start, max_hours, notes, operator, rules, ledger_csv, save_fleet } => {
            let store = load_fleet_store(&fleet).with_context(|| format!("loading fleet '{}'", fleet.display()))?;
            let config = load_engine_config(rules.as_deref()).context("loading rules")?;

            let controller = SimulationRunController::new(config, Arc::new(SystemClock));
            let history = RunHistory::new();
            let request = SimulationRequestDto { number_of_drivers: drivers, route_start_time: start, max_hours_per_driver: max_hours, notes };

            let outcome = controller.run(&store, &history, &request, &OperatorId::new(operator))?;

            if let Some(path) = ledger_csv {
                export_ledger(&path, &outcome.run, &outcome.deliveries).with_context(|| format!("writing ledger '{}'", path.display()))?;
            }

            if let Some(path) = save_fleet {
                let file = File::create(&path).with_context(|| format!("creating '{}'", path.display()))?;
                serde_json::to_writer_pretty(file, &store.to_dto()?)?;
                log::info!("Updated fleet written to '{}'.", path.display());
            }

            let mut updated_orders: Vec<OrderDto> = Vec::with_capacity(outcome.run.processed_order_ids.len());
            for id in &outcome.run.processed_order_ids {
                if let Some(order) = store.order(id)? {
                    updated_orders.push((&order).into());
                }
            }

            let response = SimulationResponseDto { run: SimulationRunDto::from(&outcome.run), updated_orders };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::Inspect { fleet } => {
            let store = load_fleet_store(&fleet).with_context(|| format!("loading fleet '{}'", fleet.display()))?;
            let snapshot = store.snapshot()?;

            println!("Active drivers: {}", snapshot.active_driver_count());
            println!("Routes:         {} ({} active)", snapshot.routes.len(), snapshot.routes.iter().filter(|r| r.active).count());
            println!("Pending orders: {}", snapshot.pending_order_count());
        }
    }

    Ok(())
}
