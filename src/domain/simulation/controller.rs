use uuid::Uuid;

use crate::api::simulation_dto::SimulationRequestDto;
use crate::domain::simulation::aggregation::KpiReport;
use crate::domain::simulation::allocator::OrderAllocator;
use crate::domain::simulation::delivery_record::DeliveryRecord;
use crate::domain::simulation::engine_config::EngineConfig;
use crate::domain::simulation::ledger::ANALYTICS_TARGET;
use crate::domain::simulation::request::RunParameters;
use crate::domain::simulation::run::{DriverShift, RunPhase, SimulationRun};
use crate::domain::store::fleet_repository::FleetRepository;
use crate::domain::store::run_history::RunHistory;
use crate::domain::store::snapshot::FleetSnapshot;
use crate::domain::utils::clock::SharedClock;
use crate::domain::utils::id::{OperatorId, SimulationRunId};
use crate::error::{Error, Result};

/// A completed run together with the per-order results it produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run: SimulationRun,
    pub deliveries: Vec<DeliveryRecord>,
}

/// Drives one simulation from request to recorded run.
#[derive(Debug, Clone)]
pub struct SimulationRunController {
    config: EngineConfig,
    clock: SharedClock,
}

impl SimulationRunController {
    pub fn new(config: EngineConfig, clock: SharedClock) -> Self {
        Self { config, clock }
    }

    /**
     * Runs the whole pipeline against a snapshot without touching any store.
     *
     * Validation failures come back as `Error::Rejected` before anything is
     * allocated. On success the returned deliveries are what the caller has to
     * write back to its orders.
     */
    pub fn simulate(&self, snapshot: &FleetSnapshot, request: &SimulationRequestDto, operator: &OperatorId) -> Result<RunOutcome> {
        let run_id = SimulationRunId::new(Uuid::new_v4().to_string());
        let now = self.clock.now();
        let mut phase = RunPhase::Validating;

        let params = match RunParameters::validate(request, snapshot.active_driver_count()) {
            Ok(params) => params,
            Err(e) => {
                advance(&run_id, &mut phase, RunPhase::Rejected);
                log::warn!("Simulation run {} rejected: {}", run_id, e);
                tracing::warn!(
                    target: ANALYTICS_TARGET,
                    RunId = %run_id,
                    SimulatedBy = %operator,
                    Reason = %e,
                    "Simulation run rejected"
                );
                return Err(Error::Rejected(e));
            }
        };

        advance(&run_id, &mut phase, RunPhase::Allocating);
        log::info!(
            "Simulation run {} by {}: {} drivers from {} with at most {}h each, {} pending orders.",
            run_id,
            operator,
            params.driver_count,
            params.route_start_time.format("%H:%M"),
            params.max_hours_per_driver,
            snapshot.pending_order_count()
        );

        let allocation = OrderAllocator::new(&self.config).allocate(snapshot, &params, self.clock.today());

        advance(&run_id, &mut phase, RunPhase::Aggregating);
        let kpis = KpiReport::from_deliveries(&allocation.deliveries);

        let run = SimulationRun {
            id: run_id.clone(),
            simulated_by: operator.clone(),
            parameters: params,
            kpis,
            processed_order_ids: allocation.deliveries.iter().map(|delivery| delivery.order_id.clone()).collect(),
            skipped_orders: allocation.skipped,
            unassigned_order_ids: allocation.unassigned,
            driver_shifts: allocation.driver_loads.iter().map(DriverShift::from).collect(),
            simulation_timestamp: now,
        };

        advance(&run_id, &mut phase, RunPhase::Completed);

        if !run.is_complete_allocation() {
            log::warn!("Run {} left {} orders pending for lack of driver hours.", run.id, run.unassigned_order_ids.len());
        }

        tracing::info!(
            target: ANALYTICS_TARGET,
            RunId = %run.id,
            SimulatedBy = %run.simulated_by,
            NumberOfDrivers = run.parameters.driver_count,
            TotalDeliveries = run.kpis.total_deliveries,
            OnTimeDeliveries = run.kpis.on_time_deliveries,
            LateDeliveries = run.kpis.late_deliveries,
            SkippedOrders = run.skipped_orders.len(),
            UnassignedOrders = run.unassigned_order_ids.len(),
            TotalProfit = %run.kpis.total_profit,
            EfficiencyScore = %run.kpis.display_efficiency(),
            "Simulation run completed"
        );

        Ok(RunOutcome { run, deliveries: allocation.deliveries })
    }

    /// Simulates against the repository under its exclusive lock, records the run
    /// in `history` and commits the deliveries. The run is recorded before the
    /// commit, so a failed append leaves the orders untouched. A rejected run
    /// leaves both untouched.
    pub fn run<R: FleetRepository>(
        &self,
        repository: &R,
        history: &RunHistory,
        request: &SimulationRequestDto,
        operator: &OperatorId,
    ) -> Result<RunOutcome> {
        let outcome = repository.run_exclusive(|snapshot| {
            let outcome = self.simulate(snapshot, request, operator)?;
            history.append(outcome.run.clone())?;
            let deliveries = outcome.deliveries.clone();
            Ok((outcome, deliveries))
        })?;

        log::info!(
            "Run {} recorded: {} delivered, profit ₹{}, efficiency {}%.",
            outcome.run.id,
            outcome.run.kpis.total_deliveries,
            outcome.run.kpis.total_profit,
            outcome.run.kpis.display_efficiency()
        );

        Ok(outcome)
    }
}

fn advance(run_id: &SimulationRunId, phase: &mut RunPhase, next: RunPhase) {
    debug_assert!(phase.can_advance_to(next), "illegal run transition {:?} -> {:?}", phase, next);
    log::debug!("Run {}: {:?} -> {:?}", run_id, phase, next);
    *phase = next;
}
