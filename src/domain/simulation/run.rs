use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::simulation::aggregation::KpiReport;
use crate::domain::simulation::allocator::SkippedOrder;
use crate::domain::simulation::load_compare::DriverLoad;
use crate::domain::simulation::request::RunParameters;
use crate::domain::utils::id::{DriverId, OperatorId, OrderId, SimulationRunId};

/// Lifecycle of one run.
///
/// `Validating → Allocating → Aggregating → Completed`, or `Validating → Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RunPhase {
    Validating,
    Allocating,
    Aggregating,
    Completed,
    Rejected,
}

impl RunPhase {
    pub fn can_advance_to(self, next: RunPhase) -> bool {
        matches!(
            (self, next),
            (RunPhase::Validating, RunPhase::Allocating)
                | (RunPhase::Validating, RunPhase::Rejected)
                | (RunPhase::Allocating, RunPhase::Aggregating)
                | (RunPhase::Aggregating, RunPhase::Completed)
        )
    }
}

/// Workload one driver ended the run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverShift {
    pub driver_id: DriverId,
    pub assigned_orders: usize,
    pub committed_minutes: i64,
    /// Hours worked before the run plus committed minutes, in hours.
    pub total_hours: Decimal,
}

impl From<&DriverLoad> for DriverShift {
    fn from(load: &DriverLoad) -> Self {
        DriverShift {
            driver_id: load.driver.id.clone(),
            assigned_orders: load.assigned_orders,
            committed_minutes: load.committed_minutes,
            total_hours: load.total_hours(),
        }
    }
}

/// Immutable record of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationRun {
    pub id: SimulationRunId,
    pub simulated_by: OperatorId,
    pub parameters: RunParameters,
    pub kpis: KpiReport,
    pub processed_order_ids: Vec<OrderId>,
    pub skipped_orders: Vec<SkippedOrder>,
    pub unassigned_order_ids: Vec<OrderId>,
    pub driver_shifts: Vec<DriverShift>,
    pub simulation_timestamp: DateTime<Utc>,
}

impl SimulationRun {
    /// True when every valid pending order found a driver.
    pub fn is_complete_allocation(&self) -> bool {
        self.unassigned_order_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_forward_transitions() {
        assert!(RunPhase::Validating.can_advance_to(RunPhase::Allocating));
        assert!(RunPhase::Validating.can_advance_to(RunPhase::Rejected));
        assert!(RunPhase::Aggregating.can_advance_to(RunPhase::Completed));
        assert!(!RunPhase::Allocating.can_advance_to(RunPhase::Rejected));
        assert!(!RunPhase::Completed.can_advance_to(RunPhase::Validating));
        assert!(!RunPhase::Validating.can_advance_to(RunPhase::Completed));
    }
}
