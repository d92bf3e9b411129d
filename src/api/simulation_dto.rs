use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::fleet_dto::OrderDto;
use crate::domain::simulation::allocator::{SkipReason, SkippedOrder};
use crate::domain::simulation::run::{DriverShift, SimulationRun};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequestDto {
    pub number_of_drivers: i64,
    /// `HH:MM`, 24h clock.
    pub route_start_time: String,
    pub max_hours_per_driver: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRunDto {
    pub id: String,
    pub simulated_by: String,
    pub number_of_drivers: usize,
    pub route_start_time: String,
    pub max_hours_per_driver: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub total_profit: Decimal,
    pub total_bonuses: Decimal,
    pub total_penalties: Decimal,
    pub total_fuel_cost: Decimal,
    pub fuel_cost_breakdown: BTreeMap<String, Decimal>,
    pub on_time_deliveries: usize,
    pub late_deliveries: usize,
    pub total_deliveries: usize,
    pub efficiency_score: Decimal,
    pub simulation_timestamp: DateTime<Utc>,

    pub processed_order_ids: Vec<String>,
    pub skipped_orders: Vec<SkippedOrderDto>,
    pub unassigned_order_ids: Vec<String>,
    pub driver_shifts: Vec<DriverShiftDto>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SkippedOrderDto {
    pub id: String,
    pub order_id: String,
    pub route_id: String,
    pub reason: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DriverShiftDto {
    pub driver_id: String,
    pub assigned_orders: usize,
    pub committed_minutes: i64,
    pub total_hours: Decimal,
}

/// What the CLI hands back: the run plus the orders it delivered.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponseDto {
    pub run: SimulationRunDto,
    pub updated_orders: Vec<OrderDto>,
}

impl From<&SkippedOrder> for SkippedOrderDto {
    fn from(skipped: &SkippedOrder) -> Self {
        let reason = match skipped.reason {
            SkipReason::RouteMissing => "RouteMissing",
            SkipReason::RouteInactive => "RouteInactive",
        };
        SkippedOrderDto {
            id: skipped.order_id.id.clone(),
            order_id: skipped.order_code.clone(),
            route_id: skipped.route_id.id.clone(),
            reason: reason.to_string(),
        }
    }
}

impl From<&DriverShift> for DriverShiftDto {
    fn from(shift: &DriverShift) -> Self {
        DriverShiftDto {
            driver_id: shift.driver_id.id.clone(),
            assigned_orders: shift.assigned_orders,
            committed_minutes: shift.committed_minutes,
            total_hours: shift.total_hours,
        }
    }
}

impl From<&SimulationRun> for SimulationRunDto {
    fn from(run: &SimulationRun) -> Self {
        let kpis = &run.kpis;
        SimulationRunDto {
            id: run.id.id.clone(),
            simulated_by: run.simulated_by.id.clone(),
            number_of_drivers: run.parameters.driver_count,
            route_start_time: run.parameters.route_start_time.format("%H:%M").to_string(),
            max_hours_per_driver: run.parameters.max_hours_per_driver,
            notes: run.parameters.notes.clone(),
            total_profit: kpis.total_profit,
            total_bonuses: kpis.total_bonuses,
            total_penalties: kpis.total_penalties,
            total_fuel_cost: kpis.total_fuel_cost,
            fuel_cost_breakdown: kpis.fuel_cost_breakdown.iter().map(|(level, cost)| (level.to_string(), *cost)).collect(),
            on_time_deliveries: kpis.on_time_deliveries,
            late_deliveries: kpis.late_deliveries,
            total_deliveries: kpis.total_deliveries,
            efficiency_score: kpis.display_efficiency(),
            simulation_timestamp: run.simulation_timestamp,
            processed_order_ids: run.processed_order_ids.iter().map(|id| id.id.clone()).collect(),
            skipped_orders: run.skipped_orders.iter().map(Into::into).collect(),
            unassigned_order_ids: run.unassigned_order_ids.iter().map(|id| id.id.clone()).collect(),
            driver_shifts: run.driver_shifts.iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn request_reads_camel_case() {
        let json = r#"{ "numberOfDrivers": 3, "routeStartTime": "09:00", "maxHoursPerDriver": 8.5 }"#;
        let request: SimulationRequestDto = serde_json::from_str(json).unwrap();

        assert_eq!(request.number_of_drivers, 3);
        assert_eq!(request.route_start_time, "09:00");
        assert_eq!(request.max_hours_per_driver, dec!(8.5));
        assert!(request.notes.is_none());
    }

    #[test]
    fn efficiency_is_reported_to_two_decimals() {
        use crate::domain::simulation::aggregation::KpiReport;
        use crate::domain::simulation::request::RunParameters;
        use crate::domain::utils::id::{OperatorId, SimulationRunId};
        use chrono::{NaiveTime, TimeZone};

        let kpis = KpiReport { on_time_deliveries: 2, late_deliveries: 1, total_deliveries: 3, efficiency_score: dec!(200) / dec!(3), ..KpiReport::default() };
        let run = SimulationRun {
            id: SimulationRunId::new("run-1"),
            simulated_by: OperatorId::new("ops"),
            parameters: RunParameters { driver_count: 1, route_start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(), max_hours_per_driver: dec!(8), notes: None },
            kpis,
            processed_order_ids: Vec::new(),
            skipped_orders: Vec::new(),
            unassigned_order_ids: Vec::new(),
            driver_shifts: Vec::new(),
            simulation_timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
        };

        let dto = SimulationRunDto::from(&run);
        assert_eq!(dto.efficiency_score, dec!(66.67));
        assert_ne!(run.kpis.efficiency_score, dec!(66.67));
    }

    #[test]
    fn skip_reason_is_named() {
        use crate::domain::utils::id::{OrderId, RouteId};

        let skipped = SkippedOrder {
            order_id: OrderId::new("o-7"),
            order_code: "ORD007".to_string(),
            route_id: RouteId::new("R404"),
            reason: SkipReason::RouteMissing,
        };
        let dto = SkippedOrderDto::from(&skipped);

        assert_eq!(dto.reason, "RouteMissing");
        assert_eq!(serde_json::to_value(&dto).unwrap()["orderId"], "ORD007");
    }
}
