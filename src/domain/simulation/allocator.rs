use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::fleet::driver::Driver;
use crate::domain::fleet::order::Order;
use crate::domain::fleet::route::Route;
use crate::domain::rules::delivery_time::delivery_instant;
use crate::domain::rules::financial;
use crate::domain::simulation::delivery_record::DeliveryRecord;
use crate::domain::simulation::engine_config::{DriverSelection, EngineConfig};
use crate::domain::simulation::load_compare::{DriverLoad, LoadCompare};
use crate::domain::simulation::request::RunParameters;
use crate::domain::store::snapshot::FleetSnapshot;
use crate::domain::utils::id::{OrderId, RouteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    RouteMissing,
    RouteInactive,
}

/// Pending order left out of allocation because its route cannot be driven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOrder {
    pub order_id: OrderId,
    pub order_code: String,
    pub route_id: RouteId,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct AllocationOutcome {
    pub deliveries: Vec<DeliveryRecord>,
    pub skipped: Vec<SkippedOrder>,
    /// Valid orders no selected driver had hours left for. They stay pending.
    pub unassigned: Vec<OrderId>,
    pub driver_loads: Vec<DriverLoad>,
}

/**
 * Greedy least-loaded allocator.
 *
 * Orders are taken in business order number order. Each goes to the selected
 * driver with the fewest committed minutes that can still absorb the delivery
 * (including fatigue) without exceeding the hour cap, counting the hours the
 * driver already worked today. Ties go to the lower driver id.
 */
pub struct OrderAllocator<'a> {
    config: &'a EngineConfig,
}

impl<'a> OrderAllocator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// First `count` active drivers under the configured selection policy.
    pub fn select_drivers(&self, drivers: &[Driver], count: usize) -> Vec<Driver> {
        let mut active: Vec<&Driver> = drivers.iter().filter(|d| d.active).collect();

        match self.config.driver_selection {
            DriverSelection::LeastWorkedFirst => {
                active.sort_by(|a, b| a.current_shift_hours.cmp(&b.current_shift_hours).then_with(|| a.id.cmp(&b.id)))
            }
            DriverSelection::ById => active.sort_by(|a, b| a.id.cmp(&b.id)),
        }

        active.into_iter().take(count).cloned().collect()
    }

    pub fn allocate(&self, snapshot: &FleetSnapshot, params: &RunParameters, run_date: NaiveDate) -> AllocationOutcome {
        let rules = &self.config.rules;
        let shift_start = run_date.and_time(params.route_start_time);
        let cap_minutes = params.cap_minutes();

        let routes: HashMap<&RouteId, &Route> = snapshot.routes.iter().map(|route| (&route.route_id, route)).collect();

        let mut loads: Vec<DriverLoad> =
            self.select_drivers(&snapshot.drivers, params.driver_count).into_iter().map(|driver| DriverLoad::new(driver, rules)).collect();

        let mut pending: Vec<&Order> = snapshot.orders.iter().filter(|order| order.is_pending()).collect();
        pending.sort_by(|a, b| a.order_code.cmp(&b.order_code).then_with(|| a.id.cmp(&b.id)));

        let mut outcome = AllocationOutcome::default();

        for order in pending {
            let route = match routes.get(&order.assigned_route_id) {
                Some(route) if route.active => *route,
                Some(_) => {
                    log::warn!("Route {} is inactive, skipping order {}.", order.assigned_route_id, order.order_code);
                    outcome.skipped.push(skipped(order, SkipReason::RouteInactive));
                    continue;
                }
                None => {
                    log::warn!("Route {} not found for order {}.", order.assigned_route_id, order.order_code);
                    outcome.skipped.push(skipped(order, SkipReason::RouteMissing));
                    continue;
                }
            };

            let chosen = loads
                .iter()
                .enumerate()
                .filter(|(_, load)| load.fits(load.duration_for(route), cap_minutes))
                .min_by(|(_, a), (_, b)| LoadCompare::compare(a, b))
                .map(|(index, _)| index);

            let Some(index) = chosen else {
                log::debug!("No selected driver has capacity left for order {}, leaving it pending.", order.order_code);
                outcome.unassigned.push(order.id.clone());
                continue;
            };

            let load = &mut loads[index];
            let duration_minutes = load.duration_for(route);
            let start_offset_minutes = load.commit(duration_minutes);
            let financials = financial::evaluate(order.value_rs, route, duration_minutes, rules);

            log::debug!(
                "Order {} delivered by {} in {} min. Value: ₹{}, On time: {}, Penalty: ₹{}, Bonus: ₹{}, Profit: ₹{}",
                order.order_code,
                load.driver.id,
                duration_minutes,
                order.value_rs,
                financials.delivered_on_time,
                financials.penalty,
                financials.bonus,
                financials.profit
            );

            outcome.deliveries.push(DeliveryRecord {
                order_id: order.id.clone(),
                order_code: order.order_code.clone(),
                driver_id: load.driver.id.clone(),
                route_id: route.route_id.clone(),
                traffic_level: route.traffic_level,
                value_rs: order.value_rs,
                start_offset_minutes,
                duration_minutes,
                delivered_at: delivery_instant(shift_start, start_offset_minutes, duration_minutes),
                financials,
            });
        }

        outcome.driver_loads = loads;
        outcome
    }
}

fn skipped(order: &Order, reason: SkipReason) -> SkippedOrder {
    SkippedOrder { order_id: order.id.clone(), order_code: order.order_code.clone(), route_id: order.assigned_route_id.clone(), reason }
}
