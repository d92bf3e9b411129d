#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use greencart_sim::api::simulation_dto::SimulationRequestDto;
use greencart_sim::domain::fleet::driver::Driver;
use greencart_sim::domain::fleet::order::{Order, OrderStatus};
use greencart_sim::domain::fleet::route::{Route, TrafficLevel};
use greencart_sim::domain::simulation::controller::SimulationRunController;
use greencart_sim::domain::simulation::engine_config::EngineConfig;
use greencart_sim::domain::store::fleet_store::FleetStore;
use greencart_sim::domain::utils::clock::FixedClock;
use greencart_sim::domain::utils::id::{DriverId, OrderId, RouteId};

pub fn driver(id: &str, current_shift_hours: Decimal, fatigued: bool) -> Driver {
    Driver {
        id: DriverId::new(id),
        name: format!("Driver {}", id),
        current_shift_hours,
        past_7_day_work_hours: Decimal::from(40),
        worked_over_eight_hours_yesterday: fatigued,
        active: true,
    }
}

pub fn route(code: &str, distance_km: Decimal, traffic_level: TrafficLevel, base_time_minutes: i64) -> Route {
    Route { id: format!("rte-{}", code), route_id: RouteId::new(code), distance_km, traffic_level, base_time_minutes, active: true }
}

pub fn order(id: &str, code: &str, value_rs: Decimal, route_code: &str) -> Order {
    Order {
        id: OrderId::new(id),
        order_code: code.to_string(),
        value_rs,
        assigned_route_id: RouteId::new(route_code),
        assigned_driver_id: None,
        status: OrderStatus::Pending,
        delivery_timestamp: None,
        financials: None,
    }
}

pub fn store(drivers: Vec<Driver>, routes: Vec<Route>, orders: Vec<Order>) -> FleetStore {
    let store = FleetStore::new();
    for d in drivers {
        store.add_driver(d).unwrap();
    }
    for r in routes {
        store.add_route(r).unwrap();
    }
    for o in orders {
        store.add_order(o).unwrap();
    }
    store
}

/// Controller with a clock frozen on 2025-06-02 06:00 UTC.
pub fn controller() -> SimulationRunController {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 2, 6, 0, 0).unwrap());
    SimulationRunController::new(EngineConfig::default(), Arc::new(clock))
}

pub fn request(number_of_drivers: i64, route_start_time: &str, max_hours_per_driver: Decimal) -> SimulationRequestDto {
    SimulationRequestDto { number_of_drivers, route_start_time: route_start_time.to_string(), max_hours_per_driver, notes: None }
}
