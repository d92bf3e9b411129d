mod common;

use chrono::{TimeZone, Utc};
use common::{driver, order, request, route, store};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use greencart_sim::api::fleet_dto::FleetDto;
use greencart_sim::domain::fleet::order::OrderStatus;
use greencart_sim::domain::fleet::route::TrafficLevel;
use greencart_sim::domain::simulation::controller::SimulationRunController;
use greencart_sim::domain::simulation::engine_config::EngineConfig;
use greencart_sim::domain::store::fleet_repository::FleetRepository;
use greencart_sim::domain::store::fleet_store::FleetStore;
use greencart_sim::domain::store::run_history::RunHistory;
use greencart_sim::domain::utils::clock::FixedClock;
use greencart_sim::domain::utils::id::{DriverId, OperatorId};

fn busy_store() -> FleetStore {
    let drivers = (1..=4).map(|i| driver(&format!("d-{}", i), Decimal::ZERO, false)).collect();
    let routes = vec![route("R001", dec!(5), TrafficLevel::Low, 20), route("R002", dec!(8), TrafficLevel::High, 30)];
    let orders = (1..=12).map(|i| order(&format!("o-{:02}", i), &format!("ORD{:03}", i), dec!(400), if i % 2 == 0 { "R001" } else { "R002" })).collect();
    store(drivers, routes, orders)
}

#[test]
fn concurrent_runs_never_deliver_an_order_twice() {
    let store = busy_store();
    let history = RunHistory::new();
    let controller = common::controller();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = store.clone();
            let history = history.clone();
            let controller = controller.clone();
            thread::spawn(move || {
                controller.run(&store, &history, &request(4, "09:00", dec!(10)), &OperatorId::new(format!("ops-{}", i))).unwrap()
            })
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let delivered: Vec<_> = outcomes.iter().flat_map(|o| o.run.processed_order_ids.iter().cloned()).collect();
    let unique: HashSet<_> = delivered.iter().cloned().collect();

    assert_eq!(delivered.len(), 12);
    assert_eq!(unique.len(), 12);
    assert_eq!(outcomes.iter().filter(|o| o.run.kpis.total_deliveries > 0).count(), 1);
    assert_eq!(history.len().unwrap(), 4);
    assert!(store.orders_with_status(OrderStatus::Pending).unwrap().is_empty());
}

#[test]
fn inactive_drivers_are_not_selectable() {
    let store = busy_store();
    store.set_driver_active(&DriverId::new("d-1"), false).unwrap();
    store.set_driver_active(&DriverId::new("d-2"), false).unwrap();

    let outcome = common::controller().run(&store, &RunHistory::new(), &request(2, "09:00", dec!(10)), &OperatorId::new("ops")).unwrap();
    let used: HashSet<&str> = outcome.deliveries.iter().map(|d| d.driver_id.as_str()).collect();

    assert_eq!(used, HashSet::from(["d-3", "d-4"]));
    assert!(common::controller().run(&store, &RunHistory::new(), &request(3, "09:00", dec!(10)), &OperatorId::new("ops")).is_err());
}

#[test]
fn history_is_newest_first_and_filterable() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 2, 6, 0, 0).unwrap());
    let controller = SimulationRunController::new(EngineConfig::default(), Arc::new(clock.clone()));
    let store = busy_store();
    let history = RunHistory::new();

    let first = controller.run(&store, &history, &request(1, "09:00", dec!(2)), &OperatorId::new("alice")).unwrap();
    clock.set(Utc.with_ymd_and_hms(2025, 6, 2, 7, 0, 0).unwrap());
    let second = controller.run(&store, &history, &request(1, "09:00", dec!(2)), &OperatorId::new("bob")).unwrap();
    clock.set(Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap());
    let third = controller.run(&store, &history, &request(1, "09:00", dec!(2)), &OperatorId::new("alice")).unwrap();

    let all: Vec<_> = history.all().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(all, vec![third.run.id.clone(), second.run.id.clone(), first.run.id.clone()]);

    let alice: Vec<_> = history.by_operator(&OperatorId::new("alice")).unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(alice, vec![third.run.id.clone(), first.run.id.clone()]);

    assert_eq!(history.latest().unwrap().map(|r| r.id), Some(third.run.id.clone()));
    assert_eq!(history.get(&second.run.id).unwrap().map(|r| r.simulated_by), Some(OperatorId::new("bob")));
    assert!(history.by_operator(&OperatorId::new("carol")).unwrap().is_empty());
}

#[test]
fn same_timestamp_runs_keep_reverse_append_order() {
    let store = busy_store();
    let history = RunHistory::new();
    let controller = common::controller();

    let a = controller.run(&store, &history, &request(1, "09:00", dec!(1)), &OperatorId::new("ops")).unwrap();
    let b = controller.run(&store, &history, &request(1, "09:00", dec!(1)), &OperatorId::new("ops")).unwrap();

    let ids: Vec<_> = history.all().unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![b.run.id, a.run.id]);
}

#[test]
fn fleet_round_trips_through_dto_after_a_run() {
    let store = busy_store();
    common::controller().run(&store, &RunHistory::new(), &request(4, "09:00", dec!(10)), &OperatorId::new("ops")).unwrap();

    let json = serde_json::to_string(&store.to_dto().unwrap()).unwrap();
    let reloaded = FleetStore::from_dto(serde_json::from_str::<FleetDto>(&json).unwrap()).unwrap();

    let delivered = reloaded.orders_with_status(OrderStatus::Delivered).unwrap();
    assert_eq!(delivered.len(), 12);
    assert!(delivered.iter().all(|o| o.assigned_driver_id.is_some() && o.delivery_timestamp.is_some() && o.financials.is_some()));
    assert_eq!(reloaded.snapshot().unwrap().pending_order_count(), 0);
}
