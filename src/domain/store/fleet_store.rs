use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::api::fleet_dto::FleetDto;
use crate::domain::fleet::driver::Driver;
use crate::domain::fleet::order::{Order, OrderStatus};
use crate::domain::fleet::route::Route;
use crate::domain::simulation::delivery_record::DeliveryRecord;
use crate::domain::store::fleet_repository::FleetRepository;
use crate::domain::store::snapshot::FleetSnapshot;
use crate::domain::utils::id::{DriverId, OrderId, RouteId};
use crate::error::{ConversionError, Error, Result};

new_key_type! {
    pub struct DriverKey;
    pub struct RouteKey;
    pub struct OrderKey;
}

#[derive(Debug)]
struct StoreInner {
    drivers: SlotMap<DriverKey, Driver>,
    routes: SlotMap<RouteKey, Route>,
    orders: SlotMap<OrderKey, Order>,

    /// Index lookup from the external ids to the internal keys.
    driver_index: HashMap<DriverId, DriverKey>,
    route_index: HashMap<RouteId, RouteKey>,
    order_index: HashMap<OrderId, OrderKey>,
}

impl StoreInner {
    fn new() -> Self {
        Self {
            drivers: SlotMap::with_key(),
            routes: SlotMap::with_key(),
            orders: SlotMap::with_key(),
            driver_index: HashMap::new(),
            route_index: HashMap::new(),
            order_index: HashMap::new(),
        }
    }

    fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot {
            drivers: self.drivers.values().filter(|d| d.active).cloned().collect(),
            routes: self.routes.values().cloned().collect(),
            orders: self.orders.values().filter(|o| o.is_pending()).cloned().collect(),
        }
    }

    fn apply(&mut self, deliveries: &[DeliveryRecord]) {
        // Deliveries come from a snapshot taken under the same write lock.
        for record in deliveries {
            let key = self.order_index.get(&record.order_id).copied();
            debug_assert!(key.is_some(), "delivered order {} missing from the store", record.order_id);
            if let Some(order) = key.and_then(|key| self.orders.get_mut(key)) {
                order.apply_delivery(record);
            }
        }
    }
}

/// In-memory owner of drivers, routes and orders.
///
/// All three collections sit behind one lock so a run's read of pending orders
/// and its write-back can never interleave with another run. Clones share the
/// same data.
#[derive(Debug, Clone)]
pub struct FleetStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl Default for FleetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetStore {
    pub fn new() -> Self {
        Self { inner: Arc::new(RwLock::new(StoreInner::new())) }
    }

    pub fn from_dto(dto: FleetDto) -> Result<Self> {
        let snapshot = FleetSnapshot::from_dto(dto)?;
        let store = FleetStore::new();

        for driver in snapshot.drivers {
            store.add_driver(driver)?;
        }
        for route in snapshot.routes {
            store.add_route(route)?;
        }
        for order in snapshot.orders {
            store.add_order(order)?;
        }

        Ok(store)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| Error::StorePoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| Error::StorePoisoned)
    }

    /// Adds a driver. Ids must be unique.
    pub fn add_driver(&self, driver: Driver) -> Result<DriverKey> {
        let mut guard = self.write()?;
        if guard.driver_index.contains_key(&driver.id) {
            return Err(duplicate("Driver", driver.id.as_str()));
        }
        let id = driver.id.clone();
        let key = guard.drivers.insert(driver);
        guard.driver_index.insert(id, key);
        Ok(key)
    }

    /// Adds a route. Route codes must be unique, orders reference them.
    pub fn add_route(&self, route: Route) -> Result<RouteKey> {
        let mut guard = self.write()?;
        if guard.route_index.contains_key(&route.route_id) {
            return Err(duplicate("Route", route.route_id.as_str()));
        }
        let id = route.route_id.clone();
        let key = guard.routes.insert(route);
        guard.route_index.insert(id, key);
        Ok(key)
    }

    pub fn add_order(&self, order: Order) -> Result<OrderKey> {
        let mut guard = self.write()?;
        if guard.order_index.contains_key(&order.id) {
            return Err(duplicate("Order", order.id.as_str()));
        }
        let id = order.id.clone();
        let key = guard.orders.insert(order);
        guard.order_index.insert(id, key);
        Ok(key)
    }

    pub fn set_driver_active(&self, id: &DriverId, active: bool) -> Result<bool> {
        let mut guard = self.write()?;
        let Some(key) = guard.driver_index.get(id).copied() else {
            return Ok(false);
        };
        if let Some(driver) = guard.drivers.get_mut(key) {
            driver.active = active;
        }
        Ok(true)
    }

    pub fn set_route_active(&self, id: &RouteId, active: bool) -> Result<bool> {
        let mut guard = self.write()?;
        let Some(key) = guard.route_index.get(id).copied() else {
            return Ok(false);
        };
        if let Some(route) = guard.routes.get_mut(key) {
            route.active = active;
        }
        Ok(true)
    }

    pub fn order(&self, id: &OrderId) -> Result<Option<Order>> {
        let guard = self.read()?;
        Ok(guard.order_index.get(id).and_then(|key| guard.orders.get(*key)).cloned())
    }

    /// Orders in the given status, sorted by order number.
    pub fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let guard = self.read()?;
        let mut orders: Vec<Order> = guard.orders.values().filter(|o| o.status == status).cloned().collect();
        orders.sort_by(|a, b| a.order_code.cmp(&b.order_code).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    /// Full contents in wire format, e.g. to persist the fleet after a run.
    pub fn to_dto(&self) -> Result<FleetDto> {
        let guard = self.read()?;
        Ok(FleetDto {
            drivers: guard.drivers.values().map(Into::into).collect(),
            routes: guard.routes.values().map(Into::into).collect(),
            orders: guard.orders.values().map(Into::into).collect(),
        })
    }
}

impl FleetRepository for FleetStore {
    fn snapshot(&self) -> Result<FleetSnapshot> {
        Ok(self.read()?.snapshot())
    }

    fn run_exclusive<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&FleetSnapshot) -> Result<(T, Vec<DeliveryRecord>)>,
    {
        let mut guard = self.write()?;
        let snapshot = guard.snapshot();

        let (result, deliveries) = work(&snapshot)?;

        guard.apply(&deliveries);
        log::debug!("Committed {} delivered orders to the fleet store.", deliveries.len());

        Ok(result)
    }
}

fn duplicate(entity: &'static str, id: &str) -> Error {
    Error::ModelConstructionError(ConversionError::InvalidField { entity, id: id.to_string(), reason: "duplicate id".to_string() })
}
