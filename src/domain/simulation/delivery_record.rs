use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::domain::fleet::route::TrafficLevel;
use crate::domain::rules::financial::OrderFinancials;
use crate::domain::utils::id::{DriverId, OrderId, RouteId};

/// Outcome of allocating and delivering one order within a run.
///
/// Produced by the allocator, folded by the KPI reducer and written back onto
/// the order by the store when the run commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRecord {
    pub order_id: OrderId,
    pub order_code: String,
    pub driver_id: DriverId,
    pub route_id: RouteId,
    pub traffic_level: TrafficLevel,
    pub value_rs: Decimal,
    /// Minutes after shift start at which the driver picked this order up.
    pub start_offset_minutes: i64,
    pub duration_minutes: i64,
    pub delivered_at: NaiveDateTime,
    pub financials: OrderFinancials,
}
