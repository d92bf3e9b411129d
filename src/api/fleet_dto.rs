use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root of a fleet snapshot file: everything the engine needs for one run.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FleetDto {
    #[serde(default)]
    pub drivers: Vec<DriverDto>,
    #[serde(default)]
    pub routes: Vec<RouteDto>,
    #[serde(default)]
    pub orders: Vec<OrderDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DriverDto {
    pub id: String,
    pub name: String,
    pub current_shift_hours: Decimal,
    pub past7_day_work_hours: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Worked more than eight hours yesterday.
    #[serde(default)]
    pub has_fatigue_penalty: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    pub id: String,
    pub route_id: String,
    pub distance_km: Decimal,
    pub traffic_level: String,
    pub base_time_minutes: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Order as exchanged with the order-management collaborator.
///
/// The delivery fields are only present once a run delivered the order.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    pub order_id: String,
    pub value_rs: Decimal,
    pub assigned_route_id: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_driver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_timestamp: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_on_time: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<Decimal>,
}

fn default_active() -> bool {
    true
}

fn default_status() -> String {
    "Pending".to_string()
}
