use rust_decimal::Decimal;
use serde::Deserialize;

/// Optional overrides for the engine configuration. Missing fields keep their defaults.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EngineConfigDto {
    pub fatigue_multiplier: Option<Decimal>,
    pub late_grace_minutes: Option<i64>,
    pub late_penalty_rs: Option<Decimal>,
    pub high_value_threshold_rs: Option<Decimal>,
    pub high_value_bonus_rate: Option<Decimal>,
    pub fuel_rate_per_km: Option<Decimal>,
    pub high_traffic_surcharge_per_km: Option<Decimal>,
    pub driver_selection: Option<String>,
}
