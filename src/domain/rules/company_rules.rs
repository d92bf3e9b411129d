use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::api::config_dto::EngineConfigDto;

/// Business constants every run is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRules {
    /// Slowdown for drivers who worked over eight hours yesterday.
    pub fatigue_multiplier: Decimal,
    /// Minutes over base time a delivery may take and still count as on time.
    pub late_grace_minutes: i64,
    pub late_penalty_rs: Decimal,
    /// Orders strictly above this value earn the bonus when on time.
    pub high_value_threshold_rs: Decimal,
    pub high_value_bonus_rate: Decimal,
    pub fuel_rate_per_km: Decimal,
    pub high_traffic_surcharge_per_km: Decimal,
}

impl Default for CompanyRules {
    fn default() -> Self {
        CompanyRules {
            fatigue_multiplier: dec!(1.30),
            late_grace_minutes: 10,
            late_penalty_rs: dec!(50),
            high_value_threshold_rs: dec!(1000),
            high_value_bonus_rate: dec!(0.10),
            fuel_rate_per_km: dec!(5),
            high_traffic_surcharge_per_km: dec!(2),
        }
    }
}

impl CompanyRules {
    /// Applies the overrides present in `dto` on top of the defaults.
    pub fn from_dto(dto: &EngineConfigDto) -> Self {
        let defaults = CompanyRules::default();
        CompanyRules {
            // A multiplier below one would speed drivers up, the calculator floors it anyway.
            fatigue_multiplier: dto.fatigue_multiplier.unwrap_or(defaults.fatigue_multiplier),
            late_grace_minutes: dto.late_grace_minutes.unwrap_or(defaults.late_grace_minutes),
            late_penalty_rs: dto.late_penalty_rs.unwrap_or(defaults.late_penalty_rs),
            high_value_threshold_rs: dto.high_value_threshold_rs.unwrap_or(defaults.high_value_threshold_rs),
            high_value_bonus_rate: dto.high_value_bonus_rate.unwrap_or(defaults.high_value_bonus_rate),
            fuel_rate_per_km: dto.fuel_rate_per_km.unwrap_or(defaults.fuel_rate_per_km),
            high_traffic_surcharge_per_km: dto.high_traffic_surcharge_per_km.unwrap_or(defaults.high_traffic_surcharge_per_km),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dto_keeps_company_defaults() {
        assert_eq!(CompanyRules::from_dto(&EngineConfigDto::default()), CompanyRules::default());
    }

    #[test]
    fn overrides_single_field() {
        let dto: EngineConfigDto = serde_json::from_str(r#"{ "latePenaltyRs": 75 }"#).unwrap();
        let rules = CompanyRules::from_dto(&dto);
        assert_eq!(rules.late_penalty_rs, dec!(75));
        assert_eq!(rules.fuel_rate_per_km, dec!(5));
    }
}
