use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use crate::domain::fleet::route::TrafficLevel;
use crate::domain::simulation::delivery_record::DeliveryRecord;

/// Run-level KPIs folded from the delivered orders of one run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KpiReport {
    pub total_profit: Decimal,
    pub total_bonuses: Decimal,
    pub total_penalties: Decimal,
    pub total_fuel_cost: Decimal,
    pub fuel_cost_breakdown: BTreeMap<TrafficLevel, Decimal>,
    pub on_time_deliveries: usize,
    pub late_deliveries: usize,
    pub total_deliveries: usize,
    /// Share of on-time deliveries in percent, full precision.
    pub efficiency_score: Decimal,
}

impl KpiReport {
    pub fn from_deliveries(deliveries: &[DeliveryRecord]) -> Self {
        let mut report = deliveries.iter().fold(KpiReport::default(), |mut acc, delivery| {
            let financials = &delivery.financials;

            acc.total_deliveries += 1;
            if financials.delivered_on_time {
                acc.on_time_deliveries += 1;
            } else {
                acc.late_deliveries += 1;
            }

            acc.total_profit += financials.profit;
            acc.total_bonuses += financials.bonus;
            acc.total_penalties += financials.penalty;
            acc.total_fuel_cost += financials.fuel_cost;
            *acc.fuel_cost_breakdown.entry(delivery.traffic_level).or_insert(Decimal::ZERO) += financials.fuel_cost;

            acc
        });

        report.efficiency_score = efficiency_score(report.on_time_deliveries, report.total_deliveries);
        report
    }

    /// Efficiency score to two decimals, for reports and exports.
    pub fn display_efficiency(&self) -> Decimal {
        self.efficiency_score.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// `on_time / total × 100`, zero when nothing was delivered.
pub fn efficiency_score(on_time: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }

    let score = Decimal::from(on_time) * dec!(100) / Decimal::from(total);
    score.clamp(Decimal::ZERO, dec!(100))
}
