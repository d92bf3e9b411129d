use rust_decimal::Decimal;

use crate::domain::fleet::route::{Route, TrafficLevel};
use crate::domain::rules::company_rules::CompanyRules;

/// Money side of one delivered order. All amounts in rupees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFinancials {
    pub delivered_on_time: bool,
    pub bonus: Decimal,
    pub penalty: Decimal,
    pub fuel_cost: Decimal,
    /// `value + bonus - penalty - fuel_cost`, may be negative.
    pub profit: Decimal,
}

pub fn is_late(duration_minutes: i64, base_time_minutes: i64, rules: &CompanyRules) -> bool {
    duration_minutes > base_time_minutes + rules.late_grace_minutes
}

/// Per-km fuel plus the high-traffic surcharge. Charged whether or not the delivery was late.
pub fn fuel_cost(route: &Route, rules: &CompanyRules) -> Decimal {
    let base_cost = route.distance_km * rules.fuel_rate_per_km;

    match route.traffic_level {
        TrafficLevel::High => base_cost + route.distance_km * rules.high_traffic_surcharge_per_km,
        TrafficLevel::Low | TrafficLevel::Medium => base_cost,
    }
}

pub fn high_value_bonus(value_rs: Decimal, delivered_on_time: bool, rules: &CompanyRules) -> Decimal {
    if delivered_on_time && value_rs > rules.high_value_threshold_rs { value_rs * rules.high_value_bonus_rate } else { Decimal::ZERO }
}

/// Applies lateness, bonus and fuel rules to one order.
pub fn evaluate(value_rs: Decimal, route: &Route, duration_minutes: i64, rules: &CompanyRules) -> OrderFinancials {
    let delivered_on_time = !is_late(duration_minutes, route.base_time_minutes, rules);
    let penalty = if delivered_on_time { Decimal::ZERO } else { rules.late_penalty_rs };
    let bonus = high_value_bonus(value_rs, delivered_on_time, rules);
    let fuel_cost = fuel_cost(route, rules);

    OrderFinancials { delivered_on_time, bonus, penalty, fuel_cost, profit: value_rs + bonus - penalty - fuel_cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::utils::id::RouteId;
    use rust_decimal_macros::dec;

    fn route(distance: Decimal, traffic: TrafficLevel, base: i64) -> Route {
        Route { id: "1".to_string(), route_id: RouteId::new("R1"), distance_km: distance, traffic_level: traffic, base_time_minutes: base, active: true }
    }

    #[test]
    fn grace_window_is_inclusive() {
        let rules = CompanyRules::default();
        assert!(!is_late(40, 30, &rules));
        assert!(is_late(41, 30, &rules));
    }

    #[test]
    fn high_traffic_adds_surcharge() {
        let rules = CompanyRules::default();
        assert_eq!(fuel_cost(&route(dec!(10), TrafficLevel::High, 30), &rules), dec!(70));
        assert_eq!(fuel_cost(&route(dec!(10), TrafficLevel::Medium, 30), &rules), dec!(50));
        assert_eq!(fuel_cost(&route(dec!(15.7), TrafficLevel::High, 65), &rules), dec!(109.9));
    }

    #[test]
    fn bonus_needs_value_strictly_above_threshold() {
        let rules = CompanyRules::default();
        assert_eq!(high_value_bonus(dec!(1000), true, &rules), Decimal::ZERO);
        assert_eq!(high_value_bonus(dec!(1000.01), true, &rules), dec!(100.001));
        assert_eq!(high_value_bonus(dec!(1500), false, &rules), Decimal::ZERO);
    }

    #[test]
    fn on_time_high_value_order() {
        let outcome = evaluate(dec!(1500), &route(dec!(10), TrafficLevel::High, 30), 30, &CompanyRules::default());
        assert_eq!(outcome, OrderFinancials { delivered_on_time: true, bonus: dec!(150), penalty: dec!(0), fuel_cost: dec!(70), profit: dec!(1580) });
    }

    #[test]
    fn late_order_loses_bonus_and_pays_penalty() {
        let outcome = evaluate(dec!(1500), &route(dec!(10), TrafficLevel::Low, 35), 46, &CompanyRules::default());
        assert!(!outcome.delivered_on_time);
        assert_eq!(outcome.bonus, Decimal::ZERO);
        assert_eq!(outcome.penalty, dec!(50));
        assert_eq!(outcome.profit, dec!(1400));
    }

    #[test]
    fn profit_may_go_negative() {
        let outcome = evaluate(dec!(20), &route(dec!(22.3), TrafficLevel::High, 85), 120, &CompanyRules::default());
        // 20 - 50 - 156.1
        assert_eq!(outcome.profit, dec!(-186.1));
    }
}
