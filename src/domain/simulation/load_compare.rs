use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cmp::Ordering;

use crate::domain::fleet::driver::Driver;
use crate::domain::fleet::route::Route;
use crate::domain::rules::company_rules::CompanyRules;
use crate::domain::rules::delivery_time::effective_duration_minutes;
use crate::domain::rules::fatigue::fatigue_multiplier;

/// Running workload of one selected driver during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverLoad {
    pub driver: Driver,
    pub fatigue_multiplier: Decimal,
    /// Minutes of deliveries committed in this run, counted from shift start.
    pub committed_minutes: i64,
    pub assigned_orders: usize,
}

impl DriverLoad {
    pub fn new(driver: Driver, rules: &CompanyRules) -> Self {
        let fatigue_multiplier = fatigue_multiplier(&driver, rules);
        Self { driver, fatigue_multiplier, committed_minutes: 0, assigned_orders: 0 }
    }

    pub fn duration_for(&self, route: &Route) -> i64 {
        effective_duration_minutes(route, self.fatigue_multiplier)
    }

    /// Hours worked today plus committed minutes plus `extra_minutes`, in minutes.
    pub fn worked_minutes_with(&self, extra_minutes: i64) -> Decimal {
        self.driver.current_shift_hours * dec!(60) + Decimal::from(self.committed_minutes + extra_minutes)
    }

    pub fn fits(&self, duration_minutes: i64, cap_minutes: Decimal) -> bool {
        self.worked_minutes_with(duration_minutes) <= cap_minutes
    }

    /// Books a delivery and returns the offset at which it starts.
    pub fn commit(&mut self, duration_minutes: i64) -> i64 {
        let start_offset = self.committed_minutes;
        self.committed_minutes += duration_minutes;
        self.assigned_orders += 1;
        start_offset
    }

    pub fn total_hours(&self) -> Decimal {
        self.worked_minutes_with(0) / dec!(60)
    }
}

/// Orders driver loads by committed minutes, lightest first.
///
/// Equal loads fall back to the driver id so the choice never depends on
/// iteration order.
pub struct LoadCompare;

impl LoadCompare {
    pub fn compare(load1: &DriverLoad, load2: &DriverLoad) -> Ordering {
        load1.committed_minutes.cmp(&load2.committed_minutes).then_with(|| load1.driver.id.cmp(&load2.driver.id))
    }
}
