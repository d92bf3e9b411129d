use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::fleet::route::Route;

/// Effective delivery duration in whole minutes.
///
/// `base_time_minutes × multiplier`, rounded half away from zero. The multiplier
/// is floored at one so the result is never shorter than the base time.
pub fn effective_duration_minutes(route: &Route, fatigue_multiplier: Decimal) -> i64 {
    let multiplier = fatigue_multiplier.max(Decimal::ONE);
    let scaled = (Decimal::from(route.base_time_minutes) * multiplier).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    scaled.to_i64().unwrap_or(i64::MAX).max(route.base_time_minutes)
}

/// Instant the order is handed over: shift start, plus the minutes the driver
/// already committed in this run, plus this delivery's duration.
pub fn delivery_instant(shift_start: NaiveDateTime, committed_minutes: i64, duration_minutes: i64) -> NaiveDateTime {
    shift_start + TimeDelta::minutes(committed_minutes + duration_minutes)
}
