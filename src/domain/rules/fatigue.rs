use rust_decimal::Decimal;

use crate::domain::fleet::driver::Driver;
use crate::domain::rules::company_rules::CompanyRules;

/// Factor applied to a route's base time for this driver: the configured fatigue
/// multiplier when the driver worked over eight hours yesterday, one otherwise.
pub fn fatigue_multiplier(driver: &Driver, rules: &CompanyRules) -> Decimal {
    if driver.worked_over_eight_hours_yesterday { rules.fatigue_multiplier } else { Decimal::ONE }
}
