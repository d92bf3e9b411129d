use chrono::NaiveTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::api::simulation_dto::SimulationRequestDto;
use crate::error::ValidationError;
use crate::loader::parser::parse_start_time;

pub const MIN_HOURS_PER_DRIVER: Decimal = dec!(1);
pub const MAX_HOURS_PER_DRIVER: Decimal = dec!(24);

/// Run inputs after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub driver_count: usize,
    pub route_start_time: NaiveTime,
    pub max_hours_per_driver: Decimal,
    pub notes: Option<String>,
}

impl RunParameters {
    /// Checks a raw request against the number of active drivers in the snapshot.
    pub fn validate(request: &SimulationRequestDto, active_drivers: usize) -> Result<Self, ValidationError> {
        if request.number_of_drivers <= 0 {
            return Err(ValidationError::NoDriversRequested);
        }

        if request.max_hours_per_driver < MIN_HOURS_PER_DRIVER || request.max_hours_per_driver > MAX_HOURS_PER_DRIVER {
            return Err(ValidationError::MaxHoursOutOfRange(request.max_hours_per_driver.to_string()));
        }

        let route_start_time = parse_start_time(&request.route_start_time)?;

        let driver_count = usize::try_from(request.number_of_drivers).unwrap_or(usize::MAX);
        if driver_count > active_drivers {
            return Err(ValidationError::NotEnoughActiveDrivers { requested: driver_count, available: active_drivers });
        }

        let notes = request.notes.as_ref().map(|n| n.trim().to_string()).filter(|n| !n.is_empty());

        Ok(RunParameters { driver_count, route_start_time, max_hours_per_driver: request.max_hours_per_driver, notes })
    }

    /// Hour cap expressed in minutes.
    pub fn cap_minutes(&self) -> Decimal {
        self.max_hours_per_driver * dec!(60)
    }
}
