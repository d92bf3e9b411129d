use rust_decimal::Decimal;

use crate::api::fleet_dto::DriverDto;
use crate::domain::utils::id::DriverId;
use crate::error::ConversionError;

/// Read-only view of a roster entry for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    /// Hours already worked today, before the simulated shift.
    pub current_shift_hours: Decimal,
    pub past_7_day_work_hours: Decimal,
    /// Authoritative fatigue signal, `past_7_day_work_hours` is informational only.
    pub worked_over_eight_hours_yesterday: bool,
    pub active: bool,
}

impl TryFrom<DriverDto> for Driver {
    type Error = ConversionError;

    fn try_from(dto: DriverDto) -> Result<Self, Self::Error> {
        if dto.current_shift_hours < Decimal::ZERO {
            return Err(ConversionError::InvalidField {
                entity: "Driver",
                id: dto.id,
                reason: format!("current shift hours cannot be negative ({})", dto.current_shift_hours),
            });
        }
        if dto.past7_day_work_hours < Decimal::ZERO {
            return Err(ConversionError::InvalidField {
                entity: "Driver",
                id: dto.id,
                reason: format!("past 7-day work hours cannot be negative ({})", dto.past7_day_work_hours),
            });
        }

        Ok(Driver {
            id: DriverId::new(dto.id),
            name: dto.name,
            current_shift_hours: dto.current_shift_hours,
            past_7_day_work_hours: dto.past7_day_work_hours,
            worked_over_eight_hours_yesterday: dto.has_fatigue_penalty,
            active: dto.active,
        })
    }
}

impl From<&Driver> for DriverDto {
    fn from(driver: &Driver) -> Self {
        DriverDto {
            id: driver.id.id.clone(),
            name: driver.name.clone(),
            current_shift_hours: driver.current_shift_hours,
            past7_day_work_hours: driver.past_7_day_work_hours,
            active: driver.active,
            has_fatigue_penalty: driver.worked_over_eight_hours_yesterday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn dto(hours: Decimal) -> DriverDto {
        DriverDto {
            id: "d1".to_string(),
            name: "Priya Sharma".to_string(),
            current_shift_hours: hours,
            past7_day_work_hours: dec!(38.5),
            active: true,
            has_fatigue_penalty: true,
        }
    }

    #[test]
    fn converts_fatigue_flag() {
        let driver = Driver::try_from(dto(dec!(4.2))).unwrap();
        assert!(driver.worked_over_eight_hours_yesterday);
        assert_eq!(driver.current_shift_hours, dec!(4.2));
    }

    #[test]
    fn rejects_negative_hours() {
        let err = Driver::try_from(dto(dec!(-1))).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidField { entity: "Driver", .. }));
    }
}
