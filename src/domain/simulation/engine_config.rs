use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::api::config_dto::EngineConfigDto;
use crate::domain::rules::company_rules::CompanyRules;
use crate::error::{ConversionError, Result};
use crate::loader::parser::parse_json_file;

/// How the driver subset for a run is picked from the active roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverSelection {
    /// Fewest hours already worked today first, ties by driver id.
    #[default]
    LeastWorkedFirst,
    /// Plain driver id order.
    ById,
}

impl FromStr for DriverSelection {
    type Err = ConversionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "LeastWorkedFirst" => Ok(DriverSelection::LeastWorkedFirst),
            "ById" => Ok(DriverSelection::ById),
            _ => Err(ConversionError::UnknownDriverSelection(s.to_string())),
        }
    }
}

impl fmt::Display for DriverSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverSelection::LeastWorkedFirst => f.write_str("LeastWorkedFirst"),
            DriverSelection::ById => f.write_str("ById"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub rules: CompanyRules,
    pub driver_selection: DriverSelection,
}

impl EngineConfig {
    pub fn from_dto(dto: &EngineConfigDto) -> std::result::Result<Self, ConversionError> {
        let driver_selection = match &dto.driver_selection {
            Some(raw) => DriverSelection::from_str(raw)?,
            None => DriverSelection::default(),
        };

        Ok(EngineConfig { rules: CompanyRules::from_dto(dto), driver_selection })
    }

    /// Reads overrides from a JSON file, see `EngineConfigDto` for the keys.
    pub fn load(file_path: impl AsRef<Path>) -> Result<Self> {
        let dto: EngineConfigDto = parse_json_file(file_path)?;
        let config = EngineConfig::from_dto(&dto)?;
        log::info!("Engine configuration loaded (driver selection: {}).", config.driver_selection);
        Ok(config)
    }
}
