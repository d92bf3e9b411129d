use std::path::Path;

use crate::api::fleet_dto::FleetDto;
use crate::domain::simulation::engine_config::EngineConfig;
use crate::domain::store::fleet_store::FleetStore;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Reads a fleet JSON file and loads it into a fresh store.
pub fn load_fleet_store(file_path: impl AsRef<Path>) -> Result<FleetStore> {
    let file_path = file_path.as_ref();

    let fleet_dto: FleetDto = parse_json_file::<FleetDto>(file_path)?;
    log::info!(
        "Fleet file '{}' parsed: {} drivers, {} routes, {} orders.",
        file_path.display(),
        fleet_dto.drivers.len(),
        fleet_dto.routes.len(),
        fleet_dto.orders.len()
    );

    let store = FleetStore::from_dto(fleet_dto)?;
    log::info!("Fleet store constructed successfully.");

    Ok(store)
}

/// Engine settings from an overrides file, or the company defaults when none is given.
pub fn load_engine_config(file_path: Option<&Path>) -> Result<EngineConfig> {
    match file_path {
        Some(path) => EngineConfig::load(path),
        None => {
            log::info!("No rules file given, using company defaults.");
            Ok(EngineConfig::default())
        }
    }
}
