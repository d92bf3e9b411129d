pub mod config_dto;
pub mod fleet_dto;
pub mod simulation_dto;
