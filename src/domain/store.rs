pub mod fleet_repository;
pub mod fleet_store;
pub mod run_history;
pub mod snapshot;
