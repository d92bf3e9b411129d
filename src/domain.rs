pub mod fleet;
pub mod rules;
pub mod simulation;
pub mod store;
pub mod utils;
