pub mod aggregation;
pub mod allocator;
pub mod controller;
pub mod delivery_record;
pub mod engine_config;
pub mod ledger;
pub mod load_compare;
pub mod request;
pub mod run;
