pub mod company_rules;
pub mod delivery_time;
pub mod fatigue;
pub mod financial;
