use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse fleet JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to build internal domain model: {0}")]
    ModelConstructionError(#[from] ConversionError),

    #[error("Simulation run rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error("Fleet store lock poisoned by a panicking run")]
    StorePoisoned,

    #[error("Failed to write ledger: {0}")]
    ExportError(#[from] csv::Error),
}

/// Raised while turning a DTO into a domain entity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unknown traffic level '{0}', expected Low, Medium or High")]
    UnknownTrafficLevel(String),

    #[error("Unknown order status '{0}'")]
    UnknownOrderStatus(String),

    #[error("Unknown driver selection policy '{0}'")]
    UnknownDriverSelection(String),

    #[error("{entity} '{id}' has an invalid field: {reason}")]
    InvalidField { entity: &'static str, id: String, reason: String },
}

/// Reasons a run request is turned down before any order is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Number of drivers must be greater than 0")]
    NoDriversRequested,

    #[error("Not enough active drivers available. Available: {available}, Required: {requested}")]
    NotEnoughActiveDrivers { requested: usize, available: usize },

    #[error("Max hours per driver must be between 1 and 24, got {0}")]
    MaxHoursOutOfRange(String),

    #[error("Route start time '{0}' is not a valid HH:MM time of day")]
    MalformedStartTime(String),
}

pub type Result<T> = std::result::Result<T, Error>;
