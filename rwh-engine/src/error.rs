//! Error kinds the engine reports to its callers.

use thiserror::Error;

/// Message shown to callers for failures they cannot act on.
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error. Please try again later.";

/// Largest number of candidates listed for an ambiguous district name.
pub const MAX_AMBIGUOUS_CANDIDATES: usize = 3;

/// Rejected request fields
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("District name is required")]
    MissingDistrict,

    #[error("Valid roof area is required")]
    NonPositiveArea,

    #[error("Number of dwellers must be at least 1 (got {0})")]
    InvalidHouseholdSize(i64),
}

/// Engine errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("District \"{district}\" not found in our database. Please search and select from available districts.")]
    DistrictNotFound { district: String },

    #[error("Multiple districts named \"{district}\" found: {}. Please be more specific or include the state name.", candidates.join(", "))]
    AmbiguousDistrict {
        district: String,
        candidates: Vec<String>,
    },

    #[error("No monthly rainfall data for {district}")]
    MonthlySeriesUnavailable { district: String },

    #[error("Internal computation error: {0}")]
    Internal(String),
}

impl EngineError {
    /// HTTP status the boundary layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            EngineError::Validation(_) => 400,
            EngineError::DistrictNotFound { .. } => 404,
            EngineError::AmbiguousDistrict { .. } => 400,
            EngineError::MonthlySeriesUnavailable { .. } => 404,
            EngineError::Internal(_) => 500,
        }
    }

    /// Message safe to show to the caller. Internal details stay in the log.
    pub fn public_message(&self) -> String {
        match self {
            EngineError::Internal(_) => GENERIC_INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn internal(context: impl std::fmt::Display) -> Self {
        let message = context.to_string();
        log::error!("rainwater harvest computation failed: {}", message);
        EngineError::Internal(message)
    }
}
