//! Query result model structs.
//!
//! All structs derive `Serialize` so the CLI can print them as JSON.

use rwh_rainfall::monthly::MonthlySeries;
use serde::Serialize;

/// District row for search listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistrictSummary {
    pub district_name: String,
    /// "Not specified" when the dataset has no state
    pub state: String,
    pub annual_rainfall_mm: f64,
}

/// A district with its monthly normals, for the district detail view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DistrictDetail {
    pub district_name: String,
    pub state: String,
    pub annual_rainfall_mm: f64,
    pub monthly: Option<MonthlySeries>,
}

/// One saved estimate in the calculation log.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalculationLogEntry {
    pub id: i64,
    /// RFC 3339 UTC timestamp
    pub created_at: String,
    pub client_label: Option<String>,
    pub district_name: String,
    pub state: String,
    pub roof_area_sqm: f64,
    pub roof_type: String,
    pub number_of_dwellers: i64,
    pub water_harvested_liters: f64,
    pub efficiency_percent: Option<f64>,
}
