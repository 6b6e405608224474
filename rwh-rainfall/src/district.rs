use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

use crate::monthly::MonthlySeries;
use crate::parse_millimeters;

/// Embedded CSV data for every district with a known annual rainfall.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/districts.csv");

/// Label used when a district record carries no state.
pub const STATE_NOT_SPECIFIED: &str = "Not specified";

/// Annual rainfall reference record for a district.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DistrictRainfall {
    pub district_name: String,
    pub state: Option<String>,
    /// Normal annual rainfall in millimeters
    pub annual_rainfall_mm: f64,
    /// Monthly normals, Jan..Dec, when the dataset has them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<MonthlySeries>,
}

impl DistrictRainfall {
    pub fn new(district_name: &str, state: &str, annual_rainfall_mm: f64) -> Self {
        let state = state.trim();
        DistrictRainfall {
            district_name: district_name.trim().to_string(),
            state: (!state.is_empty()).then(|| state.to_string()),
            annual_rainfall_mm,
            monthly: None,
        }
    }

    pub fn with_monthly(mut self, monthly: MonthlySeries) -> Self {
        self.monthly = Some(monthly);
        self
    }

    pub fn state_or_default(&self) -> &str {
        self.state.as_deref().unwrap_or(STATE_NOT_SPECIFIED)
    }

    /// "name (state)", the form used when listing ambiguous matches.
    pub fn label(&self) -> String {
        format!("{} ({})", self.district_name, self.state_or_default())
    }

    /// Case-insensitive exact comparison against a searched district name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.district_name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Parse the embedded district fixture.
    pub fn get_district_vector() -> Result<Vec<DistrictRainfall>, csv::Error> {
        DistrictRainfall::parse_district_csv(CSV_OBJECT)
    }

    /// Parse a CSV string of district rainfall into a vector of records.
    ///
    /// Expected CSV columns: district, state, annual_rainfall_mm. Rows
    /// without a district name are skipped.
    pub fn parse_district_csv(csv_object: &str) -> Result<Vec<DistrictRainfall>, csv::Error> {
        let mut district_list: Vec<DistrictRainfall> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let rho = row?;
            let district_name = rho.get(0).unwrap_or("").trim();
            if district_name.is_empty() {
                continue;
            }
            let state = rho.get(1).unwrap_or("");
            let annual_rainfall_mm = parse_millimeters(rho.get(2).unwrap_or("0"));
            district_list.push(DistrictRainfall::new(district_name, state, annual_rainfall_mm));
        }
        log::debug!("parsed {} district rainfall records", district_list.len());
        Ok(district_list)
    }
}

#[cfg(test)]
mod tests {
    use super::DistrictRainfall;

    #[test]
    fn test_district_vector() {
        let districts = DistrictRainfall::get_district_vector().unwrap();
        assert_eq!(districts.len(), 34);
        let pune = districts.iter().find(|d| d.matches_name("pune")).unwrap();
        assert_eq!(pune.annual_rainfall_mm, 722.0);
        assert_eq!(pune.state.as_deref(), Some("Maharashtra"));
    }

    #[test]
    fn test_embedded_fixture_has_duplicate_names() {
        let districts = DistrictRainfall::get_district_vector().unwrap();
        let aurangabad = districts
            .iter()
            .filter(|d| d.matches_name("AURANGABAD"))
            .count();
        assert_eq!(aurangabad, 2);
    }

    #[test]
    fn test_parse_district_csv() {
        let csv_data = "\
DISTRICT,STATE,ANNUAL_RAINFALL_MM
Pune,Maharashtra,722
 Leh ,,NA
,Nowhere,100
";
        let districts = DistrictRainfall::parse_district_csv(csv_data).unwrap();
        assert_eq!(districts.len(), 2);
        assert_eq!(districts[0].label(), "Pune (Maharashtra)");
        assert_eq!(districts[1].district_name, "Leh");
        assert_eq!(districts[1].state, None);
        assert_eq!(districts[1].annual_rainfall_mm, 0.0);
        assert_eq!(districts[1].label(), "Leh (Not specified)");
    }

    #[test]
    fn test_matches_name_is_case_insensitive_and_exact() {
        let district = DistrictRainfall::new("Mumbai Suburban", "Maharashtra", 2422.0);
        assert!(district.matches_name("mumbai suburban"));
        assert!(district.matches_name("  MUMBAI SUBURBAN "));
        assert!(!district.matches_name("mumbai"));
    }
}
