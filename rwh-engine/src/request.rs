//! Raw calculation request as it arrives from a form or JSON body.
//!
//! Numeric fields are read leniently: numbers and numeric strings are
//! accepted, anything else counts as "not supplied" and the resolver
//! applies its defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    #[serde(default)]
    pub district_name: Option<String>,

    /// Roof length in meters
    #[serde(default, deserialize_with = "lenient::float")]
    pub length: Option<f64>,

    /// Roof width in meters
    #[serde(default, deserialize_with = "lenient::float")]
    pub width: Option<f64>,

    /// Roof area in square meters; wins over length x width when positive
    #[serde(default, deserialize_with = "lenient::float")]
    pub roof_area_sqm: Option<f64>,

    #[serde(default)]
    pub roof_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::integer")]
    pub number_of_dwellers: Option<i64>,

    /// Caller-supplied annual rainfall; skips the district lookup when positive
    #[serde(default, deserialize_with = "lenient::float")]
    pub annual_rainfall_mm: Option<f64>,
}

impl CalculationRequest {
    pub fn for_district(district_name: &str) -> Self {
        Self {
            district_name: Some(district_name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_dimensions(mut self, length: f64, width: f64) -> Self {
        self.length = Some(length);
        self.width = Some(width);
        self
    }

    pub fn with_area(mut self, roof_area_sqm: f64) -> Self {
        self.roof_area_sqm = Some(roof_area_sqm);
        self
    }

    pub fn with_roof_type(mut self, roof_type: &str) -> Self {
        self.roof_type = Some(roof_type.to_string());
        self
    }

    pub fn with_dwellers(mut self, number_of_dwellers: i64) -> Self {
        self.number_of_dwellers = Some(number_of_dwellers);
        self
    }

    pub fn with_rainfall(mut self, annual_rainfall_mm: f64) -> Self {
        self.annual_rainfall_mm = Some(annual_rainfall_mm);
        self
    }
}

mod lenient {
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(f64),
        Text(String),
        #[allow(dead_code)]
        Other(IgnoredAny),
    }

    impl Loose {
        fn as_f64(&self) -> Option<f64> {
            match self {
                Loose::Number(n) => Some(*n),
                Loose::Text(s) => s.trim().parse::<f64>().ok(),
                Loose::Other(_) => None,
            }
        }
    }

    pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let loose = Option::<Loose>::deserialize(deserializer)?;
        Ok(loose.and_then(|l| l.as_f64()))
    }

    /// Integers accept fractional input and truncate it ("3.7" -> 3).
    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let loose = Option::<Loose>::deserialize(deserializer)?;
        Ok(loose
            .and_then(|l| l.as_f64())
            .filter(|n| n.is_finite())
            .map(|n| n.trunc() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_numeric_strings_are_accepted() {
        let json = r#"{
            "district_name": "Pune",
            "length": "12.5",
            "width": 8,
            "roof_type": "rcc",
            "number_of_dwellers": "4",
            "annual_rainfall_mm": 0
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.district_name.as_deref(), Some("Pune"));
        assert_eq!(request.length, Some(12.5));
        assert_eq!(request.width, Some(8.0));
        assert_eq!(request.roof_area_sqm, None);
        assert_eq!(request.number_of_dwellers, Some(4));
        assert_eq!(request.annual_rainfall_mm, Some(0.0));
    }

    #[test]
    fn garbage_values_become_absent() {
        let json = r#"{
            "district_name": "Pune",
            "roof_area_sqm": "lots",
            "number_of_dwellers": [1, 2],
            "annual_rainfall_mm": null,
            "length": true
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.roof_area_sqm, None);
        assert_eq!(request.number_of_dwellers, None);
        assert_eq!(request.annual_rainfall_mm, None);
        assert_eq!(request.length, None);
    }

    #[test]
    fn fractional_dwellers_truncate() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{ "number_of_dwellers": "3.7" }"#).unwrap();
        assert_eq!(request.number_of_dwellers, Some(3));
    }

    #[test]
    fn builder_sets_fields() {
        let request = CalculationRequest::for_district("Pune")
            .with_area(100.0)
            .with_roof_type("RCC")
            .with_dwellers(4);
        assert_eq!(request.roof_area_sqm, Some(100.0));
        assert_eq!(request.roof_type.as_deref(), Some("RCC"));
        assert_eq!(request.number_of_dwellers, Some(4));
        assert_eq!(request.annual_rainfall_mm, None);
    }
}
