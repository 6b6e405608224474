//! Input resolution: raw request fields to a canonical parameter set.

use rwh_rainfall::district::DistrictRainfall;
use rwh_rainfall::monthly::MonthlySeries;
use rwh_rainfall::roof::{RoofMaterial, RunoffTable};
use serde::Serialize;

use crate::error::{EngineError, ValidationError, MAX_AMBIGUOUS_CANDIDATES};
use crate::repository::RainfallRepository;
use crate::request::CalculationRequest;

/// Roof type assumed when the request names none.
pub const DEFAULT_ROOF_TYPE: &str = "RCC";

/// State reported for caller-supplied rainfall.
pub const CUSTOM_STATE: &str = "Custom";

/// Where the annual rainfall figure came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RainfallSource {
    /// Single district match in the rainfall dataset
    Lookup(DistrictRainfall),
    /// Annual rainfall supplied by the caller, in mm
    Custom(f64),
}

impl RainfallSource {
    pub fn annual_rainfall_mm(&self) -> f64 {
        match self {
            RainfallSource::Lookup(district) => district.annual_rainfall_mm,
            RainfallSource::Custom(mm) => *mm,
        }
    }

    pub fn state(&self) -> &str {
        match self {
            RainfallSource::Lookup(district) => district.state_or_default(),
            RainfallSource::Custom(_) => CUSTOM_STATE,
        }
    }

    /// Monthly normals, only ever present for looked-up districts.
    pub fn monthly(&self) -> Option<&MonthlySeries> {
        match self {
            RainfallSource::Lookup(district) => district.monthly.as_ref(),
            RainfallSource::Custom(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RainfallSource::Lookup(_) => "lookup",
            RainfallSource::Custom(_) => "custom",
        }
    }
}

/// Canonical, validated calculation input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationInput {
    pub district_name: String,
    pub roof_area_sqm: f64,
    /// Upper-cased roof type exactly as requested
    pub roof_type: String,
    pub material: RoofMaterial,
    pub runoff_coefficient: f64,
    pub number_of_dwellers: u32,
    pub rainfall: RainfallSource,
}

/// Validate the request and resolve its rainfall.
///
/// Field validation happens before the dataset is touched, so a bad
/// request never costs a lookup.
pub fn resolve<R: RainfallRepository + ?Sized>(
    request: &CalculationRequest,
    repository: &R,
    runoff: &RunoffTable,
) -> Result<CalculationInput, EngineError> {
    let district_name = request
        .district_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if district_name.is_empty() {
        return Err(ValidationError::MissingDistrict.into());
    }

    let roof_area_sqm = resolve_area(request)?;
    let number_of_dwellers = resolve_dwellers(request.number_of_dwellers)?;

    // Only an absent or empty field means RCC; whitespace trims to an unknown type
    let roof_type = match request.roof_type.as_deref() {
        Some(raw) if !raw.is_empty() => raw.trim().to_uppercase(),
        _ => DEFAULT_ROOF_TYPE.to_string(),
    };
    let material = RoofMaterial::from_label(&roof_type);
    if material == RoofMaterial::Unrecognized {
        log::warn!(
            "unrecognized roof type {:?}, using default runoff coefficient {}",
            roof_type,
            runoff.default
        );
    }
    let runoff_coefficient = runoff.coefficient(material);

    let rainfall = match request.annual_rainfall_mm {
        Some(mm) if mm > 0.0 => RainfallSource::Custom(mm),
        _ => RainfallSource::Lookup(lookup_single_district(repository, &district_name)?),
    };

    Ok(CalculationInput {
        district_name,
        roof_area_sqm,
        roof_type,
        material,
        runoff_coefficient,
        number_of_dwellers,
        rainfall,
    })
}

fn resolve_area(request: &CalculationRequest) -> Result<f64, ValidationError> {
    let mut area = request.roof_area_sqm.unwrap_or(0.0);
    if !(area > 0.0) {
        let length = request.length.unwrap_or(0.0);
        let width = request.width.unwrap_or(0.0);
        if length > 0.0 && width > 0.0 {
            area = length * width;
        }
    }
    if area > 0.0 && area.is_finite() {
        Ok(area)
    } else {
        Err(ValidationError::NonPositiveArea)
    }
}

fn resolve_dwellers(raw: Option<i64>) -> Result<u32, ValidationError> {
    match raw {
        None => Ok(1),
        Some(n) if n >= 1 => u32::try_from(n).map_err(|_| ValidationError::InvalidHouseholdSize(n)),
        Some(n) => Err(ValidationError::InvalidHouseholdSize(n)),
    }
}

fn lookup_single_district<R: RainfallRepository + ?Sized>(
    repository: &R,
    district_name: &str,
) -> Result<DistrictRainfall, EngineError> {
    let mut matches = repository
        .lookup_district(district_name)
        .map_err(|e| EngineError::internal(format!("district lookup for {:?}: {:#}", district_name, e)))?;

    match matches.len() {
        0 => Err(EngineError::DistrictNotFound {
            district: district_name.to_string(),
        }),
        1 => {
            let mut district = matches.remove(0);
            if district.monthly.is_none() {
                district.monthly = repository
                    .lookup_monthly_series(&district.district_name, district.state.as_deref())
                    .map_err(|e| {
                        EngineError::internal(format!(
                            "monthly series lookup for {}: {:#}",
                            district.label(),
                            e
                        ))
                    })?;
            }
            log::debug!(
                "resolved district {} at {} mm/year (monthly series: {})",
                district.label(),
                district.annual_rainfall_mm,
                district.monthly.is_some()
            );
            Ok(district)
        }
        _ => Err(EngineError::AmbiguousDistrict {
            district: district_name.to_string(),
            candidates: matches
                .iter()
                .take(MAX_AMBIGUOUS_CANDIDATES)
                .map(DistrictRainfall::label)
                .collect(),
        }),
    }
}
