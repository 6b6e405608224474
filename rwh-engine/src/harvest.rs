//! Annual harvest and household demand.
//!
//! 1 mm of rain over 1 m² is 1 liter, so roof area (m²) times rainfall (mm)
//! times the runoff coefficient is the harvest in liters.

use serde::Serialize;

use crate::config::HarvestParameters;
use crate::resolver::CalculationInput;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarvestResult {
    pub harvested_liters: f64,
    pub harvested_gallons: f64,
    pub daily_demand_liters: f64,
    pub annual_demand_liters: f64,
    /// Harvest as a percentage of annual demand
    pub efficiency_percent: f64,
}

pub fn estimate_harvest(input: &CalculationInput, params: &HarvestParameters) -> HarvestResult {
    let harvested_liters =
        input.roof_area_sqm * input.rainfall.annual_rainfall_mm() * input.runoff_coefficient;
    let daily_demand_liters = f64::from(input.number_of_dwellers) * params.per_capita_lpd;
    let annual_demand_liters = daily_demand_liters * 365.0;

    HarvestResult {
        harvested_liters,
        harvested_gallons: harvested_liters * params.liters_to_gallons,
        daily_demand_liters,
        annual_demand_liters,
        efficiency_percent: efficiency_percent(harvested_liters, annual_demand_liters),
    }
}

fn efficiency_percent(harvested_liters: f64, annual_demand_liters: f64) -> f64 {
    if annual_demand_liters > 0.0 {
        harvested_liters / annual_demand_liters * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::RainfallSource;
    use rwh_rainfall::roof::RoofMaterial;

    fn input(area: f64, rainfall: f64, coefficient: f64, dwellers: u32) -> CalculationInput {
        CalculationInput {
            district_name: "Pune".into(),
            roof_area_sqm: area,
            roof_type: "RCC".into(),
            material: RoofMaterial::Rcc,
            runoff_coefficient: coefficient,
            number_of_dwellers: dwellers,
            rainfall: RainfallSource::Custom(rainfall),
        }
    }

    #[test]
    fn pune_reference_case() {
        let result = estimate_harvest(&input(100.0, 722.0, 0.85, 4), &HarvestParameters::default());
        assert!((result.harvested_liters - 61370.0).abs() < 1e-6);
        assert!((result.harvested_gallons - 61370.0 * 0.264172).abs() < 1e-6);
        assert_eq!(result.daily_demand_liters, 540.0);
        assert_eq!(result.annual_demand_liters, 197100.0);
        assert!((result.efficiency_percent - 31.13647894469812).abs() < 1e-9);
    }

    #[test]
    fn zero_demand_gives_zero_efficiency() {
        let params = HarvestParameters {
            per_capita_lpd: 0.0,
            ..HarvestParameters::default()
        };
        let result = estimate_harvest(&input(100.0, 722.0, 0.85, 4), &params);
        assert_eq!(result.annual_demand_liters, 0.0);
        assert_eq!(result.efficiency_percent, 0.0);
    }

    #[test]
    fn harvest_scales_with_coefficient() {
        let params = HarvestParameters::default();
        let green = estimate_harvest(&input(150.0, 1000.0, 0.4, 2), &params);
        let metal = estimate_harvest(&input(150.0, 1000.0, 0.85, 2), &params);
        assert!((green.harvested_liters - 60000.0).abs() < 1e-6);
        assert!((metal.harvested_liters - 127500.0).abs() < 1e-6);
    }
}
