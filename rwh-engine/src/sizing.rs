//! Storage tank and recharge pit sizing.
//!
//! The tank is sized from the wettest month when the district's monthly
//! normals are known; otherwise a flat share of the annual harvest is used.
//! Only the monthly path is clamped to the practical tank range.

use rwh_rainfall::monthly::Month;
use serde::Serialize;
use std::f64::consts::PI;

use crate::config::SizingParameters;
use crate::harvest::HarvestResult;
use crate::resolver::CalculationInput;

/// How the tank volume was arrived at
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TankMethod {
    PeakMonth {
        month: Month,
        rainfall_mm: f64,
        /// Filtered runoff collected in that month
        harvest_liters: f64,
        storage_factor: f64,
    },
    AnnualFraction {
        fraction: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TankSizing {
    pub volume_liters: f64,
    pub volume_m3: f64,
    pub method: TankMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitSizing {
    pub volume_m3: f64,
    pub diameter_m: f64,
    pub depth_m: f64,
    /// Plan area of the circular pit
    pub area_m2: f64,
}

impl PitSizing {
    pub fn volume_liters(&self) -> f64 {
        self.volume_m3 * 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingResult {
    pub tank: TankSizing,
    pub pit: PitSizing,
    pub first_flush_liters: f64,
    /// Harvest left for groundwater recharge after first flush and storage
    pub available_recharge_liters: f64,
}

pub fn size_system(
    input: &CalculationInput,
    harvest: &HarvestResult,
    params: &SizingParameters,
) -> SizingResult {
    let tank = size_tank(input, harvest, params);
    let pit = size_pit(input.roof_area_sqm, params);
    let first_flush_liters = input.roof_area_sqm * params.first_flush_liters_per_sqm;
    let available_recharge_liters =
        (harvest.harvested_liters - first_flush_liters - tank.volume_liters).max(0.0);

    SizingResult {
        tank,
        pit,
        first_flush_liters,
        available_recharge_liters,
    }
}

fn size_tank(
    input: &CalculationInput,
    harvest: &HarvestResult,
    params: &SizingParameters,
) -> TankSizing {
    let (volume_liters, method) = match input.rainfall.monthly() {
        Some(series) => {
            let (month, rainfall_mm) = series.peak();
            let harvest_liters = rainfall_mm
                * input.roof_area_sqm
                * input.runoff_coefficient
                * params.filtration_efficiency;
            let storage_factor = params.storage_factor(input.number_of_dwellers);
            let volume = (harvest_liters * storage_factor)
                .min(params.max_tank_liters)
                .max(params.min_tank_liters);
            (
                volume,
                TankMethod::PeakMonth {
                    month,
                    rainfall_mm,
                    harvest_liters,
                    storage_factor,
                },
            )
        }
        None => {
            log::warn!(
                "no monthly rainfall for {} ({} rainfall), sizing tank as {} of annual harvest",
                input.district_name,
                input.rainfall.kind(),
                params.fallback_storage_fraction
            );
            // Unclamped, unlike the monthly path
            (
                harvest.harvested_liters * params.fallback_storage_fraction,
                TankMethod::AnnualFraction {
                    fraction: params.fallback_storage_fraction,
                },
            )
        }
    };

    TankSizing {
        volume_liters,
        volume_m3: volume_liters / 1000.0,
        method,
    }
}

fn size_pit(roof_area_sqm: f64, params: &SizingParameters) -> PitSizing {
    let tier = params.pit_for_area(roof_area_sqm);
    let radius = tier.diameter_m / 2.0;
    PitSizing {
        volume_m3: tier.volume_m3,
        diameter_m: tier.diameter_m,
        depth_m: params.pit_depth_m,
        area_m2: PI * radius * radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HarvestParameters;
    use crate::harvest::estimate_harvest;
    use crate::resolver::RainfallSource;
    use rwh_rainfall::district::DistrictRainfall;
    use rwh_rainfall::monthly::MonthlySeries;
    use rwh_rainfall::roof::RoofMaterial;

    const PUNE: [f64; 12] = [
        1.6, 0.3, 3.0, 11.2, 31.4, 138.2, 188.6, 117.5, 129.2, 76.0, 29.3, 5.7,
    ];

    fn input(area: f64, dwellers: u32, rainfall: RainfallSource) -> CalculationInput {
        CalculationInput {
            district_name: "Pune".into(),
            roof_area_sqm: area,
            roof_type: "RCC".into(),
            material: RoofMaterial::Rcc,
            runoff_coefficient: 0.85,
            number_of_dwellers: dwellers,
            rainfall,
        }
    }

    fn pune(monthly: Option<[f64; 12]>) -> RainfallSource {
        let mut district = DistrictRainfall::new("Pune", "Maharashtra", 722.0);
        district.monthly = monthly.map(MonthlySeries::new);
        RainfallSource::Lookup(district)
    }

    fn size(input: &CalculationInput) -> SizingResult {
        let harvest = estimate_harvest(input, &HarvestParameters::default());
        size_system(input, &harvest, &SizingParameters::default())
    }

    #[test]
    fn peak_month_path_sizes_from_wettest_month() {
        let sizing = size(&input(100.0, 4, pune(Some(PUNE))));
        // 188.6 mm * 100 m² * 0.85 * 0.95 = 15229.45 L, 20% storage
        let expected = 188.6 * 100.0 * 0.85 * 0.95 * 0.20;
        assert!((sizing.tank.volume_liters - expected).abs() < 1e-6);
        assert!((sizing.tank.volume_m3 - expected / 1000.0).abs() < 1e-9);
        match sizing.tank.method {
            TankMethod::PeakMonth { month, storage_factor, .. } => {
                assert_eq!(month, Month::Jul);
                assert_eq!(storage_factor, 0.20);
            }
            other => panic!("expected peak month sizing, got {:?}", other),
        }
    }

    #[test]
    fn peak_month_path_clamps_to_minimum() {
        let sizing = size(&input(20.0, 1, pune(Some(PUNE))));
        assert_eq!(sizing.tank.volume_liters, 2000.0);
    }

    #[test]
    fn peak_month_path_clamps_to_maximum() {
        let sizing = size(&input(5000.0, 8, pune(Some([900.0; 12]))));
        assert_eq!(sizing.tank.volume_liters, 50000.0);
    }

    #[test]
    fn lookup_without_monthly_series_falls_back() {
        let sizing = size(&input(100.0, 4, pune(None)));
        assert!((sizing.tank.volume_liters - 61370.0 * 0.15).abs() < 1e-6);
        assert_eq!(
            sizing.tank.method,
            TankMethod::AnnualFraction { fraction: 0.15 }
        );
    }

    #[test]
    fn custom_rainfall_fallback_is_not_clamped() {
        let small = size(&input(10.0, 1, RainfallSource::Custom(300.0)));
        // 10 * 300 * 0.85 * 0.15 = 382.5 L, below the 2000 L floor
        assert!((small.tank.volume_liters - 382.5).abs() < 1e-9);

        let large = size(&input(2000.0, 1, RainfallSource::Custom(3000.0)));
        assert!(large.tank.volume_liters > 50000.0);
    }

    #[test]
    fn pit_tiers_and_geometry() {
        let small = size(&input(99.0, 1, RainfallSource::Custom(800.0)));
        assert_eq!(small.pit.volume_m3, 10.0);
        assert_eq!(small.pit.diameter_m, 3.0);
        assert_eq!(small.pit.depth_m, 2.0);
        assert!((small.pit.area_m2 - PI * 1.5 * 1.5).abs() < 1e-12);

        let medium = size(&input(100.0, 1, RainfallSource::Custom(800.0)));
        assert_eq!(medium.pit.volume_m3, 15.0);
        assert_eq!(medium.pit.volume_liters(), 15000.0);

        let large = size(&input(250.0, 1, RainfallSource::Custom(800.0)));
        assert_eq!(large.pit.diameter_m, 4.0);
        assert!((large.pit.area_m2 - 12.566370614359172).abs() < 1e-9);
    }

    #[test]
    fn first_flush_and_recharge() {
        let sizing = size(&input(100.0, 4, pune(None)));
        assert_eq!(sizing.first_flush_liters, 200.0);
        let expected = 61370.0 - 200.0 - 61370.0 * 0.15;
        assert!((sizing.available_recharge_liters - expected).abs() < 1e-6);
    }

    #[test]
    fn recharge_never_negative() {
        // 1 m² * 722 mm * 0.85 = 613.7 L, well under the 2000 L tank floor
        let sizing = size(&input(1.0, 1, pune(Some(PUNE))));
        assert_eq!(sizing.tank.volume_liters, 2000.0);
        assert_eq!(sizing.first_flush_liters, 2.0);
        assert_eq!(sizing.available_recharge_liters, 0.0);
    }
}
