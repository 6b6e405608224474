//! The flat result record handed back to callers and persisted verbatim.

use rwh_rainfall::monthly::Month;
use rwh_utils::rounding::round_to;
use serde::{Deserialize, Serialize};

use crate::cost::CostResult;
use crate::harvest::HarvestResult;
use crate::recommendation::Recommendation;
use crate::resolver::CalculationInput;
use crate::sizing::{SizingResult, TankMethod};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub district_name: String,
    pub state: String,
    /// "lookup" or "custom"
    pub rainfall_source: String,
    pub annual_rainfall_mm: f64,
    pub roof_area_sqm: f64,
    pub roof_type: String,
    pub runoff_coefficient: f64,
    pub number_of_dwellers: u32,
    pub water_harvested_liters: f64,
    pub water_harvested_gallons: f64,
    pub daily_requirement_liters: f64,
    pub annual_requirement_liters: f64,
    pub efficiency_percent: f64,
    pub recommendation: String,

    pub tank_volume_liters: f64,
    pub tank_volume_m3: f64,
    pub first_flush_liters: f64,
    pub available_recharge_liters: f64,
    pub required_pit_volume_liters: f64,
    pub pit_diameter_m: f64,
    pub pit_depth_m: f64,
    pub pit_area_m2: f64,
    /// Wettest month, when the tank was sized from monthly normals
    pub peak_month: Option<Month>,
    pub peak_month_rainfall_mm: Option<f64>,

    pub costs: CostResult,
    pub enhanced_recommendations: Vec<String>,
}

impl CalculationResult {
    pub fn assemble(
        input: &CalculationInput,
        harvest: &HarvestResult,
        sizing: &SizingResult,
        costs: CostResult,
        recommendation: Recommendation,
    ) -> Self {
        let (peak_month, peak_month_rainfall_mm) = match &sizing.tank.method {
            TankMethod::PeakMonth {
                month, rainfall_mm, ..
            } => (Some(*month), Some(*rainfall_mm)),
            TankMethod::AnnualFraction { .. } => (None, None),
        };

        CalculationResult {
            district_name: input.district_name.clone(),
            state: input.rainfall.state().to_string(),
            rainfall_source: input.rainfall.kind().to_string(),
            annual_rainfall_mm: input.rainfall.annual_rainfall_mm(),
            roof_area_sqm: input.roof_area_sqm,
            roof_type: input.roof_type.clone(),
            runoff_coefficient: input.runoff_coefficient,
            number_of_dwellers: input.number_of_dwellers,
            water_harvested_liters: harvest.harvested_liters,
            water_harvested_gallons: harvest.harvested_gallons,
            daily_requirement_liters: harvest.daily_demand_liters,
            annual_requirement_liters: harvest.annual_demand_liters,
            efficiency_percent: harvest.efficiency_percent,
            recommendation: recommendation.summary,
            tank_volume_liters: sizing.tank.volume_liters,
            tank_volume_m3: sizing.tank.volume_m3,
            first_flush_liters: sizing.first_flush_liters,
            available_recharge_liters: sizing.available_recharge_liters,
            required_pit_volume_liters: sizing.pit.volume_liters(),
            pit_diameter_m: sizing.pit.diameter_m,
            pit_depth_m: sizing.pit.depth_m,
            pit_area_m2: sizing.pit.area_m2,
            peak_month,
            peak_month_rainfall_mm,
            costs,
            enhanced_recommendations: recommendation.highlights,
        }
    }

    /// Copy rounded for display and storage: rainfall and area to 2 dp,
    /// volumes and money to whole units, ratios to 1 dp.
    pub fn rounded(&self) -> Self {
        let costs = &self.costs;
        CalculationResult {
            annual_rainfall_mm: round_to(self.annual_rainfall_mm, 2),
            roof_area_sqm: round_to(self.roof_area_sqm, 2),
            runoff_coefficient: round_to(self.runoff_coefficient, 2),
            water_harvested_liters: round_to(self.water_harvested_liters, 0),
            water_harvested_gallons: round_to(self.water_harvested_gallons, 0),
            efficiency_percent: round_to(self.efficiency_percent, 1),
            tank_volume_liters: round_to(self.tank_volume_liters, 0),
            tank_volume_m3: round_to(self.tank_volume_m3, 1),
            first_flush_liters: round_to(self.first_flush_liters, 0),
            available_recharge_liters: round_to(self.available_recharge_liters, 0),
            required_pit_volume_liters: round_to(self.required_pit_volume_liters, 0),
            pit_diameter_m: round_to(self.pit_diameter_m, 1),
            pit_depth_m: round_to(self.pit_depth_m, 1),
            pit_area_m2: round_to(self.pit_area_m2, 1),
            costs: CostResult {
                pit_construction_cost: round_to(costs.pit_construction_cost, 0),
                tank_construction_cost: round_to(costs.tank_construction_cost, 0),
                installation_fixed_costs: round_to(costs.installation_fixed_costs, 0),
                total_install_cost: round_to(costs.total_install_cost, 0),
                annual_water_savings: round_to(costs.annual_water_savings, 0),
                annual_maintenance_cost: round_to(costs.annual_maintenance_cost, 0),
                net_annual_savings: round_to(costs.net_annual_savings, 0),
                payback_years: costs.payback_years.map(|y| round_to(y, 1)),
                roi_percentage: round_to(costs.roi_percentage, 1),
            },
            ..self.clone()
        }
    }

    /// Name of the first numeric field that is NaN or infinite, if any.
    pub fn first_non_finite_field(&self) -> Option<&'static str> {
        let c = &self.costs;
        let fields = [
            ("annual_rainfall_mm", self.annual_rainfall_mm),
            ("roof_area_sqm", self.roof_area_sqm),
            ("water_harvested_liters", self.water_harvested_liters),
            ("water_harvested_gallons", self.water_harvested_gallons),
            ("annual_requirement_liters", self.annual_requirement_liters),
            ("efficiency_percent", self.efficiency_percent),
            ("tank_volume_liters", self.tank_volume_liters),
            ("available_recharge_liters", self.available_recharge_liters),
            ("pit_area_m2", self.pit_area_m2),
            ("total_install_cost", c.total_install_cost),
            ("annual_water_savings", c.annual_water_savings),
            ("net_annual_savings", c.net_annual_savings),
            ("payback_years", c.payback_years.unwrap_or(0.0)),
            ("roi_percentage", c.roi_percentage),
        ];
        fields
            .iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| *name)
    }
}
