//! Installation cost, yearly savings and payback.

use serde::{Deserialize, Serialize};

use crate::config::CostParameters;
use crate::harvest::HarvestResult;
use crate::sizing::SizingResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub pit_construction_cost: f64,
    pub tank_construction_cost: f64,
    pub installation_fixed_costs: f64,
    pub total_install_cost: f64,
    pub annual_water_savings: f64,
    pub annual_maintenance_cost: f64,
    pub net_annual_savings: f64,
    /// `None` when the system never pays for itself
    pub payback_years: Option<f64>,
    pub roi_percentage: f64,
}

pub fn estimate_costs(
    harvest: &HarvestResult,
    sizing: &SizingResult,
    params: &CostParameters,
) -> CostResult {
    let pit_construction_cost = sizing.pit.volume_m3 * params.pit_cost_per_m3;
    let tank_construction_cost = sizing.tank.volume_liters * params.tank_cost_per_liter;
    let total_install_cost =
        pit_construction_cost + tank_construction_cost + params.fixed_install_cost;

    let annual_usage_liters =
        (harvest.harvested_liters * params.utilization_factor).min(harvest.annual_demand_liters);
    let municipal_savings = annual_usage_liters * params.municipal_substitution_rate / 1000.0
        * params.municipal_rate_per_kl;
    let tanker_savings = params.tanker_events_per_year * params.tanker_cost_per_event;
    let annual_water_savings = municipal_savings + tanker_savings;

    let annual_maintenance_cost = total_install_cost * params.maintenance_rate;
    let net_annual_savings = annual_water_savings - annual_maintenance_cost;

    let payback_years = (net_annual_savings > 0.0).then(|| total_install_cost / net_annual_savings);
    let roi_percentage = if total_install_cost > 0.0 {
        (net_annual_savings * params.roi_horizon_years - total_install_cost) / total_install_cost
            * 100.0
    } else {
        0.0
    };

    log::debug!(
        "costs: install {:.0}, usage {:.0} L/yr, savings {:.0}/yr, net {:.0}/yr",
        total_install_cost,
        annual_usage_liters,
        annual_water_savings,
        net_annual_savings
    );

    CostResult {
        pit_construction_cost,
        tank_construction_cost,
        installation_fixed_costs: params.fixed_install_cost,
        total_install_cost,
        annual_water_savings,
        annual_maintenance_cost,
        net_annual_savings,
        payback_years,
        roi_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::{PitSizing, TankMethod, TankSizing};

    fn harvest(harvested_liters: f64, annual_demand_liters: f64) -> HarvestResult {
        HarvestResult {
            harvested_liters,
            harvested_gallons: 0.0,
            daily_demand_liters: annual_demand_liters / 365.0,
            annual_demand_liters,
            efficiency_percent: 0.0,
        }
    }

    fn sizing(tank_liters: f64, pit_m3: f64) -> SizingResult {
        SizingResult {
            tank: TankSizing {
                volume_liters: tank_liters,
                volume_m3: tank_liters / 1000.0,
                method: TankMethod::AnnualFraction { fraction: 0.15 },
            },
            pit: PitSizing {
                volume_m3: pit_m3,
                diameter_m: 3.5,
                depth_m: 2.0,
                area_m2: 9.62,
            },
            first_flush_liters: 0.0,
            available_recharge_liters: 0.0,
        }
    }

    #[test]
    fn pune_fallback_costs() {
        let costs = estimate_costs(
            &harvest(61370.0, 197100.0),
            &sizing(9205.5, 15.0),
            &CostParameters::default(),
        );
        assert_eq!(costs.pit_construction_cost, 37500.0);
        assert!((costs.tank_construction_cost - 73644.0).abs() < 1e-6);
        assert!((costs.total_install_cost - 126144.0).abs() < 1e-6);
        // usage 36822 L -> 30% of it at 25/kL = 276.165, plus 3 tankers at 2000
        assert!((costs.annual_water_savings - 6276.165).abs() < 1e-6);
        assert!((costs.annual_maintenance_cost - 1261.44).abs() < 1e-6);
        assert!((costs.net_annual_savings - 5014.725).abs() < 1e-6);
        let payback = costs.payback_years.unwrap();
        assert!((payback - 126144.0 / 5014.725).abs() < 1e-9);
        let roi = (5014.725 * 30.0 - 126144.0) / 126144.0 * 100.0;
        assert!((costs.roi_percentage - roi).abs() < 1e-9);
    }

    #[test]
    fn usage_capped_at_demand() {
        let params = CostParameters {
            tanker_events_per_year: 0.0,
            ..CostParameters::default()
        };
        let costs = estimate_costs(&harvest(1_000_000.0, 49275.0), &sizing(2000.0, 10.0), &params);
        let expected = 49275.0 * 0.30 / 1000.0 * 25.0;
        assert!((costs.annual_water_savings - expected).abs() < 1e-9);
    }

    #[test]
    fn no_payback_when_net_savings_not_positive() {
        let params = CostParameters {
            tanker_events_per_year: 0.0,
            maintenance_rate: 0.05,
            ..CostParameters::default()
        };
        let costs = estimate_costs(&harvest(5000.0, 49275.0), &sizing(50000.0, 25.0), &params);
        assert!(costs.net_annual_savings <= 0.0);
        assert_eq!(costs.payback_years, None);
        assert!(costs.roi_percentage < -100.0);
    }

    #[test]
    fn payback_none_at_exactly_zero_net() {
        let params = CostParameters {
            tanker_events_per_year: 0.0,
            maintenance_rate: 0.0,
            ..CostParameters::default()
        };
        let costs = estimate_costs(&harvest(0.0, 49275.0), &sizing(2000.0, 10.0), &params);
        assert_eq!(costs.net_annual_savings, 0.0);
        assert_eq!(costs.payback_years, None);
    }

    #[test]
    fn zero_install_cost_has_zero_roi() {
        let params = CostParameters {
            pit_cost_per_m3: 0.0,
            tank_cost_per_liter: 0.0,
            fixed_install_cost: 0.0,
            ..CostParameters::default()
        };
        let costs = estimate_costs(&harvest(61370.0, 197100.0), &sizing(9205.5, 15.0), &params);
        assert_eq!(costs.total_install_cost, 0.0);
        assert_eq!(costs.roi_percentage, 0.0);
        assert_eq!(costs.payback_years, Some(0.0));
    }
}
