//! Qualitative summary and highlight lines for a finished estimate.

use rwh_utils::format::{grouped, trimmed};
use serde::{Deserialize, Serialize};

use crate::cost::CostResult;
use crate::harvest::HarvestResult;
use crate::resolver::CalculationInput;
use crate::sizing::SizingResult;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyTier {
    Excellent,
    VeryGood,
    Good,
    Moderate,
    Limited,
}

impl EfficiencyTier {
    pub fn from_efficiency(efficiency_percent: f64) -> Self {
        if efficiency_percent >= 100.0 {
            EfficiencyTier::Excellent
        } else if efficiency_percent >= 70.0 {
            EfficiencyTier::VeryGood
        } else if efficiency_percent >= 40.0 {
            EfficiencyTier::Good
        } else if efficiency_percent >= 20.0 {
            EfficiencyTier::Moderate
        } else {
            EfficiencyTier::Limited
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub tier: EfficiencyTier,
    pub summary: String,
    /// Cost, savings, payback, tank and pit, in that order
    pub highlights: Vec<String>,
}

pub fn compose(
    input: &CalculationInput,
    harvest: &HarvestResult,
    sizing: &SizingResult,
    costs: &CostResult,
) -> Recommendation {
    let tier = EfficiencyTier::from_efficiency(harvest.efficiency_percent);
    Recommendation {
        tier,
        summary: summary(tier, input, harvest),
        highlights: highlights(sizing, costs),
    }
}

fn summary(tier: EfficiencyTier, input: &CalculationInput, harvest: &HarvestResult) -> String {
    let liters = grouped(harvest.harvested_liters, 0);
    let efficiency = format!("{:.0}", harvest.efficiency_percent);
    match tier {
        EfficiencyTier::Excellent => format!(
            "🌟 Excellent! Your {}m² roof can harvest {}L annually ({}% of demand), fully meeting your {}-person household's water needs.",
            trimmed(input.roof_area_sqm, 2),
            liters,
            efficiency,
            input.number_of_dwellers
        ),
        EfficiencyTier::VeryGood => format!(
            "💪 Very Good! Your roof can harvest {}L annually, covering {}% of your household water needs.",
            liters, efficiency
        ),
        EfficiencyTier::Good => format!(
            "👍 Good Potential! Your roof can harvest {}L annually, covering {}% of your water needs.",
            liters, efficiency
        ),
        EfficiencyTier::Moderate => format!(
            "⚡ Moderate Potential. Your roof can harvest {}L annually, covering {}% of your needs.",
            liters, efficiency
        ),
        EfficiencyTier::Limited => format!(
            "💡 Limited harvest potential of {}L annually ({}% of your needs). Consider increasing roof area or improving runoff efficiency.",
            liters, efficiency
        ),
    }
}

fn highlights(sizing: &SizingResult, costs: &CostResult) -> Vec<String> {
    let payback = match costs.payback_years {
        Some(years) => format!("⏱️ Payback period: {:.1} years", years),
        None => "⏱️ Long-term investment benefits".to_string(),
    };
    vec![
        format!("💰 Total system cost: ₹{}", grouped(costs.total_install_cost, 0)),
        format!("💧 Annual water savings: ₹{}", grouped(costs.net_annual_savings, 0)),
        payback,
        format!(
            "🔧 Recommended tank capacity: {}L",
            grouped(sizing.tank.volume_liters, 0)
        ),
        format!(
            "🕳️ Pit specifications: {:.1}m diameter, {:.1}m depth",
            sizing.pit.diameter_m, sizing.pit.depth_m
        ),
    ]
}
