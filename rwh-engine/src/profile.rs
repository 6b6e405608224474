//! Month-by-month harvest against household consumption.

use rwh_rainfall::monthly::{Month, MonthlySeries};
use serde::Serialize;

/// Baseline consumption per person per month in liters, Jan..Dec.
pub const BASE_MONTHLY_CONSUMPTION_LITERS: [f64; 12] = [
    1767.0, 1596.0, 1897.0, 2070.0, 2139.0, 2070.0, 1860.0, 1860.0, 1800.0, 1897.0, 1836.0, 1767.0,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBalance {
    pub month: Month,
    pub rainfall_mm: f64,
    pub harvest_liters: f64,
    pub consumption_liters: f64,
}

impl MonthlyBalance {
    /// Harvest minus consumption; negative means a shortfall.
    pub fn surplus_liters(&self) -> f64 {
        self.harvest_liters - self.consumption_liters
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyProfile {
    pub district_name: String,
    pub state: String,
    pub roof_area_sqm: f64,
    pub roof_type: String,
    pub runoff_coefficient: f64,
    pub people: u32,
    pub months: Vec<MonthlyBalance>,
}

impl MonthlyProfile {
    pub fn total_harvest_liters(&self) -> f64 {
        self.months.iter().map(|m| m.harvest_liters).sum()
    }

    pub fn total_consumption_liters(&self) -> f64 {
        self.months.iter().map(|m| m.consumption_liters).sum()
    }

    /// Months where consumption outruns the harvest.
    pub fn deficit_months(&self) -> Vec<Month> {
        self.months
            .iter()
            .filter(|m| m.surplus_liters() < 0.0)
            .map(|m| m.month)
            .collect()
    }
}

/// Unfiltered harvest per month next to the household's baseline use.
pub fn monthly_balance(
    series: &MonthlySeries,
    roof_area_sqm: f64,
    runoff_coefficient: f64,
    people: u32,
) -> Vec<MonthlyBalance> {
    series
        .iter()
        .map(|(month, rainfall_mm)| MonthlyBalance {
            month,
            rainfall_mm,
            harvest_liters: rainfall_mm * roof_area_sqm * runoff_coefficient,
            consumption_liters: BASE_MONTHLY_CONSUMPTION_LITERS[month.index()] * f64::from(people),
        })
        .collect()
}
