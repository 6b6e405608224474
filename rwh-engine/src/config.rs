//! Engine configuration.
//!
//! Every unit cost, sizing threshold and demand assumption the engine uses
//! lives here. Defaults reproduce the published calculator; a JSON file
//! may override any subset of fields.

use rwh_rainfall::RunoffTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub harvest: HarvestParameters,

    #[serde(default)]
    pub runoff: RunoffTable,

    #[serde(default)]
    pub sizing: SizingParameters,

    #[serde(default)]
    pub cost: CostParameters,
}

/// Household demand and unit conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestParameters {
    /// Water demand per person per day in liters
    #[serde(default = "default_per_capita_lpd")]
    pub per_capita_lpd: f64,

    /// US gallons per liter
    #[serde(default = "default_liters_to_gallons")]
    pub liters_to_gallons: f64,
}

/// Household-size threshold for a storage factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageTier {
    pub min_dwellers: u32,
    pub factor: f64,
}

/// Recharge pit chosen for roofs at or above `min_area_sqm`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitTier {
    pub min_area_sqm: f64,
    pub volume_m3: f64,
    pub diameter_m: f64,
}

/// Tank and recharge pit sizing rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingParameters {
    /// Fraction of the peak month's runoff left after first flush and filtration
    #[serde(default = "default_filtration_efficiency")]
    pub filtration_efficiency: f64,

    #[serde(default = "default_min_tank_liters")]
    pub min_tank_liters: f64,

    #[serde(default = "default_max_tank_liters")]
    pub max_tank_liters: f64,

    /// Share of the annual harvest stored when no monthly series is usable
    #[serde(default = "default_fallback_storage_fraction")]
    pub fallback_storage_fraction: f64,

    /// Storage factor for households below every tier
    #[serde(default = "default_base_storage_factor")]
    pub base_storage_factor: f64,

    #[serde(default = "default_storage_tiers")]
    pub storage_tiers: Vec<StorageTier>,

    /// Pit used for roofs below every tier
    #[serde(default = "default_base_pit")]
    pub base_pit: PitTier,

    #[serde(default = "default_pit_tiers")]
    pub pit_tiers: Vec<PitTier>,

    #[serde(default = "default_pit_depth_m")]
    pub pit_depth_m: f64,

    #[serde(default = "default_first_flush_liters_per_sqm")]
    pub first_flush_liters_per_sqm: f64,
}

/// Unit economics for the cost and payback model (INR)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostParameters {
    #[serde(default = "default_pit_cost_per_m3")]
    pub pit_cost_per_m3: f64,

    #[serde(default = "default_tank_cost_per_liter")]
    pub tank_cost_per_liter: f64,

    #[serde(default = "default_fixed_install_cost")]
    pub fixed_install_cost: f64,

    /// Municipal water tariff per kiloliter
    #[serde(default = "default_municipal_rate_per_kl")]
    pub municipal_rate_per_kl: f64,

    /// Share of used harvest that replaces municipal supply
    #[serde(default = "default_municipal_substitution_rate")]
    pub municipal_substitution_rate: f64,

    /// Share of the harvest actually used by the household
    #[serde(default = "default_utilization_factor")]
    pub utilization_factor: f64,

    /// Water tanker deliveries avoided per year
    #[serde(default = "default_tanker_events_per_year")]
    pub tanker_events_per_year: f64,

    #[serde(default = "default_tanker_cost_per_event")]
    pub tanker_cost_per_event: f64,

    /// Yearly maintenance as a fraction of the installation cost
    #[serde(default = "default_maintenance_rate")]
    pub maintenance_rate: f64,

    /// Horizon for the ROI figure
    #[serde(default = "default_roi_horizon_years")]
    pub roi_horizon_years: f64,
}

// Default values
fn default_per_capita_lpd() -> f64 {
    135.0
}

fn default_liters_to_gallons() -> f64 {
    0.264172
}

fn default_filtration_efficiency() -> f64 {
    0.95
}

fn default_min_tank_liters() -> f64 {
    2000.0
}

fn default_max_tank_liters() -> f64 {
    50000.0
}

fn default_fallback_storage_fraction() -> f64 {
    0.15
}

fn default_base_storage_factor() -> f64 {
    0.10 // single person
}

fn default_storage_tiers() -> Vec<StorageTier> {
    vec![
        StorageTier { min_dwellers: 6, factor: 0.25 },
        StorageTier { min_dwellers: 4, factor: 0.20 },
        StorageTier { min_dwellers: 2, factor: 0.15 },
    ]
}

fn default_base_pit() -> PitTier {
    PitTier {
        min_area_sqm: 0.0,
        volume_m3: 10.0,
        diameter_m: 3.0,
    }
}

fn default_pit_tiers() -> Vec<PitTier> {
    vec![
        PitTier {
            min_area_sqm: 200.0,
            volume_m3: 25.0,
            diameter_m: 4.0,
        },
        PitTier {
            min_area_sqm: 100.0,
            volume_m3: 15.0,
            diameter_m: 3.5,
        },
    ]
}

fn default_pit_depth_m() -> f64 {
    2.0
}

fn default_first_flush_liters_per_sqm() -> f64 {
    2.0
}

fn default_pit_cost_per_m3() -> f64 {
    2500.0
}

fn default_tank_cost_per_liter() -> f64 {
    8.0
}

fn default_fixed_install_cost() -> f64 {
    15000.0
}

fn default_municipal_rate_per_kl() -> f64 {
    25.0
}

fn default_municipal_substitution_rate() -> f64 {
    0.30
}

fn default_utilization_factor() -> f64 {
    0.60
}

fn default_tanker_events_per_year() -> f64 {
    3.0
}

fn default_tanker_cost_per_event() -> f64 {
    2000.0
}

fn default_maintenance_rate() -> f64 {
    0.01
}

fn default_roi_horizon_years() -> f64 {
    30.0
}

impl Default for HarvestParameters {
    fn default() -> Self {
        Self {
            per_capita_lpd: default_per_capita_lpd(),
            liters_to_gallons: default_liters_to_gallons(),
        }
    }
}

impl Default for SizingParameters {
    fn default() -> Self {
        Self {
            filtration_efficiency: default_filtration_efficiency(),
            min_tank_liters: default_min_tank_liters(),
            max_tank_liters: default_max_tank_liters(),
            fallback_storage_fraction: default_fallback_storage_fraction(),
            base_storage_factor: default_base_storage_factor(),
            storage_tiers: default_storage_tiers(),
            base_pit: default_base_pit(),
            pit_tiers: default_pit_tiers(),
            pit_depth_m: default_pit_depth_m(),
            first_flush_liters_per_sqm: default_first_flush_liters_per_sqm(),
        }
    }
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            pit_cost_per_m3: default_pit_cost_per_m3(),
            tank_cost_per_liter: default_tank_cost_per_liter(),
            fixed_install_cost: default_fixed_install_cost(),
            municipal_rate_per_kl: default_municipal_rate_per_kl(),
            municipal_substitution_rate: default_municipal_substitution_rate(),
            utilization_factor: default_utilization_factor(),
            tanker_events_per_year: default_tanker_events_per_year(),
            tanker_cost_per_event: default_tanker_cost_per_event(),
            maintenance_rate: default_maintenance_rate(),
            roi_horizon_years: default_roi_horizon_years(),
        }
    }
}

impl SizingParameters {
    /// Storage factor for the highest household tier reached.
    pub fn storage_factor(&self, dwellers: u32) -> f64 {
        self.storage_tiers
            .iter()
            .filter(|tier| dwellers >= tier.min_dwellers)
            .max_by_key(|tier| tier.min_dwellers)
            .map(|tier| tier.factor)
            .unwrap_or(self.base_storage_factor)
    }

    /// Pit for the highest roof-area tier reached.
    pub fn pit_for_area(&self, area_sqm: f64) -> &PitTier {
        self.pit_tiers
            .iter()
            .filter(|tier| area_sqm >= tier.min_area_sqm)
            .max_by(|a, b| a.min_area_sqm.total_cmp(&b.min_area_sqm))
            .unwrap_or(&self.base_pit)
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
        let config = Self::from_json_str(&raw)?;
        log::info!("loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Reject values that cannot describe a real installation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coefficients = [
            ("runoff.impervious", self.runoff.impervious),
            ("runoff.tiled", self.runoff.tiled),
            ("runoff.rough", self.runoff.rough),
            ("runoff.vegetated", self.runoff.vegetated),
            ("runoff.default", self.runoff.default),
        ];
        for (field, value) in coefficients {
            if !(value > 0.0 && value <= 1.0) {
                return Err(invalid(field, "runoff coefficient must be in (0, 1]"));
            }
        }

        if self.sizing.min_tank_liters > self.sizing.max_tank_liters {
            return Err(invalid(
                "sizing.min_tank_liters",
                "must not exceed sizing.max_tank_liters",
            ));
        }

        let non_negative = [
            ("harvest.per_capita_lpd", self.harvest.per_capita_lpd),
            ("sizing.pit_depth_m", self.sizing.pit_depth_m),
            (
                "sizing.first_flush_liters_per_sqm",
                self.sizing.first_flush_liters_per_sqm,
            ),
            ("cost.pit_cost_per_m3", self.cost.pit_cost_per_m3),
            ("cost.tank_cost_per_liter", self.cost.tank_cost_per_liter),
            ("cost.fixed_install_cost", self.cost.fixed_install_cost),
            ("cost.maintenance_rate", self.cost.maintenance_rate),
            ("cost.roi_horizon_years", self.cost.roi_horizon_years),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(invalid(field, "must be a non-negative number"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.harvest.per_capita_lpd, 135.0);
        assert_eq!(config.runoff.default, 0.8);
        assert_eq!(config.sizing.min_tank_liters, 2000.0);
        assert_eq!(config.sizing.max_tank_liters, 50000.0);
        assert_eq!(config.cost.pit_cost_per_m3, 2500.0);
        assert_eq!(config.cost.tank_cost_per_liter, 8.0);
        assert_eq!(config.cost.fixed_install_cost, 15000.0);
        assert_eq!(config.cost.roi_horizon_years, 30.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn storage_factor_tiers() {
        let sizing = SizingParameters::default();
        assert_eq!(sizing.storage_factor(1), 0.10);
        assert_eq!(sizing.storage_factor(2), 0.15);
        assert_eq!(sizing.storage_factor(3), 0.15);
        assert_eq!(sizing.storage_factor(4), 0.20);
        assert_eq!(sizing.storage_factor(5), 0.20);
        assert_eq!(sizing.storage_factor(6), 0.25);
        assert_eq!(sizing.storage_factor(12), 0.25);
    }

    #[test]
    fn pit_tiers_by_roof_area() {
        let sizing = SizingParameters::default();
        assert_eq!(sizing.pit_for_area(50.0).volume_m3, 10.0);
        assert_eq!(sizing.pit_for_area(99.99).diameter_m, 3.0);
        assert_eq!(sizing.pit_for_area(100.0).volume_m3, 15.0);
        assert_eq!(sizing.pit_for_area(199.0).diameter_m, 3.5);
        assert_eq!(sizing.pit_for_area(200.0).volume_m3, 25.0);
        assert_eq!(sizing.pit_for_area(1000.0).diameter_m, 4.0);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let json = r#"{ "cost": { "roi_horizon_years": 20, "maintenance_rate": 0.02 } }"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.cost.roi_horizon_years, 20.0);
        assert_eq!(config.cost.maintenance_rate, 0.02);
        assert_eq!(config.cost.tank_cost_per_liter, 8.0);
        assert_eq!(config.harvest, HarvestParameters::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn out_of_range_coefficient_is_rejected() {
        let json = r#"{ "runoff": { "default": 1.5 } }"#;
        let err = EngineConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "runoff.default"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = EngineConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
