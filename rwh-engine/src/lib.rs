//! Rainwater harvesting estimation engine.
//!
//! Turns a roof, a household and a district's rainfall into an annual
//! harvest estimate, a tank and recharge pit recommendation, and a cost and
//! payback model. The pipeline is pure: resolve input, estimate harvest,
//! size the system, cost it, compose the recommendation. The only outside
//! call is the rainfall lookup on the injected [`RainfallRepository`].
//!
//! # Usage
//!
//! ```rust
//! use rwh_engine::{CalculationRequest, Engine, InMemoryRepository};
//!
//! let engine = Engine::new(InMemoryRepository::from_embedded().unwrap());
//! let request = CalculationRequest::for_district("Pune")
//!     .with_area(100.0)
//!     .with_roof_type("RCC")
//!     .with_dwellers(4);
//! let result = engine.compute(&request).unwrap();
//! assert_eq!(result.water_harvested_liters.round(), 61370.0);
//! ```

pub mod config;
pub mod cost;
pub mod error;
pub mod harvest;
pub mod profile;
pub mod recommendation;
pub mod repository;
pub mod request;
pub mod resolver;
pub mod result;
pub mod sizing;

pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, ValidationError};
pub use profile::MonthlyProfile;
pub use repository::{InMemoryRepository, RainfallRepository};
pub use request::CalculationRequest;
pub use resolver::{CalculationInput, RainfallSource};
pub use result::CalculationResult;

use rwh_rainfall::roof::RoofMaterial;

/// Stateless estimator over a rainfall repository.
///
/// Holds only read-only configuration and the repository handle, so one
/// engine can serve any number of concurrent callers when `R` allows it.
#[derive(Debug, Clone)]
pub struct Engine<R> {
    repository: R,
    config: EngineConfig,
}

impl<R: RainfallRepository> Engine<R> {
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, EngineConfig::default())
    }

    pub fn with_config(repository: R, config: EngineConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Run the full estimate. Any failure aborts the whole pipeline.
    pub fn compute(&self, request: &CalculationRequest) -> Result<CalculationResult, EngineError> {
        let input = resolver::resolve(request, &self.repository, &self.config.runoff)?;
        log::debug!(
            "input: {} m² {} (c={}) x{} dwellers, {} mm ({})",
            input.roof_area_sqm,
            input.roof_type,
            input.runoff_coefficient,
            input.number_of_dwellers,
            input.rainfall.annual_rainfall_mm(),
            input.rainfall.kind()
        );

        let harvest = harvest::estimate_harvest(&input, &self.config.harvest);
        log::debug!(
            "harvest: {:.0} L/yr against {:.0} L/yr demand ({:.1}%)",
            harvest.harvested_liters,
            harvest.annual_demand_liters,
            harvest.efficiency_percent
        );

        let sizing = sizing::size_system(&input, &harvest, &self.config.sizing);
        log::debug!(
            "sizing: tank {:.0} L, pit {} m³ x {} m",
            sizing.tank.volume_liters,
            sizing.pit.volume_m3,
            sizing.pit.diameter_m
        );

        let costs = cost::estimate_costs(&harvest, &sizing, &self.config.cost);
        let recommendation = recommendation::compose(&input, &harvest, &sizing, &costs);
        let result = CalculationResult::assemble(&input, &harvest, &sizing, costs, recommendation);

        if let Some(field) = result.first_non_finite_field() {
            return Err(EngineError::internal(format!(
                "non-finite {} for district {:?}, area {}, rainfall {}",
                field,
                input.district_name,
                input.roof_area_sqm,
                input.rainfall.annual_rainfall_mm()
            )));
        }

        log::info!(
            "estimated {:.0} L/yr for {} ({}), {:.1}% of demand",
            result.water_harvested_liters,
            result.district_name,
            result.state,
            result.efficiency_percent
        );
        Ok(result)
    }

    /// Monthly harvest against baseline consumption for a looked-up district.
    pub fn monthly_profile(
        &self,
        district_name: &str,
        roof_area_sqm: f64,
        roof_type: &str,
        people: u32,
    ) -> Result<MonthlyProfile, EngineError> {
        // Reuses the resolver so validation and ambiguity rules match compute()
        let request = CalculationRequest::for_district(district_name)
            .with_area(roof_area_sqm)
            .with_roof_type(roof_type)
            .with_dwellers(i64::from(people));
        let input = resolver::resolve(&request, &self.repository, &self.config.runoff)?;

        let district = match &input.rainfall {
            RainfallSource::Lookup(district) => district,
            RainfallSource::Custom(_) => {
                return Err(EngineError::internal("monthly profile resolved to custom rainfall"))
            }
        };
        let series = district
            .monthly
            .as_ref()
            .ok_or_else(|| EngineError::MonthlySeriesUnavailable {
                district: district.label(),
            })?;

        Ok(MonthlyProfile {
            district_name: district.district_name.clone(),
            state: district.state_or_default().to_string(),
            roof_area_sqm: input.roof_area_sqm,
            roof_type: input.roof_type.clone(),
            runoff_coefficient: input.runoff_coefficient,
            people: input.number_of_dwellers,
            months: profile::monthly_balance(
                series,
                input.roof_area_sqm,
                input.runoff_coefficient,
                input.number_of_dwellers,
            ),
        })
    }

    /// Runoff coefficient the engine would apply to a roof type label.
    pub fn runoff_coefficient(&self, roof_type: &str) -> f64 {
        self.config
            .runoff
            .coefficient(RoofMaterial::from_label(roof_type))
    }
}
