//! The read-only rainfall dataset the engine consults.
//!
//! The engine never reaches for a global dataset; callers hand it a
//! repository at construction time. [`InMemoryRepository`] serves the
//! embedded fixtures and test data, the `rwh-db` crate serves SQLite.

use rwh_rainfall::district::DistrictRainfall;
use rwh_rainfall::monthly::{DistrictMonthlyRainfall, MonthlySeries};

pub trait RainfallRepository {
    /// Every district whose name equals `name`, ignoring case.
    fn lookup_district(&self, name: &str) -> anyhow::Result<Vec<DistrictRainfall>>;

    /// Monthly normals for a district. `state` narrows the match when the
    /// district record has one.
    fn lookup_monthly_series(
        &self,
        district_name: &str,
        state: Option<&str>,
    ) -> anyhow::Result<Option<MonthlySeries>>;
}

impl<R: RainfallRepository + ?Sized> RainfallRepository for &R {
    fn lookup_district(&self, name: &str) -> anyhow::Result<Vec<DistrictRainfall>> {
        (**self).lookup_district(name)
    }

    fn lookup_monthly_series(
        &self,
        district_name: &str,
        state: Option<&str>,
    ) -> anyhow::Result<Option<MonthlySeries>> {
        (**self).lookup_monthly_series(district_name, state)
    }
}

/// Rainfall dataset held in plain vectors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    districts: Vec<DistrictRainfall>,
    monthly: Vec<DistrictMonthlyRainfall>,
}

impl InMemoryRepository {
    pub fn new(districts: Vec<DistrictRainfall>, monthly: Vec<DistrictMonthlyRainfall>) -> Self {
        Self { districts, monthly }
    }

    /// Repository over the district and monthly fixtures compiled into
    /// `rwh-rainfall`.
    pub fn from_embedded() -> anyhow::Result<Self> {
        let districts = DistrictRainfall::get_district_vector()?;
        let monthly = DistrictMonthlyRainfall::get_monthly_vector()?;
        log::info!(
            "loaded {} districts and {} monthly series from embedded data",
            districts.len(),
            monthly.len()
        );
        Ok(Self::new(districts, monthly))
    }

    /// Repository over caller-supplied CSV text in the fixture formats.
    pub fn from_csv(districts_csv: &str, monthly_csv: &str) -> anyhow::Result<Self> {
        Ok(Self::new(
            DistrictRainfall::parse_district_csv(districts_csv)?,
            DistrictMonthlyRainfall::parse_monthly_csv(monthly_csv)?,
        ))
    }

    pub fn districts(&self) -> &[DistrictRainfall] {
        &self.districts
    }
}

impl RainfallRepository for InMemoryRepository {
    fn lookup_district(&self, name: &str) -> anyhow::Result<Vec<DistrictRainfall>> {
        Ok(self
            .districts
            .iter()
            .filter(|d| d.matches_name(name))
            .cloned()
            .collect())
    }

    fn lookup_monthly_series(
        &self,
        district_name: &str,
        state: Option<&str>,
    ) -> anyhow::Result<Option<MonthlySeries>> {
        let wanted = district_name.trim().to_lowercase();
        let wanted_state = state.map(|s| s.trim().to_lowercase());
        Ok(self
            .monthly
            .iter()
            .find(|row| {
                row.district_name.to_lowercase() == wanted
                    && wanted_state
                        .as_ref()
                        .map_or(true, |s| row.state.to_lowercase() == *s)
            })
            .map(|row| row.series))
    }
}
