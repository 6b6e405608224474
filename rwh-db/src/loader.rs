//! CSV data loading functions for populating the rainfall tables.
//!
//! Each loader parses CSV text with the `rwh-rainfall` parsers and upserts
//! the rows, so reloading a file replaces earlier figures.
//!
//! # CSV Formats
//!
//! - **Districts** (has headers): `DISTRICT,STATE,ANNUAL_RAINFALL_MM`
//! - **Monthly rainfall** (has headers): `DISTRICT,STATE,JAN,...,DEC`

use crate::Database;
use rusqlite::params;
use rwh_rainfall::district::{self, DistrictRainfall};
use rwh_rainfall::monthly::{self, DistrictMonthlyRainfall};

impl Database {
    /// Load annual district rainfall from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// DISTRICT,STATE,ANNUAL_RAINFALL_MM
    /// Pune,Maharashtra,722
    /// ```
    pub fn load_districts(&self, csv_data: &str) -> anyhow::Result<()> {
        let districts = DistrictRainfall::parse_district_csv(csv_data)?;
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "INSERT OR REPLACE INTO rainfall_data (district_name, state, annual_rainfall_mm)
             VALUES (?1, ?2, ?3)",
        )?;
        for d in &districts {
            stmt.execute(params![
                d.district_name,
                d.state.as_deref().unwrap_or(""),
                d.annual_rainfall_mm
            ])?;
        }
        log::info!("[RWH] loader: Loaded {} districts", districts.len());
        Ok(())
    }

    /// Load monthly rainfall normals from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// DISTRICT,STATE,JAN,FEB,MAR,APR,MAY,JUN,JUL,AUG,SEP,OCT,NOV,DEC
    /// Pune,Maharashtra,1.6,0.3,3.0,11.2,31.4,138.2,188.6,117.5,129.2,76.0,29.3,5.7
    /// ```
    pub fn load_monthly_rainfall(&self, csv_data: &str) -> anyhow::Result<()> {
        let rows = DistrictMonthlyRainfall::parse_monthly_csv(csv_data)?;
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "INSERT OR REPLACE INTO monthly_rainfall
             (district_name, state, jan, feb, mar, apr, may, jun, jul, aug, sep, oct, nov, dec)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        )?;
        for row in &rows {
            let v = row.series.values();
            stmt.execute(params![
                row.district_name,
                row.state,
                v[0],
                v[1],
                v[2],
                v[3],
                v[4],
                v[5],
                v[6],
                v[7],
                v[8],
                v[9],
                v[10],
                v[11]
            ])?;
        }
        log::info!("[RWH] loader: Loaded {} monthly rainfall rows", rows.len());
        Ok(())
    }

    /// Load the district and monthly fixtures compiled into `rwh-rainfall`.
    pub fn load_embedded(&self) -> anyhow::Result<()> {
        self.load_districts(district::CSV_OBJECT)?;
        self.load_monthly_rainfall(monthly::CSV_OBJECT)
    }
}
