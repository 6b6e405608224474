//! Typed query methods for the rainfall dataset and the calculation log.

use crate::models::{CalculationLogEntry, DistrictDetail, DistrictSummary};
use crate::Database;
use rusqlite::{params, Connection, OptionalExtension};
use rwh_engine::{CalculationResult, RainfallRepository};
use rwh_rainfall::district::{DistrictRainfall, STATE_NOT_SPECIFIED};
use rwh_rainfall::monthly::MonthlySeries;

/// Most rows a district search returns.
pub const SEARCH_LIMIT: usize = 20;

fn state_or_default(state: String) -> String {
    if state.is_empty() {
        STATE_NOT_SPECIFIED.to_string()
    } else {
        state
    }
}

fn monthly_for(
    conn: &Connection,
    district_name: &str,
    state: Option<&str>,
) -> rusqlite::Result<Option<MonthlySeries>> {
    conn.query_row(
        "SELECT jan, feb, mar, apr, may, jun, jul, aug, sep, oct, nov, dec
         FROM monthly_rainfall
         WHERE district_name = ?1 AND (?2 IS NULL OR state = ?2)
         ORDER BY state
         LIMIT 1",
        params![district_name.trim(), state],
        |row| {
            let mut values = [0.0; 12];
            for (i, value) in values.iter_mut().enumerate() {
                *value = row.get(i)?;
            }
            Ok(MonthlySeries::new(values))
        },
    )
    .optional()
}

impl Database {
    // ───────────────────── District Queries ─────────────────────

    pub fn count_districts(&self) -> anyhow::Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM rainfall_data", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Districts whose name equals `name`, ignoring case, in load order.
    pub fn query_districts_by_name(&self, name: &str) -> anyhow::Result<Vec<DistrictRainfall>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT district_name, state, annual_rainfall_mm FROM rainfall_data
             WHERE district_name = ?1
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![name.trim()], |row| {
                Ok(DistrictRainfall::new(
                    &row.get::<_, String>(0)?,
                    &row.get::<_, String>(1)?,
                    row.get(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[RWH] query: query_districts_by_name({:?}) returned {} records",
            name,
            rows.len()
        );
        Ok(rows)
    }

    /// Search districts by name or state.
    ///
    /// Case-insensitive substring match on either column, ordered by
    /// district name, at most [`SEARCH_LIMIT`] rows. An empty term lists
    /// the first districts alphabetically.
    pub fn search_districts(&self, term: &str) -> anyhow::Result<Vec<DistrictSummary>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT district_name, state, annual_rainfall_mm FROM rainfall_data
             WHERE instr(lower(district_name), lower(?1)) > 0
                OR instr(lower(state), lower(?1)) > 0
             ORDER BY district_name, state
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![term.trim(), SEARCH_LIMIT as i64], |row| {
                Ok(DistrictSummary {
                    district_name: row.get(0)?,
                    state: state_or_default(row.get(1)?),
                    annual_rainfall_mm: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[RWH] query: search_districts({:?}) returned {} records",
            term,
            rows.len()
        );
        Ok(rows)
    }

    /// First district matching `name` exactly (ignoring case), with its
    /// monthly normals when present.
    pub fn district_info(&self, name: &str) -> anyhow::Result<Option<DistrictDetail>> {
        let conn = self.conn()?;
        let found: Option<(String, String, f64)> = conn
            .query_row(
                "SELECT district_name, state, annual_rainfall_mm FROM rainfall_data
                 WHERE district_name = ?1
                 ORDER BY district_name, state
                 LIMIT 1",
                params![name.trim()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let detail = match found {
            Some((district_name, state, annual_rainfall_mm)) => {
                let monthly = monthly_for(&conn, &district_name, Some(&state))?;
                Some(DistrictDetail {
                    district_name,
                    state: state_or_default(state),
                    annual_rainfall_mm,
                    monthly,
                })
            }
            None => None,
        };
        log::info!(
            "[RWH] query: district_info({:?}) found={}",
            name,
            detail.is_some()
        );
        Ok(detail)
    }

    pub fn query_monthly_series(
        &self,
        district_name: &str,
        state: Option<&str>,
    ) -> anyhow::Result<Option<MonthlySeries>> {
        let conn = self.conn()?;
        Ok(monthly_for(&conn, district_name, state)?)
    }

    // ───────────────────── Calculation Log ─────────────────────

    /// Persist a finished estimate. Returns the new log id.
    pub fn save_calculation(
        &self,
        result: &CalculationResult,
        client_label: Option<&str>,
    ) -> anyhow::Result<i64> {
        let result_json = serde_json::to_string(result)?;
        let created_at = chrono::Utc::now().to_rfc3339();
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO calculation_log
             (created_at, client_label, district_name, state, roof_area_sqm, roof_type,
              runoff_coefficient, annual_rainfall_mm, water_harvested_liters,
              number_of_dwellers, efficiency_percent, result_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                created_at,
                client_label,
                result.district_name,
                result.state,
                result.roof_area_sqm,
                result.roof_type,
                result.runoff_coefficient,
                result.annual_rainfall_mm,
                result.water_harvested_liters,
                result.number_of_dwellers,
                result.efficiency_percent,
                result_json
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::info!(
            "[RWH] query: saved calculation {} for {}",
            id,
            result.district_name
        );
        Ok(id)
    }

    /// Saved estimates, newest first.
    pub fn recent_calculations(&self, limit: usize) -> anyhow::Result<Vec<CalculationLogEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, created_at, client_label, district_name, state, roof_area_sqm,
                    roof_type, number_of_dwellers, water_harvested_liters, efficiency_percent
             FROM calculation_log
             ORDER BY id DESC
             LIMIT ?1",
        )?;
        let rows = stmt
            .query_map(params![limit as i64], |row| {
                Ok(CalculationLogEntry {
                    id: row.get(0)?,
                    created_at: row.get(1)?,
                    client_label: row.get(2)?,
                    district_name: row.get(3)?,
                    state: row.get(4)?,
                    roof_area_sqm: row.get(5)?,
                    roof_type: row.get(6)?,
                    number_of_dwellers: row.get(7)?,
                    water_harvested_liters: row.get(8)?,
                    efficiency_percent: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[RWH] query: recent_calculations returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// The full record stored with a saved estimate.
    pub fn load_calculation(&self, id: i64) -> anyhow::Result<Option<CalculationResult>> {
        let conn = self.conn()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT result_json FROM calculation_log WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

impl RainfallRepository for Database {
    fn lookup_district(&self, name: &str) -> anyhow::Result<Vec<DistrictRainfall>> {
        self.query_districts_by_name(name)
    }

    fn lookup_monthly_series(
        &self,
        district_name: &str,
        state: Option<&str>,
    ) -> anyhow::Result<Option<MonthlySeries>> {
        self.query_monthly_series(district_name, state)
    }
}
