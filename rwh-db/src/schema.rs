//! SQL schema definitions for the rainfall database.
//!
//! The schema is applied as a single batch when the database is opened.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// **Reference tables:**
/// - `rainfall_data` - Annual rainfall per district (name, state, mm)
/// - `monthly_rainfall` - Monthly normals per district, Jan..Dec in mm
///
/// **Log tables:**
/// - `calculation_log` - Saved estimates with their full JSON record
///
/// District and state columns compare case-insensitively (`COLLATE NOCASE`),
/// which is what district lookups need. A missing state is stored as `''`.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS rainfall_data (
        id INTEGER PRIMARY KEY,
        district_name TEXT NOT NULL COLLATE NOCASE,
        state TEXT NOT NULL DEFAULT '' COLLATE NOCASE,
        annual_rainfall_mm REAL NOT NULL,
        UNIQUE (district_name, state)
    );
    CREATE INDEX IF NOT EXISTS idx_rainfall_district ON rainfall_data(district_name);
    CREATE INDEX IF NOT EXISTS idx_rainfall_state ON rainfall_data(state);

    CREATE TABLE IF NOT EXISTS monthly_rainfall (
        district_name TEXT NOT NULL COLLATE NOCASE,
        state TEXT NOT NULL DEFAULT '' COLLATE NOCASE,
        jan REAL NOT NULL,
        feb REAL NOT NULL,
        mar REAL NOT NULL,
        apr REAL NOT NULL,
        may REAL NOT NULL,
        jun REAL NOT NULL,
        jul REAL NOT NULL,
        aug REAL NOT NULL,
        sep REAL NOT NULL,
        oct REAL NOT NULL,
        nov REAL NOT NULL,
        dec REAL NOT NULL,
        PRIMARY KEY (district_name, state)
    );

    CREATE TABLE IF NOT EXISTS calculation_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at TEXT NOT NULL,
        client_label TEXT,
        district_name TEXT NOT NULL,
        state TEXT NOT NULL,
        roof_area_sqm REAL NOT NULL,
        roof_type TEXT NOT NULL,
        runoff_coefficient REAL NOT NULL,
        annual_rainfall_mm REAL NOT NULL,
        water_harvested_liters REAL NOT NULL,
        number_of_dwellers INTEGER NOT NULL,
        efficiency_percent REAL,
        result_json TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_calc_created ON calculation_log(created_at);
    "#
}
