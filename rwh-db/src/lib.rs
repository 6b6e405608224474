//! SQLite database layer for district rainfall and saved estimates.
//!
//! This crate loads the district rainfall CSVs into SQLite, answers the
//! lookups the estimation engine needs (it implements
//! [`rwh_engine::RainfallRepository`]) and keeps a log of saved
//! calculations.
//!
//! # Usage
//!
//! ```rust
//! use rwh_db::Database;
//! use rwh_engine::{CalculationRequest, Engine};
//!
//! let db = Database::new().unwrap();
//! db.load_districts("DISTRICT,STATE,ANNUAL_RAINFALL_MM\nPune,Maharashtra,722\n").unwrap();
//!
//! let engine = Engine::new(db.clone());
//! let result = engine
//!     .compute(&CalculationRequest::for_district("pune").with_area(100.0).with_dwellers(4))
//!     .unwrap();
//! let id = db.save_calculation(&result.rounded(), None).unwrap();
//! assert_eq!(db.recent_calculations(10).unwrap()[0].id, id);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `rainfall_data` - Annual rainfall per district
//! - `monthly_rainfall` - Monthly normals per district
//! - `calculation_log` - Saved estimates

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// SQLite database holding the rainfall dataset and the calculation log.
///
/// Cheaply cloneable; clones share one connection behind a mutex, so a
/// single database can back an engine used from several threads.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods
    /// to populate it with CSV data.
    pub fn new() -> anyhow::Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Open (or create) a file-backed database and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let db = Self::from_connection(Connection::open(path)?)?;
        log::info!("[RWH] db: opened {}", path.display());
        Ok(db)
    }

    fn from_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection lock poisoned"))
    }
}
