//! Command implementations for the RWH CLI.
//!
//! Provides subcommands for estimating a rainwater harvesting system,
//! browsing the district rainfall directory and reviewing saved estimates.

use clap::{Args, Subcommand};
use rwh_db::Database;
use rwh_engine::{Engine, EngineConfig, EngineError};
use std::path::PathBuf;

pub mod calculate;
pub mod districts;
pub mod history;

/// Data sources shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct DataOptions {
    /// District rainfall CSV (`DISTRICT,STATE,ANNUAL_RAINFALL_MM`); embedded data when omitted
    #[arg(long, global = true)]
    pub districts_csv: Option<PathBuf>,

    /// Monthly rainfall CSV (`DISTRICT,STATE,JAN,...,DEC`); embedded data when omitted
    #[arg(long, global = true)]
    pub monthly_csv: Option<PathBuf>,

    /// SQLite file for the calculation log only; in-memory when omitted
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// JSON file overriding engine parameters
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate harvest, storage, recharge pit and costs for a roof
    Calculate {
        /// District to take annual rainfall from
        #[arg(short, long)]
        district: String,

        /// Roof length in meters (used with --width)
        #[arg(long)]
        length: Option<f64>,

        /// Roof width in meters (used with --length)
        #[arg(long)]
        width: Option<f64>,

        /// Roof area in square meters; wins over length x width
        #[arg(short, long)]
        area: Option<f64>,

        /// Roof material, e.g. RCC, "TILE ROOF", "GREEN ROOF"
        #[arg(short, long)]
        roof_type: Option<String>,

        /// People in the household (default 1)
        #[arg(long, allow_negative_numbers = true)]
        dwellers: Option<i64>,

        /// Annual rainfall in mm; skips the district lookup
        #[arg(long)]
        rainfall: Option<f64>,

        /// Record the estimate in the calculation log
        #[arg(long)]
        save: bool,

        /// Label stored with a saved estimate
        #[arg(long, requires = "save")]
        label: Option<String>,

        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search districts by name or state
    Districts {
        /// Substring of a district or state name; lists the first districts when omitted
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long)]
        json: bool,
    },

    /// Show one district with its monthly rainfall
    District {
        name: String,

        #[arg(long)]
        json: bool,
    },

    /// Month-by-month harvest against household consumption
    Monthly {
        #[arg(short, long)]
        district: String,

        #[arg(short, long, default_value_t = 100.0)]
        area: f64,

        #[arg(short, long, default_value = "RCC")]
        roof_type: String,

        #[arg(short, long, default_value_t = 1)]
        people: u32,

        #[arg(long)]
        json: bool,
    },

    /// List saved estimates, newest first
    History {
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,

        /// Print the full stored record for one entry
        #[arg(long)]
        id: Option<i64>,

        #[arg(long)]
        json: bool,
    },
}

/// Rainfall dataset, calculation log and engine opened from [`DataOptions`].
pub struct Context {
    /// In-memory rainfall tables, rebuilt from the CSV sources on every run
    pub rainfall: Database,
    /// Calculation log; the `--db` file when given, otherwise `rainfall`
    pub log: Database,
    pub engine: Engine<Database>,
}

impl Context {
    pub fn open(options: &DataOptions) -> anyhow::Result<Self> {
        let rainfall = Database::new()?;
        match (&options.districts_csv, &options.monthly_csv) {
            (None, None) => rainfall.load_embedded()?,
            (districts, monthly) => {
                match districts {
                    Some(path) => rainfall.load_districts(&std::fs::read_to_string(path)?)?,
                    None => rainfall.load_districts(rwh_rainfall::district::CSV_OBJECT)?,
                }
                match monthly {
                    Some(path) => rainfall.load_monthly_rainfall(&std::fs::read_to_string(path)?)?,
                    None => rainfall.load_monthly_rainfall(rwh_rainfall::monthly::CSV_OBJECT)?,
                }
            }
        }

        let log = match &options.db {
            Some(path) => Database::open(path)?,
            None => rainfall.clone(),
        };

        let config = match &options.config {
            Some(path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig::default(),
        };

        let engine = Engine::with_config(rainfall.clone(), config);
        Ok(Self {
            rainfall,
            log,
            engine,
        })
    }
}

/// Turn an engine failure into the message a caller is allowed to see.
pub(crate) fn user_error(err: EngineError) -> anyhow::Error {
    log::debug!("engine error ({}): {:?}", err.http_status(), err);
    anyhow::anyhow!(err.public_message())
}

pub fn run(options: &DataOptions, command: Command) -> anyhow::Result<()> {
    let ctx = Context::open(options)?;
    let output = match command {
        Command::Calculate {
            district,
            length,
            width,
            area,
            roof_type,
            dwellers,
            rainfall,
            save,
            label,
            json,
        } => {
            let request = calculate::build_request(
                &district,
                length,
                width,
                area,
                roof_type.as_deref(),
                dwellers,
                rainfall,
            );
            let save_as = save.then_some(label.as_deref());
            calculate::run_calculate(&ctx, &request, save_as, json)?
        }
        Command::Districts { search, json } => districts::run_search(&ctx, &search, json)?,
        Command::District { name, json } => districts::run_info(&ctx, &name, json)?,
        Command::Monthly {
            district,
            area,
            roof_type,
            people,
            json,
        } => districts::run_monthly(&ctx, &district, area, &roof_type, people, json)?,
        Command::History { limit, id, json } => match id {
            Some(id) => history::run_show(&ctx, id, json)?,
            None => history::run_history(&ctx, limit, json)?,
        },
    };
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn embedded_data_is_loaded_by_default() {
        let ctx = Context::open(&DataOptions::default()).unwrap();
        assert_eq!(ctx.rainfall.count_districts().unwrap(), 34);
    }

    #[test]
    fn districts_csv_replaces_embedded_districts() {
        let csv = temp_with("DISTRICT,STATE,ANNUAL_RAINFALL_MM\nLeh,Ladakh,102\n");
        let options = DataOptions {
            districts_csv: Some(csv.path().to_path_buf()),
            ..DataOptions::default()
        };
        let ctx = Context::open(&options).unwrap();

        assert_eq!(ctx.rainfall.count_districts().unwrap(), 1);
        assert!(ctx.rainfall.query_monthly_series("Pune", None).unwrap().is_some());
    }

    #[test]
    fn districts_csv_replaces_embedded_districts_with_file_db() {
        let db = NamedTempFile::new().unwrap();
        let first = DataOptions {
            db: Some(db.path().to_path_buf()),
            ..DataOptions::default()
        };
        let ctx = Context::open(&first).unwrap();
        let result = ctx
            .engine
            .compute(&rwh_engine::CalculationRequest::for_district("Pune").with_area(100.0))
            .unwrap();
        ctx.log.save_calculation(&result, None).unwrap();
        drop(ctx);

        let csv = temp_with("DISTRICT,STATE,ANNUAL_RAINFALL_MM\nPune,MH,800\n");
        let second = DataOptions {
            districts_csv: Some(csv.path().to_path_buf()),
            ..first
        };
        let ctx = Context::open(&second).unwrap();

        assert_eq!(ctx.rainfall.count_districts().unwrap(), 1);
        let pune = ctx
            .engine
            .compute(&rwh_engine::CalculationRequest::for_district("Pune").with_area(100.0))
            .unwrap();
        assert_eq!(pune.state, "MH");
        assert_eq!(pune.annual_rainfall_mm, 800.0);

        // The log file keeps earlier runs but no rainfall rows
        assert_eq!(ctx.log.recent_calculations(10).unwrap().len(), 1);
        assert_eq!(ctx.log.count_districts().unwrap(), 0);
    }

    #[test]
    fn config_file_overrides_engine_parameters() {
        let config = temp_with(r#"{"harvest": {"per_capita_lpd": 100.0}}"#);
        let options = DataOptions {
            config: Some(config.path().to_path_buf()),
            ..DataOptions::default()
        };
        let ctx = Context::open(&options).unwrap();

        assert_eq!(ctx.engine.config().harvest.per_capita_lpd, 100.0);
        assert_eq!(ctx.engine.config().sizing.min_tank_liters, 2000.0);
    }

    #[test]
    fn internal_errors_are_masked() {
        let err = user_error(EngineError::Internal("disk on fire".into()));
        assert_eq!(err.to_string(), "Internal server error. Please try again later.");
    }
}
