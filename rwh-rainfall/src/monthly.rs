use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parse_millimeters;

/// Embedded CSV data with monthly rainfall normals per district.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/monthly_rainfall.csv");

/// Calendar month, January first.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Twelve monthly rainfall values in millimeters, ordered Jan..Dec.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct MonthlySeries([f64; 12]);

impl MonthlySeries {
    pub fn new(values: [f64; 12]) -> Self {
        MonthlySeries(values)
    }

    pub fn values(&self) -> &[f64; 12] {
        &self.0
    }

    pub fn get(&self, month: Month) -> f64 {
        self.0[month.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Month, f64)> + '_ {
        Month::ALL.iter().map(move |m| (*m, self.get(*m)))
    }

    /// The wettest month and its rainfall. Ties go to the earlier month.
    pub fn peak(&self) -> (Month, f64) {
        let mut peak = (Month::Jan, self.0[0]);
        for (month, value) in self.iter().skip(1) {
            if value > peak.1 {
                peak = (month, value);
            }
        }
        peak
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

/// A monthly series row as it appears in the monthly rainfall dataset.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DistrictMonthlyRainfall {
    pub district_name: String,
    pub state: String,
    pub series: MonthlySeries,
}

impl DistrictMonthlyRainfall {
    /// Parse the embedded monthly fixture.
    pub fn get_monthly_vector() -> Result<Vec<DistrictMonthlyRainfall>, csv::Error> {
        DistrictMonthlyRainfall::parse_monthly_csv(CSV_OBJECT)
    }

    /// Parse a CSV string of monthly rainfall.
    ///
    /// Expected CSV columns: district, state, jan, feb, ..., dec. Missing
    /// month cells are read as 0 mm.
    pub fn parse_monthly_csv(csv_object: &str) -> Result<Vec<DistrictMonthlyRainfall>, csv::Error> {
        let mut rows: Vec<DistrictMonthlyRainfall> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let district_name = record.get(0).unwrap_or("").trim();
            if district_name.is_empty() {
                continue;
            }
            let state = record.get(1).unwrap_or("").trim();
            let mut values = [0.0; 12];
            for (i, value) in values.iter_mut().enumerate() {
                *value = parse_millimeters(record.get(i + 2).unwrap_or(""));
            }
            rows.push(DistrictMonthlyRainfall {
                district_name: district_name.to_string(),
                state: state.to_string(),
                series: MonthlySeries::new(values),
            });
        }
        log::debug!("parsed {} monthly rainfall rows", rows.len());
        Ok(rows)
    }
}
