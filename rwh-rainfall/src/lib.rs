pub mod district;
pub mod monthly;
pub mod roof;

pub use district::DistrictRainfall;
pub use monthly::{Month, MonthlySeries};
pub use roof::{RoofMaterial, RunoffTable};

/// Parse a rainfall figure from a CSV cell.
///
/// Blank cells and the usual "missing" markers are read as zero, the same
/// way the reservoir capacity fixture was read.
pub(crate) fn parse_millimeters(ess: &str) -> f64 {
    let ess_lowered = ess.trim().to_lowercase();
    match ess_lowered.as_str() {
        "" | "null" | "n/a" | "na" | "---" => 0.0,
        s => s.parse::<f64>().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_millimeters;

    #[test]
    fn parses_numbers_and_missing_markers() {
        assert_eq!(parse_millimeters(" 722 "), 722.0);
        assert_eq!(parse_millimeters("138.2"), 138.2);
        assert_eq!(parse_millimeters("NA"), 0.0);
        assert_eq!(parse_millimeters(""), 0.0);
        assert_eq!(parse_millimeters("---"), 0.0);
        assert_eq!(parse_millimeters("abc"), 0.0);
    }
}
