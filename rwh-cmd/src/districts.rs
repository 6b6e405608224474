//! District directory subcommands: `districts`, `district` and `monthly`.

use crate::{user_error, Context};
use rwh_utils::format::{grouped, trimmed};
use std::fmt::Write;

pub fn run_search(ctx: &Context, term: &str, json: bool) -> anyhow::Result<String> {
    let rows = ctx.rainfall.search_districts(term)?;
    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }
    if rows.is_empty() {
        return Ok(format!("No districts match \"{}\"", term.trim()));
    }

    let width = rows.iter().map(|d| d.district_name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for d in &rows {
        writeln!(
            out,
            "{:<width$}  {:<18}  {:>6} mm",
            d.district_name,
            d.state,
            grouped(d.annual_rainfall_mm, 0),
            width = width
        )?;
    }
    Ok(out.trim_end().to_string())
}

pub fn run_info(ctx: &Context, name: &str, json: bool) -> anyhow::Result<String> {
    let detail = ctx
        .rainfall
        .district_info(name)?
        .ok_or_else(|| anyhow::anyhow!("District \"{}\" not found", name.trim()))?;
    if json {
        return Ok(serde_json::to_string_pretty(&detail)?);
    }

    let mut out = String::new();
    writeln!(out, "{} ({})", detail.district_name, detail.state)?;
    writeln!(
        out,
        "  Annual rainfall: {} mm",
        grouped(detail.annual_rainfall_mm, 0)
    )?;
    match &detail.monthly {
        Some(series) => {
            for (month, mm) in series.iter() {
                writeln!(out, "  {}  {:>6} mm", month, trimmed(mm, 1))?;
            }
            let (peak, peak_mm) = series.peak();
            writeln!(out, "  Wettest month: {} ({} mm)", peak, trimmed(peak_mm, 1))?;
        }
        None => {
            writeln!(out, "  No monthly rainfall data")?;
        }
    }
    Ok(out.trim_end().to_string())
}

pub fn run_monthly(
    ctx: &Context,
    district: &str,
    area: f64,
    roof_type: &str,
    people: u32,
    json: bool,
) -> anyhow::Result<String> {
    let profile = ctx
        .engine
        .monthly_profile(district, area, roof_type, people)
        .map_err(user_error)?;
    if json {
        return Ok(serde_json::to_string_pretty(&profile)?);
    }

    let mut out = String::new();
    writeln!(
        out,
        "{} ({}): {} m² {} (runoff {}), {} {}",
        profile.district_name,
        profile.state,
        trimmed(profile.roof_area_sqm, 2),
        profile.roof_type,
        trimmed(profile.runoff_coefficient, 2),
        profile.people,
        if profile.people == 1 { "person" } else { "people" }
    )?;
    writeln!(
        out,
        "  Month  Rain mm   Harvest L   Consumption L     Balance L"
    )?;
    for m in &profile.months {
        writeln!(
            out,
            "  {:<5}  {:>7}  {:>10}  {:>14}  {:>12}",
            m.month,
            trimmed(m.rainfall_mm, 1),
            grouped(m.harvest_liters, 0),
            grouped(m.consumption_liters, 0),
            grouped(m.surplus_liters(), 0)
        )?;
    }
    writeln!(
        out,
        "  Total           {:>10}  {:>14}",
        grouped(profile.total_harvest_liters(), 0),
        grouped(profile.total_consumption_liters(), 0)
    )?;

    let deficits = profile.deficit_months();
    if deficits.is_empty() {
        writeln!(out, "  Harvest covers consumption every month")?;
    } else {
        let names: Vec<String> = deficits.iter().map(|m| m.to_string()).collect();
        writeln!(out, "  Shortfall in: {}", names.join(", "))?;
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataOptions;

    fn context() -> Context {
        Context::open(&DataOptions::default()).unwrap()
    }

    #[test]
    fn search_lists_matching_districts() {
        let out = run_search(&context(), "kerala", false).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Ernakulam"));
        assert!(lines[1].starts_with("Thiruvananthapuram"));
    }

    #[test]
    fn search_without_matches_says_so() {
        let out = run_search(&context(), "zzz", false).unwrap();
        assert_eq!(out, "No districts match \"zzz\"");
    }

    #[test]
    fn search_json_is_an_array() {
        let out = run_search(&context(), "pune", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["annual_rainfall_mm"], 722.0);
    }

    #[test]
    fn info_shows_monthly_table() {
        let out = run_info(&context(), "PUNE", false).unwrap();
        assert!(out.starts_with("Pune (Maharashtra)"));
        assert!(out.contains("Jul   188.6 mm"));
        assert!(out.contains("Wettest month: Jul (188.6 mm)"));
    }

    #[test]
    fn info_for_unknown_district_fails() {
        let err = run_info(&context(), " Atlantis ", false).unwrap_err();
        assert_eq!(err.to_string(), "District \"Atlantis\" not found");
    }

    #[test]
    fn monthly_profile_lists_twelve_months() {
        let out = run_monthly(&context(), "Pune", 100.0, "RCC", 4, false).unwrap();
        let rows = out.lines().filter(|l| l.starts_with("  ") && !l.starts_with("  Month")).count();
        // 12 months, totals, shortfall line
        assert_eq!(rows, 14);
        assert!(out.contains("Shortfall in: Jan"));
    }

    #[test]
    fn monthly_profile_needs_monthly_data() {
        let err = run_monthly(&context(), "Patna", 100.0, "RCC", 1, false).unwrap_err();
        assert_eq!(err.to_string(), "No monthly rainfall data for Patna (Bihar)");
    }
}
