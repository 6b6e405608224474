//! `calculate` subcommand: run one estimate and print or save it.

use crate::{user_error, Context};
use rwh_engine::{CalculationRequest, CalculationResult};
use rwh_utils::format::{grouped, trimmed};
use std::fmt::Write;

/// Assemble a request from command-line flags.
pub fn build_request(
    district: &str,
    length: Option<f64>,
    width: Option<f64>,
    area: Option<f64>,
    roof_type: Option<&str>,
    dwellers: Option<i64>,
    rainfall: Option<f64>,
) -> CalculationRequest {
    CalculationRequest {
        district_name: Some(district.to_string()),
        length,
        width,
        roof_area_sqm: area,
        roof_type: roof_type.map(str::to_string),
        number_of_dwellers: dwellers,
        annual_rainfall_mm: rainfall,
    }
}

/// Compute the estimate and render it. `save_as` is `Some(label)` when the
/// rounded record should go to the calculation log.
pub fn run_calculate(
    ctx: &Context,
    request: &CalculationRequest,
    save_as: Option<Option<&str>>,
    json: bool,
) -> anyhow::Result<String> {
    let result = ctx.engine.compute(request).map_err(user_error)?.rounded();

    let saved = match save_as {
        Some(label) => Some(ctx.log.save_calculation(&result, label)?),
        None => None,
    };

    if json {
        return Ok(serde_json::to_string_pretty(&result)?);
    }
    let mut out = render(&result)?;
    if let Some(id) = saved {
        write!(out, "\nSaved as calculation #{}", id)?;
    }
    Ok(out)
}

/// Human-readable report of a (rounded) result.
pub fn render(result: &CalculationResult) -> anyhow::Result<String> {
    let mut out = String::new();
    let costs = &result.costs;

    writeln!(out, "{} ({})", result.district_name, result.state)?;
    writeln!(
        out,
        "  Rainfall:        {} mm/yr ({})",
        grouped(result.annual_rainfall_mm, 0),
        result.rainfall_source
    )?;
    writeln!(
        out,
        "  Roof:            {} m² {} (runoff {})",
        trimmed(result.roof_area_sqm, 2),
        result.roof_type,
        trimmed(result.runoff_coefficient, 2)
    )?;
    writeln!(out, "  Household:       {} people", result.number_of_dwellers)?;
    writeln!(out)?;

    writeln!(
        out,
        "  Harvest:         {} L/yr ({} gal)",
        grouped(result.water_harvested_liters, 0),
        grouped(result.water_harvested_gallons, 0)
    )?;
    writeln!(
        out,
        "  Demand:          {} L/yr ({} L/day)",
        grouped(result.annual_requirement_liters, 0),
        grouped(result.daily_requirement_liters, 0)
    )?;
    writeln!(out, "  Efficiency:      {}%", trimmed(result.efficiency_percent, 1))?;
    writeln!(out)?;

    write!(
        out,
        "  Storage tank:    {} L ({} m³)",
        grouped(result.tank_volume_liters, 0),
        trimmed(result.tank_volume_m3, 1)
    )?;
    match (result.peak_month, result.peak_month_rainfall_mm) {
        (Some(month), Some(mm)) => {
            writeln!(out, ", sized on {} ({} mm)", month, trimmed(mm, 1))?;
        }
        _ => {
            writeln!(out, ", sized on annual harvest")?;
        }
    }
    writeln!(
        out,
        "  First flush:     {} L",
        grouped(result.first_flush_liters, 0)
    )?;
    writeln!(
        out,
        "  Recharge pit:    {} L, {} m diameter x {} m depth",
        grouped(result.required_pit_volume_liters, 0),
        trimmed(result.pit_diameter_m, 1),
        trimmed(result.pit_depth_m, 1)
    )?;
    writeln!(out)?;

    writeln!(out, "  Install cost:    ₹{}", grouped(costs.total_install_cost, 0))?;
    writeln!(out, "  Net savings:     ₹{}/yr", grouped(costs.net_annual_savings, 0))?;
    match costs.payback_years {
        Some(years) => {
            writeln!(out, "  Payback:         {} years", trimmed(years, 1))?;
        }
        None => {
            writeln!(out, "  Payback:         never")?;
        }
    }
    writeln!(out, "  ROI:             {}%", trimmed(costs.roi_percentage, 1))?;
    writeln!(out)?;

    writeln!(out, "{}", result.recommendation)?;
    for line in &result.enhanced_recommendations {
        writeln!(out, "  {}", line)?;
    }
    Ok(out.trim_end().to_string())
}
