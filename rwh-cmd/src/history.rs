//! `history` subcommand: review the calculation log.

use crate::calculate;
use crate::Context;
use rwh_utils::format::{grouped, trimmed};
use std::fmt::Write;

pub fn run_history(ctx: &Context, limit: usize, json: bool) -> anyhow::Result<String> {
    let entries = ctx.log.recent_calculations(limit)?;
    if json {
        return Ok(serde_json::to_string_pretty(&entries)?);
    }
    if entries.is_empty() {
        return Ok("No saved calculations".to_string());
    }

    let mut out = String::new();
    for e in &entries {
        let efficiency = e
            .efficiency_percent
            .map(|v| format!("{}%", trimmed(v, 1)))
            .unwrap_or_else(|| "-".to_string());
        write!(
            out,
            "#{:<4} {}  {} ({})  {} m² {}  {} L/yr  {}",
            e.id,
            e.created_at,
            e.district_name,
            e.state,
            trimmed(e.roof_area_sqm, 2),
            e.roof_type,
            grouped(e.water_harvested_liters, 0),
            efficiency
        )?;
        if let Some(label) = &e.client_label {
            write!(out, "  [{}]", label)?;
        }
        out.push('\n');
    }
    Ok(out.trim_end().to_string())
}

pub fn run_show(ctx: &Context, id: i64, json: bool) -> anyhow::Result<String> {
    let result = ctx
        .log
        .load_calculation(id)?
        .ok_or_else(|| anyhow::anyhow!("No saved calculation #{}", id))?;
    if json {
        return Ok(serde_json::to_string_pretty(&result)?);
    }
    calculate::render(&result)
}
