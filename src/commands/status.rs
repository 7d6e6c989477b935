//! Status command - show the cached location and the decision it implies.
//!
//! Never contacts the location provider: a stale or missing entry is reported as
//! such rather than refreshed.

use anyhow::Result;
use chrono::{Local, Utc};
use serde_json::json;

use super::get::decision_json;
use super::{CommandContext, build_engine};
use crate::engine::FixOrigin;
use crate::geo::format_age;

pub fn handle_status_command(ctx: &CommandContext) -> Result<()> {
    let engine = build_engine(&ctx.config)?;
    let decision = engine.decide_from_cache(&ctx.now);
    let freshness = engine.policy().freshness;

    if ctx.json {
        let mut value = decision_json(&decision);
        value["refresh_interval_hours"] = json!(freshness.num_hours());
        value["evaluated_at"] = json!(ctx.now.to_rfc3339());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let (Some(fix), Some(window)) = (decision.fix, decision.window) else {
        log_block_start!("No cached location");
        log_indented!("Run 'autotheme refresh' or 'autotheme get' to obtain one");
        log_end!();
        return Ok(());
    };

    let age = fix.age(ctx.now.with_timezone(&Utc));
    log_block_start!("Cached location: {}", fix.coordinates());
    log_indented!(
        "Observed: {} ({} ago)",
        fix.observed_at()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S"),
        format_age(age)
    );
    match decision.origin {
        FixOrigin::Stale => log_indented!(
            "Older than the {}h refresh interval; the next decision will refresh it",
            freshness.num_hours()
        ),
        _ => log_indented!(
            "Fresh for another {}",
            format_age(freshness - age)
        ),
    }

    log_block_start!("Solar window for {}", ctx.now.format("%Y-%m-%d"));
    log_indented!("Sunrise: {}", window.sunrise_in(&Local).format("%H:%M:%S"));
    log_indented!("Sunset:  {}", window.sunset_in(&Local).format("%H:%M:%S"));
    if window.was_corrected() {
        log_indented!("Sunrise moved to the previous day (sunrise followed sunset)");
    }

    log_block_start!("Theme: {}", decision.theme_name());
    log_end!();
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("status - Show the cached location and today's solar window");
    log_block_start!("Usage: autotheme status [OPTIONS]");
    log_block_start!("Description:");
    log_indented!("Reads the cache only. The location provider is never contacted,");
    log_indented!("so this is safe to run from status bars and scripts.");
    log_block_start!("Options:");
    log_indented!("-j, --json  Print the status as JSON");
    log_end!();
}
