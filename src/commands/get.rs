//! Get command: decide the theme for now.

use anyhow::Result;
use serde_json::json;

use super::{CommandContext, build_engine};
use crate::constants::EXIT_NO_DATA;
use crate::engine::ThemeDecision;

/// Run a full decision (refreshing the location when needed) and print the theme.
pub fn handle_get_command(ctx: &CommandContext) -> Result<()> {
    let engine = build_engine(&ctx.config)?;

    log_block_start!("Deciding theme for {}", ctx.now.format("%Y-%m-%d %H:%M:%S"));
    let decision = engine.should_use_dark_theme(&ctx.now);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&decision_json(&decision))?);
    } else {
        log_decorated!("Theme: {}", decision.theme_name());
        log_end!();
        println!("{}", decision.theme_name());
        if let Some(no_data) = &decision.no_data {
            eprintln!("autotheme: {no_data}");
        }
    }

    if let Some(code) = exit_code(&decision) {
        std::process::exit(code);
    }
    Ok(())
}

/// Non-zero status for a light answer that was a fallback rather than daylight.
pub fn exit_code(decision: &ThemeDecision) -> Option<i32> {
    decision.no_data.as_ref().map(|_| EXIT_NO_DATA)
}

/// JSON rendering shared by `get` and `status`.
pub fn decision_json(decision: &ThemeDecision) -> serde_json::Value {
    json!({
        "theme": decision.theme_name(),
        "dark": decision.is_dark(),
        "origin": decision.origin.as_str(),
        "location": decision.fix.map(|fix| json!({
            "latitude": fix.latitude(),
            "longitude": fix.longitude(),
            "observed_at": fix.observed_at().to_rfc3339(),
        })),
        "sunrise": decision.window.map(|w| w.sunrise().to_rfc3339()),
        "sunset": decision.window.map(|w| w.sunset().to_rfc3339()),
        "corrected": decision.window.map(|w| w.was_corrected()),
        "no_data": decision.no_data.as_ref().map(|n| n.to_string()),
    })
}

pub fn display_help() {
    log_version!();
    log_block_start!("get - Print the theme for the current moment");
    log_block_start!("Usage: autotheme [get] [OPTIONS]");
    log_block_start!("Description:");
    log_indented!("Uses the cached location when it is fresh, otherwise asks the");
    log_indented!("location provider for a new fix and stores it. Prints \"dark\"");
    log_indented!("between sunset and sunrise and \"light\" otherwise. Without any");
    log_indented!("location at all the answer is \"light\" and the exit status");
    log_indented!("is 2, so scripts can tell the fallback from real daylight.");
    log_block_start!("Examples:");
    log_indented!("autotheme");
    log_indented!("autotheme get --json");
    log_indented!("autotheme get --at \"2024-06-21 22:00:00\"");
    log_end!();
}
