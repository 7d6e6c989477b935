//! Refresh command: force a new location fix.

use anyhow::Result;
use chrono::Utc;
use serde_json::json;

use super::{CommandContext, build_engine};
use crate::constants::EXIT_FAILURE;
use crate::location::CancelToken;

pub fn handle_refresh_command(ctx: &CommandContext) -> Result<()> {
    let engine = build_engine(&ctx.config)?;

    log_block_start!(
        "Requesting location from {}",
        engine.location_source().name()
    );

    match engine.refresh(ctx.now.with_timezone(&Utc), &CancelToken::new()) {
        Ok(fix) => {
            if ctx.json {
                let value = json!({
                    "latitude": fix.latitude(),
                    "longitude": fix.longitude(),
                    "observed_at": fix.observed_at().to_rfc3339(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                log_decorated!("Location stored");
                log_end!();
            }
            Ok(())
        }
        Err(e) => {
            if ctx.json {
                println!("{}", json!({ "error": e.to_string() }));
            } else {
                log_error!("Location refresh failed: {e}");
                log_indented!("The cached location (if any) was left unchanged");
                log_end!();
            }
            std::process::exit(EXIT_FAILURE);
        }
    }
}

pub fn display_help() {
    log_version!();
    log_block_start!("refresh - Request a new location and store it");
    log_block_start!("Usage: autotheme refresh [OPTIONS]");
    log_block_start!("Description:");
    log_indented!("Ignores the refresh interval and asks the configured provider");
    log_indented!("for a fix right away. Exits with status 1 if none is obtained.");
    log_end!();
}
