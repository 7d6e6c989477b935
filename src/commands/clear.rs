//! Clear command: forget the cached location.

use anyhow::{Context, Result};
use serde_json::json;

use super::{CommandContext, build_engine};

pub fn handle_clear_command(ctx: &CommandContext) -> Result<()> {
    let engine = build_engine(&ctx.config)?;
    engine
        .forget()
        .context("Failed to clear the cached location")?;

    if ctx.json {
        println!("{}", json!({ "cleared": engine.policy().cache_key }));
    } else {
        log_block_start!("Cached location cleared");
        log_end!();
    }
    Ok(())
}

pub fn display_help() {
    log_version!();
    log_block_start!("clear - Forget the cached location");
    log_block_start!("Usage: autotheme clear [OPTIONS]");
    log_block_start!("Description:");
    log_indented!("The next decision behaves like a first run and requests a fix.");
    log_end!();
}
