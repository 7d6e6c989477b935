//! Help command implementation for autotheme.
//!
//! Shows command-specific help or general help based on the arguments provided.

use anyhow::Result;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("get") | Some("g") => super::get::display_help(),
        Some("status") | Some("s") => super::status::display_help(),
        Some("refresh") | Some("r") => super::refresh::display_help(),
        Some("clear") | Some("c") => super::clear::display_help(),
        Some("help") | Some("h") => display_help_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("get, g             Print \"dark\" or \"light\" for now (default)");
    log_indented!("status, s          Show the cached location and today's window");
    log_indented!("refresh, r         Request a new location and store it");
    log_indented!("clear, c           Forget the cached location");
    log_indented!("help, h [COMMAND]  Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'autotheme help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'autotheme --help' to see all options and general usage.");
    log_end!();
}

/// Display help for the help command itself
fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: autotheme help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("autotheme help");
    log_indented!("autotheme help status");
    log_end!();
}
