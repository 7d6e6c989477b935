//! Command-line entry point.
//!
//! Parses arguments, then dispatches to the command handlers in
//! [`autotheme::commands`]. Every command prepares its context the same way:
//! apply global flags, pick the time source, load the configuration.

use anyhow::Result;

use autotheme::args::{self, CliAction, ParsedArgs};
use autotheme::commands::{self, CommandContext};
use autotheme::constants::EXIT_FAILURE;
use autotheme::{log_end, log_error, log_indented, log_pipe};

fn main() -> Result<()> {
    let parsed_args = ParsedArgs::from_env();

    match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::HelpCommand { command } => commands::help::run_help_command(command.as_deref()),
        CliAction::Get { options } => run(&options, commands::get::handle_get_command),
        CliAction::Status { options } => run(&options, commands::status::handle_status_command),
        CliAction::Refresh { options } => run(&options, commands::refresh::handle_refresh_command),
        CliAction::Clear { options } => run(&options, commands::clear::handle_clear_command),
    }
}

/// Prepare the command context and run a handler, reporting failures in the
/// decorated log style.
fn run(
    options: &args::GlobalOptions,
    handler: fn(&CommandContext) -> Result<()>,
) -> Result<()> {
    let result = commands::prepare(options).and_then(|ctx| handler(&ctx));

    if let Err(e) = result {
        if options.json {
            eprintln!("{e:#}");
        } else {
            log_pipe!();
            log_error!("{e}");
            for cause in e.chain().skip(1) {
                log_indented!("{cause}");
            }
            log_end!();
        }
        std::process::exit(EXIT_FAILURE);
    }
    Ok(())
}
