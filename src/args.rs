//! Command-line argument parsing and processing.
//!
//! Supports one optional subcommand plus global flags that may appear anywhere:
//!
//! ```text
//! autotheme [OPTIONS] [get | status | refresh | clear | help [COMMAND]]
//! ```

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    /// Machine-readable output; disables decorated logging.
    pub json: bool,
    /// Evaluate at this local time ("YYYY-MM-DD HH:MM:SS") instead of now.
    pub at: Option<String>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Decide the theme now (default when no command is given)
    Get { options: GlobalOptions },
    /// Show the cached location and the decision it implies, without refreshing
    Status { options: GlobalOptions },
    /// Force a location refresh
    Refresh { options: GlobalOptions },
    /// Forget the cached location
    Clear { options: GlobalOptions },
    /// Detailed help, optionally for one command
    HelpCommand { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or malformed arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first element is the program name and is skipped. `--version` takes
    /// precedence over `--help`, which takes precedence over everything else.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        if args_vec
            .iter()
            .any(|arg| arg == "--version" || arg == "-V" || arg == "-v")
        {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if args_vec.iter().any(|arg| arg == "--help" || arg == "-h") {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let mut options = GlobalOptions::default();
        let mut positionals: Vec<String> = Vec::new();
        let mut idx = 0;

        while idx < args_vec.len() {
            let arg = args_vec[idx].as_str();
            match arg {
                "--debug" | "-d" => options.debug_enabled = true,
                "--json" | "-j" => options.json = true,
                "--config" | "-c" | "--at" | "-a" => {
                    let Some(value) = args_vec.get(idx + 1) else {
                        log_warning_standalone!("Missing value for {}", arg);
                        return ParsedArgs {
                            action: CliAction::ShowHelpDueToError,
                        };
                    };
                    if matches!(arg, "--config" | "-c") {
                        options.config_dir = Some(value.clone());
                    } else {
                        options.at = Some(value.clone());
                    }
                    idx += 1;
                }
                _ if arg.starts_with('-') => {
                    log_warning_standalone!("Unknown option: {}", arg);
                    return ParsedArgs {
                        action: CliAction::ShowHelpDueToError,
                    };
                }
                _ => positionals.push(arg.to_string()),
            }
            idx += 1;
        }

        let command = positionals.first().map(String::as_str);
        let extra = positionals.get(1).cloned();

        let action = match command {
            Some("help") | Some("h") => {
                if positionals.len() > 2 {
                    log_warning_standalone!("'help' accepts at most one command");
                    CliAction::ShowHelpDueToError
                } else {
                    CliAction::HelpCommand { command: extra }
                }
            }
            _ if extra.is_some() => {
                log_warning_standalone!(
                    "Unexpected argument: {}",
                    extra.unwrap_or_default()
                );
                CliAction::ShowHelpDueToError
            }
            None | Some("get") | Some("g") => CliAction::Get { options },
            Some("status") | Some("s") => CliAction::Status { options },
            Some("refresh") | Some("r") => CliAction::Refresh { options },
            Some("clear") | Some("c") => CliAction::Clear { options },
            Some(unknown) => {
                log_warning_standalone!("Unknown command: {}", unknown);
                CliAction::ShowHelpDueToError
            }
        };

        ParsedArgs { action }
    }

    /// Parse from the process arguments.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Display version information.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Display general usage.
pub fn display_help() {
    log_version!();
    log_block_start!("Usage: autotheme [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-a, --at <TIME>        Decide at a local time (\"YYYY-MM-DD HH:MM:SS\")");
    log_indented!("-c, --config <DIR>     Use a custom configuration directory");
    log_indented!("-d, --debug            Show detailed solar and location output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-j, --json             Print machine-readable JSON");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("get, g                 Print \"dark\" or \"light\" for now (default)");
    log_indented!("status, s              Show the cached location and today's window");
    log_indented!("refresh, r             Request a new location and store it");
    log_indented!("clear, c               Forget the cached location");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> GlobalOptions {
        GlobalOptions::default()
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = ParsedArgs::parse(vec!["autotheme"]);
        assert_eq!(parsed.action, CliAction::Get { options: options() });
    }

    #[test]
    fn test_parse_commands_and_aliases() {
        let cases = [
            ("get", CliAction::Get { options: options() }),
            ("g", CliAction::Get { options: options() }),
            ("status", CliAction::Status { options: options() }),
            ("s", CliAction::Status { options: options() }),
            ("refresh", CliAction::Refresh { options: options() }),
            ("r", CliAction::Refresh { options: options() }),
            ("clear", CliAction::Clear { options: options() }),
            ("c", CliAction::Clear { options: options() }),
        ];
        for (command, expected) in cases {
            assert_eq!(ParsedArgs::parse(vec!["autotheme", command]).action, expected);
        }
    }

    #[test]
    fn test_parse_global_flags_anywhere() {
        let parsed = ParsedArgs::parse(vec![
            "autotheme",
            "-d",
            "status",
            "--json",
            "--config",
            "/tmp/at",
            "-a",
            "2024-06-21 12:00:00",
        ]);
        assert_eq!(
            parsed.action,
            CliAction::Status {
                options: GlobalOptions {
                    debug_enabled: true,
                    config_dir: Some("/tmp/at".to_string()),
                    json: true,
                    at: Some("2024-06-21 12:00:00".to_string()),
                }
            }
        );
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(
            ParsedArgs::parse(vec!["autotheme", "--help"]).action,
            CliAction::ShowHelp
        );
        assert_eq!(
            ParsedArgs::parse(vec!["autotheme", "-h"]).action,
            CliAction::ShowHelp
        );
        assert_eq!(
            ParsedArgs::parse(vec!["autotheme", "-V"]).action,
            CliAction::ShowVersion
        );
    }

    #[test]
    fn test_version_takes_precedence() {
        let parsed = ParsedArgs::parse(vec!["autotheme", "--help", "--version", "get"]);
        assert_eq!(parsed.action, CliAction::ShowVersion);
    }

    #[test]
    fn test_help_command_topic() {
        assert_eq!(
            ParsedArgs::parse(vec!["autotheme", "help"]).action,
            CliAction::HelpCommand { command: None }
        );
        assert_eq!(
            ParsedArgs::parse(vec!["autotheme", "help", "status"]).action,
            CliAction::HelpCommand {
                command: Some("status".to_string())
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        for args in [
            vec!["autotheme", "--unknown"],
            vec!["autotheme", "status", "extra"],
            vec!["autotheme", "launch"],
            vec!["autotheme", "--config"],
            vec!["autotheme", "get", "--at"],
            vec!["autotheme", "help", "get", "status"],
        ] {
            assert_eq!(
                ParsedArgs::parse(args).action,
                CliAction::ShowHelpDueToError
            );
        }
    }
}
