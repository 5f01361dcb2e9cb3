//! Command-line interface handling for the player client.
//!
//! The only required input is the base server address; everything else
//! overrides a value from the optional configuration file.

use clap::{value_parser, Arg, ArgAction, Command};
use std::ffi::OsString;
use std::path::PathBuf;

/// Reasons the command line cannot be turned into [`CliArgs`].
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// No address, or an empty one. Carries whatever was given.
    #[error("Cannot connect to '{0}'")]
    MissingAddress(String),

    #[error(transparent)]
    Clap(#[from] clap::Error),
}

/// Command line arguments parsed from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Base WebSocket address of the game server, e.g. `ws://localhost:8080`
    pub address: String,
    /// Optional configuration file
    pub config_path: Option<PathBuf>,
    /// Optional override for the username sent to the server
    pub username: Option<String>,
    /// Connect as a spectator instead of a player
    pub spectator: bool,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
    /// Optional override for the pause after each reply, in milliseconds
    pub pace_ms: Option<u64>,
}

fn command() -> Command {
    Command::new("circle_walker")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scripted player client that walks a fixed routine on the game server")
        .arg(
            Arg::new("address")
                .value_name("ADDRESS")
                .help("Base server address (e.g., ws://localhost:8080)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("username")
                .short('u')
                .long("username")
                .value_name("NAME")
                .help("Username announced to the server"),
        )
        .arg(
            Arg::new("spectator")
                .long("spectator")
                .help("Join as a spectator and send no actions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .help("Output logs in JSON format")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pace-ms")
                .long("pace-ms")
                .value_name("MS")
                .help("Pause after each reply in milliseconds")
                .value_parser(value_parser!(u64)),
        )
}

impl CliArgs {
    /// Parses the process arguments.
    ///
    /// A missing or empty address prints the problem and the usage line to
    /// stderr and exits with status 1. Help, version and malformed flags are
    /// reported by clap itself.
    pub fn parse() -> Self {
        match Self::try_parse_from(std::env::args_os()) {
            Ok(args) => args,
            Err(UsageError::Clap(err)) => err.exit(),
            Err(err @ UsageError::MissingAddress(_)) => {
                eprintln!("❌ {err}");
                eprintln!("{}", usage());
                std::process::exit(1);
            }
        }
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;

        let address = matches.get_one::<String>("address").cloned().unwrap_or_default();
        if address.is_empty() {
            return Err(UsageError::MissingAddress(address));
        }

        Ok(Self {
            address,
            config_path: matches.get_one::<String>("config").map(PathBuf::from),
            username: matches.get_one::<String>("username").cloned(),
            spectator: matches.get_flag("spectator"),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            pace_ms: matches.get_one::<u64>("pace-ms").copied(),
        })
    }
}

/// One-line usage summary.
pub fn usage() -> String {
    command().render_usage().to_string()
}
