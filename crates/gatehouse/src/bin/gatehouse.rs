//! Gatehouse - Entry point
//!
//! Evaluates a single login attempt and prints the outcome as one JSON line.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{debug, error};

use gatehouse::config::{ConfigLoader, GatehouseConfig};
use gatehouse::core::LoginOutcome;
use gatehouse::telemetry::{init_telemetry, LogWriter};
use gatehouse::LoginService;

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "GATEHOUSE_CONFIG";

/// Configuration file read when `GATEHOUSE_CONFIG` is unset.
const DEFAULT_CONFIG_FILE: &str = "gatehouse.toml";

/// Prefix for `PREFIX__SECTION__KEY` overrides.
const ENV_PREFIX: &str = "GATEHOUSE";

/// Exit code for a granted login.
const EXIT_GRANTED: u8 = 0;
/// Exit code for a denied login.
const EXIT_DENIED: u8 = 1;
/// Exit code for usage and runtime errors.
const EXIT_ERROR: u8 = 2;

/// Command-line arguments.
struct Args {
    identity: String,
    secret: String,
}

enum Command {
    Login(Args),
    Help,
    Version,
}

impl Command {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut positional = Vec::new();
        let mut options_done = false;

        // Options are only recognised before `--` and the first positional
        for arg in args {
            if options_done || !positional.is_empty() {
                positional.push(arg);
                continue;
            }
            match arg.as_str() {
                "--" => options_done = true,
                "--help" | "-h" => return Ok(Self::Help),
                "--version" | "-v" => return Ok(Self::Version),
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(format!("Unknown argument: {other}"));
                }
                _ => positional.push(arg),
            }
        }

        match <[String; 2]>::try_from(positional) {
            Ok([identity, secret]) => Ok(Self::Login(Args { identity, secret })),
            Err(positional) => Err(format!(
                "Expected <IDENTITY> <SECRET>, got {} argument(s)",
                positional.len()
            )),
        }
    }
}

fn print_help() {
    println!(
        r"Gatehouse - login gate pipeline

USAGE:
    gatehouse [OPTIONS] [--] <IDENTITY> <SECRET>

    Options must come before the identity. Use `--` when the identity
    itself starts with `-`.

OPTIONS:
    -h, --help       Print help information
    -v, --version    Print version information

ENVIRONMENT VARIABLES:
    GATEHOUSE_CONFIG                          Configuration file (default: gatehouse.toml if present)
    GATEHOUSE__CREDENTIALS__USERS             Users as identity:secret pairs, comma separated
    GATEHOUSE__ROUTING__PRIVILEGED            Identities routed to admin, comma separated
    GATEHOUSE__ROUTING__DEFAULT_ROUTE         Route for implicit accepts (admin|standard)
    GATEHOUSE__TELEMETRY__LOGGING__LEVEL      Log filter directives (default: info)
    GATEHOUSE__TELEMETRY__LOGGING__FORMAT     json|pretty

EXIT STATUS:
    0  login granted
    1  login denied
    2  usage or runtime error

EXAMPLES:
    gatehouse admin admin
    GATEHOUSE__TELEMETRY__LOGGING__LEVEL=debug gatehouse user user
"
    );
}

fn load_config() -> anyhow::Result<GatehouseConfig> {
    let loader = ConfigLoader::new().with_defaults().with_dotenv()?;

    let loader = match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            loader
                .with_file(&path)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => loader.with_optional_file(DEFAULT_CONFIG_FILE)?,
    };

    let config = loader
        .with_env_prefix(ENV_PREFIX)
        .load()
        .context("invalid configuration")?;
    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<LoginOutcome> {
    let config = load_config()?;

    // Stdout carries only the outcome line
    let mut telemetry = config.telemetry.telemetry_config();
    telemetry.logging = telemetry.logging.with_writer(LogWriter::Stderr);
    let _telemetry = init_telemetry(&telemetry).context("failed to initialize telemetry")?;
    debug!(config = ?config, "Configuration loaded");

    let service = LoginService::from_config(&config);
    let outcome = service.login(&args.identity, &args.secret).await?;
    Ok(outcome)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Command::parse(std::env::args().skip(1)) {
        Ok(Command::Login(args)) => args,
        Ok(Command::Help) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("gatehouse {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Use --help for usage information");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match run(args).await {
        Ok(outcome) => match serde_json::to_string(&outcome) {
            Ok(line) => {
                println!("{line}");
                if outcome.is_granted() {
                    ExitCode::from(EXIT_GRANTED)
                } else {
                    ExitCode::from(EXIT_DENIED)
                }
            }
            Err(e) => {
                eprintln!("failed to encode outcome: {e}");
                ExitCode::from(EXIT_ERROR)
            }
        },
        Err(e) => {
            error!(error = %e, "Login could not be evaluated");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        Command::parse(args.iter().map(|s| (*s).to_string()))
    }

    #[test]
    fn test_parse_login() {
        match parse(&["admin", "12345"]) {
            Ok(Command::Login(args)) => {
                assert_eq!(args.identity, "admin");
                assert_eq!(args.secret, "12345");
            }
            _ => panic!("expected login"),
        }
    }

    #[test]
    fn test_parse_flags() {
        assert!(matches!(parse(&["--help"]), Ok(Command::Help)));
        assert!(matches!(parse(&["-v", "admin"]), Ok(Command::Version)));
    }

    #[test]
    fn test_parse_dash_prefixed_secret() {
        match parse(&["bob", "-x9"]) {
            Ok(Command::Login(args)) => {
                assert_eq!(args.identity, "bob");
                assert_eq!(args.secret, "-x9");
            }
            _ => panic!("expected login"),
        }
        assert!(matches!(parse(&["admin", "--help"]), Ok(Command::Login(_))));
    }

    #[test]
    fn test_parse_double_dash() {
        match parse(&["--", "-bob", "--"]) {
            Ok(Command::Login(args)) => {
                assert_eq!(args.identity, "-bob");
                assert_eq!(args.secret, "--");
            }
            _ => panic!("expected login"),
        }
        assert!(parse(&["--", "--help"]).is_err());
        assert!(parse(&["--"]).is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["admin"]).is_err());
        assert!(parse(&["a", "b", "c"]).is_err());
        assert!(parse(&["--verbose", "a", "b"]).is_err());
    }

    #[test]
    fn test_dash_is_a_valid_secret() {
        assert!(matches!(parse(&["admin", "-"]), Ok(Command::Login(_))));
    }
}
