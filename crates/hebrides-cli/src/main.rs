//! hebrides - evaluate real, complex and angle operations from the shell

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hebrides::elem::display_in;
use hebrides::registry::{self, Category, Value, ValueKind};
use hebrides::{Angle, AngleUnit, MathError};
use hebrides_config::{ConfigLoader, HebridesConfig, LogLevel};
use hebrides_logging::{init_logging, LoggingOptions};
use log::debug;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hebrides",
    version,
    about = "Evaluate real, complex and angle operations",
    long_about = None
)]
struct Cli {
    /// Configuration file path
    #[arg(long, env = "HEBRIDES_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print results with this many decimals instead of short-g
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Evaluate an operation, e.g. `hebrides eval atan2 1 -1`
    Eval {
        /// Operation name
        operation: String,
        /// Arguments: reals (`2.5`, `pi`), complexes (`1-2i`) or angles (`30deg`)
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List registered operations
    List {
        /// Only operations on this receiver (real, complex, angle)
        #[arg(long)]
        receiver: Option<ValueKind>,
        /// Only operations in this category
        #[arg(long)]
        category: Option<Category>,
    },
    /// Convert an angle to another unit, e.g. `hebrides convert 90deg --to rad`
    Convert {
        #[arg(allow_hyphen_values = true)]
        angle: String,
        /// Target unit (rad, deg, turn, grad)
        #[arg(long)]
        to: AngleUnit,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        config_command: ConfigCommand,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Generate a sample configuration file
    Generate {
        /// Output file path; printed to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show which configuration file is used and where files are searched
    Path,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level `{value}`"))
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_configuration(&cli)?;

    let _logging = init_logging(LoggingOptions {
        level: Some(config.logging.level.as_str().to_string()),
        format: config.logging.format,
    });
    debug!("Effective configuration: {config:?}");

    match cli.command {
        Commands::Eval { operation, args } => match evaluate(&operation, &args, &config) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("{}", err.format_diagnostic());
                std::process::exit(1);
            }
        },
        Commands::List { receiver, category } => {
            for line in list_operations(receiver, category) {
                println!("{line}");
            }
        }
        Commands::Convert { angle, to } => match convert(&angle, to, &config) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("{}", err.format_diagnostic());
                std::process::exit(1);
            }
        },
        Commands::Config { config_command } => execute_config_command(config_command, &config)?,
    }
    Ok(())
}

/// Files and environment first, then command-line overrides.
fn load_configuration(cli: &Cli) -> Result<HebridesConfig> {
    let mut config =
        ConfigLoader::load_with(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(precision) = cli.precision {
        config.display.precision = Some(precision);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.validate()?;
    Ok(config)
}

fn evaluate(
    operation: &str,
    args: &[String],
    config: &HebridesConfig,
) -> Result<String, MathError> {
    let values = args
        .iter()
        .map(|arg| arg.parse::<Value>())
        .collect::<Result<Vec<_>, _>>()?;
    debug!("eval {operation} with {} argument(s)", values.len());
    let mut result = registry::call(operation, &values)?;
    if config.numeric.chop_results {
        result = result.chop(config.numeric.tolerance);
    }
    Ok(result.render(config.display.precision, config.display.angle_unit))
}

fn convert(angle: &str, to: AngleUnit, config: &HebridesConfig) -> Result<String, MathError> {
    let angle = angle.parse::<Angle>()?;
    Ok(display_in(angle, to, config.display.precision))
}

fn list_operations(receiver: Option<ValueKind>, category: Option<Category>) -> Vec<String> {
    let ops = match receiver {
        Some(kind) => registry::operations_for(kind),
        None => registry::operations(),
    };
    let width = ops.iter().map(|op| op.name.len()).max().unwrap_or(0);
    ops.into_iter()
        .filter(|op| category.map_or(true, |c| op.category == c))
        .map(|op| {
            format!(
                "{:<8} {:<width$}  {:<13}  {}",
                op.receiver, op.name, op.category, op.summary
            )
        })
        .collect()
}

fn execute_config_command(config_command: ConfigCommand, config: &HebridesConfig) -> Result<()> {
    match config_command {
        ConfigCommand::Show => {
            let text = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
            println!("{text}");
        }
        ConfigCommand::Generate { output: None } => {
            println!("{}", ConfigLoader::generate_sample_config());
        }
        ConfigCommand::Generate {
            output: Some(output),
        } => {
            ConfigLoader::save_to_file(&HebridesConfig::default(), &output)
                .with_context(|| format!("Failed to write config to {}", output.display()))?;
            println!("Sample configuration generated: {}", output.display());
        }
        ConfigCommand::Path => {
            match ConfigLoader::find_existing() {
                Some(path) => println!("Using: {}", path.display()),
                None => println!("Using: built-in defaults"),
            }
            println!("Search order:");
            for path in ConfigLoader::find_config_files() {
                let exists = if path.is_file() { " (exists)" } else { "" };
                println!("  {}{exists}", path.display());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn evaluates_with_config_display() {
        let mut config = HebridesConfig::default();
        assert_eq!(evaluate("sqrt", &args(&["2"]), &config).unwrap(), "1.41421356237");
        config.display.precision = Some(3);
        assert_eq!(evaluate("sqrt", &args(&["2"]), &config).unwrap(), "1.414");
        config.display.angle_unit = AngleUnit::Degrees;
        assert_eq!(evaluate("arg", &args(&["-1"]), &config).unwrap(), "180.000°");
    }

    #[test]
    fn chops_complex_noise() {
        let mut config = HebridesConfig::default();
        assert_eq!(evaluate("exp", &args(&["3.141592653589793i"]), &config).unwrap(), "-1 + 0i");
        config.numeric.chop_results = false;
        assert_ne!(evaluate("exp", &args(&["3.141592653589793i"]), &config).unwrap(), "-1 + 0i");
    }

    #[test]
    fn eval_errors_carry_diagnostics() {
        let config = HebridesConfig::default();
        let err = evaluate("ln", &args(&["0"]), &config).unwrap_err();
        assert!(err.format_diagnostic().contains("hebrides:domain:ln"));
        let err = evaluate("sin", &args(&["seven"]), &config).unwrap_err();
        assert!(matches!(err, MathError::Conversion(_)));
    }

    #[test]
    fn converts_between_units() {
        let config = HebridesConfig::default();
        assert_eq!(convert("90deg", AngleUnit::Turns, &config).unwrap(), "0.25 turn");
        assert_eq!(convert("0.5turn", AngleUnit::Degrees, &config).unwrap(), "180°");
        assert!(convert("north", AngleUnit::Degrees, &config).is_err());
    }

    #[test]
    fn listing_filters() {
        let all = list_operations(None, None);
        let angles = list_operations(Some(ValueKind::Angle), None);
        let trig = list_operations(Some(ValueKind::Angle), Some(Category::Trigonometric));
        assert!(all.len() > angles.len());
        assert!(angles.len() > trig.len());
        assert_eq!(trig.len(), 3);
        assert!(trig.iter().all(|line| line.starts_with("Angle")));
    }

    #[test]
    fn cli_parses_negative_arguments() {
        let cli = Cli::try_parse_from(["hebrides", "--precision", "2", "eval", "add", "-1", "-2.5"])
            .unwrap();
        assert_eq!(cli.precision, Some(2));
        match cli.command {
            Commands::Eval { operation, args } => {
                assert_eq!(operation, "add");
                assert_eq!(args, vec!["-1", "-2.5"]);
            }
            _ => panic!("expected eval"),
        }
        assert!(Cli::try_parse_from(["hebrides", "--log-level", "loud", "list"]).is_err());
    }
}
