//! Configuration for hebrides tools
//!
//! Sources, highest priority first:
//! 1. Command-line arguments (applied by the caller)
//! 2. Environment variables (`HEBRIDES_*`)
//! 3. The first configuration file found (`.hebrides.toml`, `.hebrides.yaml`, ...)
//! 4. Built-in defaults

use anyhow::{bail, Context, Result};
use hebrides::{AngleUnit, DEFAULT_TOLERANCE};
use hebrides_logging::LogFormat;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest number of decimals that still says something about an `f64`.
pub const MAX_PRECISION: usize = 17;

/// Main hebrides configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HebridesConfig {
    #[serde(default)]
    pub numeric: NumericConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Numeric behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericConfig {
    /// Tolerance below which results and complex parts count as zero
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Flush tiny reals and complex parts to zero before printing
    #[serde(default = "default_true")]
    pub chop_results: bool,
}

/// Output formatting
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    /// Fixed number of decimals; short-g formatting when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,
    /// Unit used to print angles
    #[serde(default)]
    pub angle_unit: AngleUnit,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn parse(value: &str) -> Option<LogLevel> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}
fn default_true() -> bool {
    true
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            chop_results: true,
        }
    }
}

impl HebridesConfig {
    /// Rejects settings no command could honour.
    pub fn validate(&self) -> Result<()> {
        let tol = self.numeric.tolerance;
        if !tol.is_finite() || tol < 0.0 {
            bail!("numeric.tolerance must be a finite, non-negative number (got {tol})");
        }
        if let Some(precision) = self.display.precision {
            if precision > MAX_PRECISION {
                bail!("display.precision must be at most {MAX_PRECISION} (got {precision})");
            }
        }
        Ok(())
    }
}

/// Configuration loader with multiple source support
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<HebridesConfig> {
        Self::load_with(None)
    }

    /// Like [`ConfigLoader::load`], but an explicit `path` replaces the file search.
    pub fn load_with(path: Option<&Path>) -> Result<HebridesConfig> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load_from_files()?,
        };
        Self::apply_environment_variables(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    fn load_from_files() -> Result<HebridesConfig> {
        match Self::find_existing() {
            Some(path) => {
                info!("Loading configuration from: {}", path.display());
                Self::load_from_file(&path)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(HebridesConfig::default())
            }
        }
    }

    /// The configuration file `load` would read, if any.
    pub fn find_existing() -> Option<PathBuf> {
        Self::find_config_files().into_iter().find(|path| {
            if path.is_dir() {
                info!(
                    "Ignoring config directory path (expected file): {}",
                    path.display()
                );
                return false;
            }
            path.exists()
        })
    }

    /// Candidate configuration paths in order of preference
    pub fn find_config_files() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(config_path) = env::var("HEBRIDES_CONFIG") {
            if !config_path.is_empty() {
                paths.push(PathBuf::from(config_path));
            }
        }

        let current_dir_configs = [
            ".hebrides.toml",
            ".hebrides.yaml",
            ".hebrides.yml",
            ".hebrides.json",
            "hebrides.config.toml",
            "hebrides.config.yaml",
            "hebrides.config.yml",
            "hebrides.config.json",
        ];
        if let Ok(current_dir) = env::current_dir() {
            for name in &current_dir_configs {
                paths.push(current_dir.join(name));
            }
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".config/hebrides/config.toml"));
        }

        paths
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<HebridesConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            _ => {
                // Unknown extension: TOML first, then YAML, then JSON
                if let Ok(config) = toml::from_str(&content) {
                    config
                } else if let Ok(config) = serde_yaml::from_str(&content) {
                    config
                } else if let Ok(config) = serde_json::from_str(&content) {
                    config
                } else {
                    bail!(
                        "Could not parse config file {} (tried TOML, YAML, JSON)",
                        path.display()
                    );
                }
            }
        };

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_environment_variables(config: &mut HebridesConfig) -> Result<()> {
        if let Some(tolerance) = env_value("HEBRIDES_TOLERANCE") {
            config.numeric.tolerance = tolerance
                .parse::<f64>()
                .with_context(|| format!("Invalid HEBRIDES_TOLERANCE: {tolerance}"))?;
        }

        if let Some(chop) = env_value("HEBRIDES_CHOP") {
            config.numeric.chop_results = parse_bool(&chop)
                .with_context(|| format!("Invalid HEBRIDES_CHOP: {chop}"))?;
        }

        if let Some(precision) = env_value("HEBRIDES_PRECISION") {
            config.display.precision = match precision.to_ascii_lowercase().as_str() {
                "auto" | "short" => None,
                digits => Some(
                    digits
                        .parse::<usize>()
                        .with_context(|| format!("Invalid HEBRIDES_PRECISION: {precision}"))?,
                ),
            };
        }

        if let Some(unit) = env_value("HEBRIDES_ANGLE_UNIT") {
            config.display.angle_unit = unit
                .parse::<AngleUnit>()
                .with_context(|| format!("Invalid HEBRIDES_ANGLE_UNIT: {unit}"))?;
        }

        if let Some(level) = env_value("HEBRIDES_LOG_LEVEL") {
            config.logging.level = LogLevel::parse(&level)
                .with_context(|| format!("Invalid HEBRIDES_LOG_LEVEL: {level}"))?;
        }

        if let Some(format) = env_value("HEBRIDES_LOG_FORMAT") {
            config.logging.format = format
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid HEBRIDES_LOG_FORMAT: {format}"))?;
        }

        Ok(())
    }

    /// Save configuration to a file; the extension picks the format
    pub fn save_to_file(config: &HebridesConfig, path: &Path) -> Result<()> {
        let content = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::to_string(config).context("Failed to serialize config to YAML")?
            }
            Some("json") => serde_json::to_string_pretty(config)
                .context("Failed to serialize config to JSON")?,
            _ => toml::to_string_pretty(config).context("Failed to serialize config to TOML")?,
        };

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Generate a sample configuration file (TOML)
    pub fn generate_sample_config() -> String {
        let config = HebridesConfig::default();
        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| "# Failed to generate config".to_string())
    }
}

/// Set and non-blank environment variable.
fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a boolean value from string with various formats
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disable" | "disabled" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_GUARD: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_VARS: [&str; 6] = [
        "HEBRIDES_TOLERANCE",
        "HEBRIDES_CHOP",
        "HEBRIDES_PRECISION",
        "HEBRIDES_ANGLE_UNIT",
        "HEBRIDES_LOG_LEVEL",
        "HEBRIDES_LOG_FORMAT",
    ];

    fn clear_env() {
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = HebridesConfig::default();
        assert_eq!(config.numeric.tolerance, 1e-12);
        assert!(config.numeric.chop_results);
        assert_eq!(config.display.precision, None);
        assert_eq!(config.display.angle_unit, AngleUnit::Radians);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_yaml_serialization() {
        let mut config = HebridesConfig::default();
        config.display.angle_unit = AngleUnit::Degrees;
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: HebridesConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_serialization() {
        let mut config = HebridesConfig::default();
        config.display.precision = Some(4);
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: HebridesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let parsed: HebridesConfig = toml::from_str("[display]\nangle_unit = \"turns\"\n").unwrap();
        assert_eq!(parsed.display.angle_unit, AngleUnit::Turns);
        assert_eq!(parsed.numeric, NumericConfig::default());
    }

    #[test]
    fn sample_config_is_valid_toml() {
        let sample = ConfigLoader::generate_sample_config();
        let parsed: HebridesConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed, HebridesConfig::default());
        assert!(sample.contains("[numeric]"));
    }

    #[test]
    fn test_file_loading() {
        let temp_dir = TempDir::new().unwrap();
        for name in [".hebrides.toml", ".hebrides.yaml", ".hebrides.json"] {
            let config_path = temp_dir.path().join(name);
            let mut config = HebridesConfig::default();
            config.numeric.tolerance = 1e-9;
            config.logging.level = LogLevel::Debug;

            ConfigLoader::save_to_file(&config, &config_path).unwrap();
            let loaded = ConfigLoader::load_from_file(&config_path).unwrap();

            assert_eq!(loaded.numeric.tolerance, 1e-9, "{name}");
            assert_eq!(loaded.logging.level, LogLevel::Debug, "{name}");
        }
    }

    #[test]
    fn unknown_extension_is_detected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.conf");
        fs::write(&path, "numeric:\n  chop_results: false\n").unwrap();
        let loaded = ConfigLoader::load_from_file(&path).unwrap();
        assert!(!loaded.numeric.chop_results);

        fs::write(&path, "{{{{ not a config").unwrap();
        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = HebridesConfig::default();
        assert!(config.validate().is_ok());
        config.numeric.tolerance = -1.0;
        assert!(config.validate().is_err());
        config.numeric.tolerance = f64::NAN;
        assert!(config.validate().is_err());
        config.numeric.tolerance = 0.0;
        config.display.precision = Some(18);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bool_parsing() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    fn env_overrides_apply() {
        let _lock = ENV_GUARD.lock().unwrap();
        clear_env();
        std::env::set_var("HEBRIDES_TOLERANCE", "1e-6");
        std::env::set_var("HEBRIDES_CHOP", "off");
        std::env::set_var("HEBRIDES_PRECISION", "3");
        std::env::set_var("HEBRIDES_ANGLE_UNIT", "deg");
        std::env::set_var("HEBRIDES_LOG_LEVEL", "INFO");
        std::env::set_var("HEBRIDES_LOG_FORMAT", "json");
        let mut config = HebridesConfig::default();
        let result = ConfigLoader::apply_environment_variables(&mut config);
        clear_env();
        result.unwrap();
        assert_eq!(config.numeric.tolerance, 1e-6);
        assert!(!config.numeric.chop_results);
        assert_eq!(config.display.precision, Some(3));
        assert_eq!(config.display.angle_unit, AngleUnit::Degrees);
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn env_precision_auto_resets() {
        let _lock = ENV_GUARD.lock().unwrap();
        clear_env();
        std::env::set_var("HEBRIDES_PRECISION", "auto");
        let mut config = HebridesConfig::default();
        config.display.precision = Some(5);
        let result = ConfigLoader::apply_environment_variables(&mut config);
        clear_env();
        result.unwrap();
        assert_eq!(config.display.precision, None);
    }

    #[test]
    fn invalid_env_values_are_errors() {
        let _lock = ENV_GUARD.lock().unwrap();
        clear_env();
        std::env::set_var("HEBRIDES_ANGLE_UNIT", "furlongs");
        let mut config = HebridesConfig::default();
        let err = ConfigLoader::apply_environment_variables(&mut config).unwrap_err();
        clear_env();
        assert!(err.to_string().contains("HEBRIDES_ANGLE_UNIT"));
    }

    #[test]
    fn explicit_path_wins_and_is_validated() {
        let _lock = ENV_GUARD.lock().unwrap();
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.toml");
        fs::write(&path, "[display]\nprecision = 40\n").unwrap();
        assert!(ConfigLoader::load_with(Some(path.as_path())).is_err());

        fs::write(&path, "[display]\nprecision = 2\n").unwrap();
        let loaded = ConfigLoader::load_with(Some(path.as_path())).unwrap();
        assert_eq!(loaded.display.precision, Some(2));
    }
}
