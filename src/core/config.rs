//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tessel/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Key chords and colours stay strings here; the TUI layer parses them.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TesselConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub leader: LeaderConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub initial_screen: Option<String>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeysConfig {
    pub leader: Option<String>,
    pub exit: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LeaderConfig {
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub accent: Option<String>,
    pub dim: Option<String>,
    pub border: Option<String>,
    pub warning: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LEADER_KEY: &str = "ctrl+x";
pub const DEFAULT_LEADER_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_LOG_FILE: &str = "tessel.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub initial_screen: Option<String>,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub leader_key: String,
    pub exit_key: Option<String>,
    pub leader_timeout: Duration,
    pub theme: ThemeConfig,
}

/// Values taken from command-line flags (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub initial_screen: Option<&'a str>,
    pub log_level: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown log level: {0:?}")]
    LogLevel(String),
    #[error("unknown colour: {0:?}")]
    Colour(String),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tessel/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tessel").join("config.toml"))
}

/// Load config from `~/.tessel/config.toml`.
pub fn load_config() -> Result<TesselConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(TesselConfig::default())
        }
    }
}

/// Load config from an explicit path.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TesselConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<TesselConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TesselConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: TesselConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r##"# Tessel Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# initial_screen = "list"           # any gallery screen name
# log_file = "tessel.log"           # or TESSEL_LOG_FILE
# log_level = "info"                # or TESSEL_LOG_LEVEL / --log-level

# [keys]
# leader = "ctrl+x"
# exit = "ctrl+c"

# [leader]
# timeout_ms = 2000

# [theme]
# accent = "cyan"                   # colour name or "#rrggbb"
# dim = "darkgray"
# border = "gray"
# warning = "yellow"
"##;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TesselConfig, cli: &CliOverrides<'_>) -> Result<ResolvedConfig, ConfigError> {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &TesselConfig,
    cli: &CliOverrides<'_>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig, ConfigError> {
    // Log level: CLI → env → config → default
    let log_level = match cli
        .log_level
        .map(str::to_string)
        .or_else(|| env("TESSEL_LOG_LEVEL"))
        .or_else(|| config.general.log_level.clone())
    {
        Some(level) => LevelFilter::from_str(&level).map_err(|_| ConfigError::LogLevel(level))?,
        None => DEFAULT_LOG_LEVEL,
    };

    // Log file: env → config → default
    let log_file = env("TESSEL_LOG_FILE")
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let initial_screen = cli
        .initial_screen
        .map(str::to_string)
        .or_else(|| config.general.initial_screen.clone());

    Ok(ResolvedConfig {
        initial_screen,
        log_file: PathBuf::from(log_file),
        log_level,
        leader_key: config
            .keys
            .leader
            .clone()
            .unwrap_or_else(|| DEFAULT_LEADER_KEY.to_string()),
        exit_key: config.keys.exit.clone(),
        leader_timeout: Duration::from_millis(
            config.leader.timeout_ms.unwrap_or(DEFAULT_LEADER_TIMEOUT_MS),
        ),
        theme: config.theme.clone(),
    })
}
