// Configuration loading and parsing (game.toml, database.toml, logging.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub game: GameConfig,
    pub db_path: String,
    pub logging: LoggingConfig,
}

/// Wrapper for the top-level `[game]` table in game.toml.
#[derive(Debug, Clone, Deserialize)]
struct GameFile {
    game: GameConfig,
}

/// The config surface named in SPEC_FULL.md 6.
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub max_careers_per_user: u32,
    pub team_initial_budget: i64,
    pub salary_cap: i64,
    pub min_squad_size: u32,
    pub max_squad_size: u32,
    pub max_overseas: u32,
    pub player_pool_target: u32,
    pub player_minimum_ovr: i32,
}

/// Wrapper for the top-level `[database]` table.
#[derive(Debug, Clone, Deserialize)]
struct DatabaseFile {
    database: DatabaseSection,
}

#[derive(Debug, Clone, Deserialize)]
struct DatabaseSection {
    path: String,
}

/// Wrapper for the top-level `[logging]` table.
#[derive(Debug, Clone, Deserialize)]
struct LoggingFile {
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/game.toml`, `config/database.toml`,
/// and `config/logging.toml`, all relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config()`, which copies missing files from `defaults/` first.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let game_path = config_dir.join("game.toml");
    let game_text = read_file(&game_path)?;
    let game_file: GameFile = toml::from_str(&game_text).map_err(|e| ConfigError::ParseError {
        path: game_path.clone(),
        source: e,
    })?;

    let database_path = config_dir.join("database.toml");
    let database_text = read_file(&database_path)?;
    let database_file: DatabaseFile =
        toml::from_str(&database_text).map_err(|e| ConfigError::ParseError {
            path: database_path.clone(),
            source: e,
        })?;

    let logging_path = config_dir.join("logging.toml");
    let logging_text = read_file(&logging_path)?;
    let logging_file: LoggingFile =
        toml::from_str(&logging_text).map_err(|e| ConfigError::ParseError {
            path: logging_path.clone(),
            source: e,
        })?;

    let config = Config {
        game: game_file.game,
        db_path: database_file.database.path,
        logging: logging_file.logging,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let game = &config.game;

    if game.max_careers_per_user == 0 {
        return Err(ConfigError::ValidationError {
            field: "game.max_careers_per_user".into(),
            message: "must be greater than 0".into(),
        });
    }

    if game.team_initial_budget <= 0 {
        return Err(ConfigError::ValidationError {
            field: "game.team_initial_budget".into(),
            message: "must be greater than 0".into(),
        });
    }

    if game.salary_cap <= 0 {
        return Err(ConfigError::ValidationError {
            field: "game.salary_cap".into(),
            message: "must be greater than 0".into(),
        });
    }

    if game.min_squad_size == 0 || game.min_squad_size > game.max_squad_size {
        return Err(ConfigError::ValidationError {
            field: "game.min_squad_size".into(),
            message: "must be > 0 and <= max_squad_size".into(),
        });
    }

    if game.max_overseas > game.max_squad_size {
        return Err(ConfigError::ValidationError {
            field: "game.max_overseas".into(),
            message: "cannot exceed max_squad_size".into(),
        });
    }

    if !(1..=100).contains(&game.player_minimum_ovr) {
        return Err(ConfigError::ValidationError {
            field: "game.player_minimum_ovr".into(),
            message: "must be between 1 and 100".into(),
        });
    }

    if config.db_path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "database.path".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
