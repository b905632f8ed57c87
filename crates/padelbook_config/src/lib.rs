//! Configuration loading for the Padelbook client.
//!
//! Values are layered, later sources overriding earlier ones:
//! built-in defaults, `config/default.*`, `config/<RUN_ENV>.*` and finally
//! `PADELBOOK__*` environment variables (`__` separates nesting levels, e.g.
//! `PADELBOOK__API__BASE_URL`). A `.env` file is read once per process before
//! the environment is consulted.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PADELBOOK";

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the `.env` file once per process.
///
/// `DOTENV_OVERRIDE` names an alternative file. Returns the path that was
/// tried; a missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

/// Directory holding `default.*` and `<RUN_ENV>.*` files.
pub fn config_dir() -> PathBuf {
    env::var("PADELBOOK_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"))
}

/// Loads the application configuration from the default locations.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    load_config_from(&config_dir(), &run_env)
}

/// Loads the configuration from `dir` for the given run environment.
pub fn load_config_from(dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = dir.join("default");
    let env_path = dir.join(run_env);
    debug!(
        default_path = %default_path.display(),
        env_path = %env_path.display(),
        "loading configuration"
    );

    let builder = Config::builder()
        .set_default("api.base_url", DEFAULT_API_BASE_URL)?
        .set_default("session.storage_key", DEFAULT_STORAGE_KEY)?
        .set_default("logging.level", "info")?
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}
