//! Logging utilities for the Padelbook client.
//!
//! All crates log through `tracing`; this module installs the subscriber.
//! Output goes to stderr so that anything a front end prints on stdout stays
//! machine-readable.

use padelbook_config::LoggingConfig;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crate targets that receive the configured level directive.
const LOG_TARGETS: [&str; 6] = [
    "padelbook",
    "padelbook_api",
    "padelbook_session",
    "padelbook_booking",
    "padelbook_common",
    "padelbook_config",
];

/// Initialize the tracing subscriber from the `[logging]` configuration section.
///
/// An unparsable level falls back to INFO.
pub fn init_from_config(config: &LoggingConfig) {
    let level = config.level.parse::<Level>().unwrap_or(Level::INFO);
    install(level, config.json);
}

fn install(level: Level, json: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let filter = level_directives(&env, level)
        .into_iter()
        .fold(EnvFilter::from_default_env(), |filter, directive| {
            match directive.parse() {
                Ok(directive) => filter.add_directive(directive),
                Err(_) => filter,
            }
        });

    // try_init: a global subscriber may already be set (tests, embedding apps).
    let result = if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .try_init()
    };

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Directives giving our targets the configured level.
///
/// A target that `env` (the `RUST_LOG` value) already names is left out, so an
/// explicit `RUST_LOG=padelbook_api=trace` is not overridden by the config.
pub(crate) fn level_directives(env: &str, level: Level) -> Vec<String> {
    let named: Vec<&str> = env
        .split(',')
        .filter_map(|directive| {
            let target = directive.split(['=', '[']).next()?.trim();
            (!target.is_empty()).then_some(target)
        })
        .collect();
    LOG_TARGETS
        .iter()
        .filter(|target| !named.contains(target))
        .map(|target| format!("{target}={level}"))
        .collect()
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}
