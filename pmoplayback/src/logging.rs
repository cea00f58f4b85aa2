//! Initialisation du système de logs à partir de la configuration.

use anyhow::{Result, anyhow};
use pmoconfig::Config;
use tracing::Level;
use tracing_subscriber::{
    Layer, Registry, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Installs the global `tracing` subscriber.
///
/// The minimum level comes from `host.logger.min_level` (TRACE when missing or
/// invalid) and console output is enabled by `host.logger.enable_console`.
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &Config) -> Result<()> {
    let level = config
        .get_log_min_level()
        .ok()
        .and_then(|l| string_to_level(&l))
        .map_or(LevelFilter::TRACE, LevelFilter::from_level);

    let console = config.get_log_enable_console().unwrap_or(true);

    let fmt_layer = console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_ansi(true)
            .with_filter(level)
    });

    Registry::default()
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

pub(crate) fn string_to_level(s: &str) -> Option<Level> {
    match s.trim().to_uppercase().as_str() {
        "ERROR" => Some(Level::ERROR),
        "WARN" => Some(Level::WARN),
        "INFO" => Some(Level::INFO),
        "DEBUG" => Some(Level::DEBUG),
        "TRACE" => Some(Level::TRACE),
        _ => None,
    }
}
