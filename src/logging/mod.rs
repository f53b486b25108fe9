/*!
 * Logging Module
 * Daily rolling file logs plus console output; JSON in production.
 */
pub mod middleware;

use std::io;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config::Environment;

const LOG_DIR: &str = "logs";

fn default_level(environment: Environment) -> String {
    std::env::var("LOG_LEVEL").unwrap_or_else(|_| {
        if environment.is_production() {
            "info".to_string()
        } else {
            "debug".to_string()
        }
    })
}

fn env_filter(environment: Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "aseskahraba_backend={level},analytics={level},tower_http=debug,axum=debug",
            level = default_level(environment)
        ))
    })
}

/// Install the global subscriber.
///
/// The returned guards flush the background writers on drop and must be held
/// until the process exits.
pub fn init(environment: Environment) -> Vec<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(LOG_DIR) {
        eprintln!("Could not create {LOG_DIR}/ directory: {e}");
    }

    let (file_writer, file_guard) = non_blocking(rolling::daily(LOG_DIR, "app.log"));
    let (error_writer, error_guard) = non_blocking(rolling::daily(LOG_DIR, "error.log"));
    let (console_writer, console_guard) = non_blocking(io::stdout());

    let subscriber = tracing_subscriber::registry().with(env_filter(environment));

    if environment.is_production() {
        let file_layer = fmt::layer()
            .json()
            .with_writer(file_writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        let error_layer = fmt::layer()
            .json()
            .with_writer(error_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(LevelFilter::ERROR);

        let console_layer = fmt::layer()
            .json()
            .with_writer(console_writer)
            .with_target(false);

        subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .init();
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_writer)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let error_layer = fmt::layer()
            .with_writer(error_writer)
            .with_target(true)
            .with_ansi(false)
            .with_filter(LevelFilter::ERROR);

        let console_layer = fmt::layer()
            .with_writer(console_writer)
            .with_target(true)
            .pretty();

        subscriber
            .with(file_layer)
            .with(error_layer)
            .with(console_layer)
            .init();
    }

    tracing::info!("Logging initialized for {} environment", environment.as_str());

    vec![file_guard, error_guard, console_guard]
}
