use std::{env, fs, path::PathBuf};

use directories::BaseDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub fn log_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var("WEATHER_RECENTS_LOG_DIR") {
        if !dir.trim().is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    let base = BaseDirs::new()?;
    Some(base.data_dir().join("weather-recents").join("logs"))
}

// The terminal owns stdout, so logs go to a daily file. Keep the guard alive
// until exit or buffered lines are lost.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::daily(dir, "weather-recents.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();
    Some(guard)
}
