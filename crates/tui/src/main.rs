mod app;
mod config;
mod events;
mod logging;
mod persist;
mod strings;
mod terminal;
mod theme;
mod ui;

use anyhow::Result;
use config::AppConfig;
use terminal::TerminalGuard;

fn main() -> Result<()> {
    let _log_guard = logging::init();
    let cfg = AppConfig::from_env_and_file();
    let mut app = app::App::new(&cfg);
    let mut term = TerminalGuard::new()?;
    events::run(&mut term.terminal, &mut app)
}
