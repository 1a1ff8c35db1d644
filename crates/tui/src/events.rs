use std::time::Duration;

use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::info;

use crate::{
    app::{App, Focus},
    ui,
};

pub fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    loop {
        if app.dirty {
            terminal.draw(|f| ui::draw(f, app))?;
            app.dirty = false;
        }
        if matches!(app.focus, Focus::Input) && app.alert.is_none() && !app.show_help {
            let _ = terminal.show_cursor();
        } else {
            let _ = terminal.hide_cursor();
        }

        if event::poll(Duration::from_millis(120))? {
            match event::read()? {
                Event::Key(key) => app.on_key(key),
                Event::Paste(s) => app.on_paste(&s),
                Event::Resize(_, _) => app.dirty = true,
                Event::Mouse(me) => {
                    if let MouseEventKind::Down(MouseButton::Left) = me.kind {
                        app.on_click(me.column, me.row);
                    }
                }
                _ => {}
            }
        }

        if app.should_quit {
            info!(target: "tui", "quit: submissions={}", app.submissions);
            break;
        }
    }
    Ok(())
}
