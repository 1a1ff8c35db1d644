use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use recents_core::{Command, Effect, HistoryView, MemoryStorage, Page, Storage};
use tracing::{info, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::AppConfig;
use crate::persist::FileStorage;

pub mod history;
pub mod input;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Input,
    // Index into HistoryView::buttons()
    History(usize),
}

/// Outcome of the last form submission, shown in the result pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    City(String),
    MissingCity,
}

pub struct App {
    pub page: Page<Box<dyn Storage>>,
    pub input: String,
    pub input_cursor: usize,
    pub focus: Focus,
    pub alert: Option<String>,
    pub lookup: Option<Lookup>,
    pub submissions: usize,
    pub show_help: bool,
    pub should_quit: bool,
    pub dirty: bool,
    pub input_area: Option<Rect>,
    // Screen rects of the history buttons, same order as the view's buttons.
    pub button_areas: Vec<Rect>,
    pub storage_label: String,
}

impl App {
    pub fn new(cfg: &AppConfig) -> Self {
        let (storage, label): (Box<dyn Storage>, String) = match &cfg.storage_path {
            Some(path) => {
                let fs = FileStorage::new(path.clone());
                let label = fs.path().display().to_string();
                (Box::new(fs), label)
            }
            None => {
                warn!(target: "tui", "no data dir; history kept in memory");
                (Box::new(MemoryStorage::new()), String::from("memory"))
            }
        };
        info!(
            target: "tui",
            "start: key={} max_items={} storage={}",
            cfg.history.storage_key, cfg.history.max_items, label
        );
        Self::with_page(Page::new(cfg.history.clone(), storage), label)
    }

    pub fn with_page(page: Page<Box<dyn Storage>>, storage_label: String) -> Self {
        Self {
            page,
            input: String::new(),
            input_cursor: 0,
            focus: Focus::Input,
            alert: None,
            lookup: None,
            submissions: 0,
            show_help: false,
            should_quit: false,
            dirty: true,
            input_area: None,
            button_areas: Vec::new(),
            storage_label,
        }
    }

    pub fn view(&self) -> &HistoryView {
        self.page.view()
    }

    pub fn submit(&mut self) {
        let text = self.input.clone();
        self.dispatch(Command::Submit(text));
    }

    /// Runs a command through the page and applies the resulting effects.
    pub fn dispatch(&mut self, cmd: Command) {
        let effects = self.page.dispatch(cmd);
        self.sync_from_page();
        for fx in effects {
            match fx {
                Effect::Alert(msg) => {
                    info!(target: "tui", "alert: {}", msg);
                    self.alert = Some(msg);
                }
                Effect::SubmitForm(city) => {
                    self.submissions += 1;
                    info!(target: "tui", "submit: city={:?} n={}", city, self.submissions);
                    self.lookup = Some(if city.is_empty() {
                        Lookup::MissingCity
                    } else {
                        Lookup::City(city)
                    });
                }
            }
        }
        self.clamp_focus();
        self.dirty = true;
    }

    // The page may rewrite the input (trim on submit, fill on select).
    fn sync_from_page(&mut self) {
        if self.page.input() != self.input {
            self.input = self.page.input().to_string();
            self.input_cursor = self.input.graphemes(true).count();
        }
    }

    fn input_changed(&mut self) {
        self.page.dispatch(Command::Input(self.input.clone()));
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // The alert blocks everything until acknowledged.
        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
                self.dirty = true;
            }
            return;
        }
        if ctrl && matches!(key.code, KeyCode::Char('c')) {
            self.should_quit = true;
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
                self.dirty = true;
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            _ => match self.focus {
                Focus::Input => self.on_input_key(key.code, ctrl),
                Focus::History(idx) => self.on_history_key(key.code, idx),
            },
        }
        self.dirty = true;
    }

    fn on_input_key(&mut self, code: KeyCode, ctrl: bool) {
        match code {
            KeyCode::Enter => self.submit(),
            KeyCode::Down => self.focus_first_button(),
            KeyCode::Left => self.input_cursor = self.input_cursor.saturating_sub(1),
            KeyCode::Right => {
                let len = self.input.graphemes(true).count();
                self.input_cursor = (self.input_cursor + 1).min(len);
            }
            KeyCode::Home => self.input_cursor = 0,
            KeyCode::End => self.input_cursor = self.input.graphemes(true).count(),
            KeyCode::Backspace => {
                self.delete_left_grapheme();
                self.input_changed();
            }
            KeyCode::Delete => {
                self.delete_right_grapheme();
                self.input_changed();
            }
            KeyCode::Char(ch) if ctrl => {
                match ch {
                    'a' => self.input_cursor = 0,
                    'e' => self.input_cursor = self.input.graphemes(true).count(),
                    'w' => self.delete_prev_word(),
                    'u' => self.kill_to_start(),
                    'k' => self.kill_to_end(),
                    _ => return,
                }
                self.input_changed();
            }
            KeyCode::Char(ch) => {
                let mut buf = [0u8; 4];
                self.insert_text(ch.encode_utf8(&mut buf));
            }
            _ => {}
        }
    }

    fn on_history_key(&mut self, code: KeyCode, idx: usize) {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_button(idx),
            KeyCode::Left => self.focus_prev(),
            KeyCode::Right => self.focus_next(),
            KeyCode::Up => self.focus = Focus::Input,
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    // Pastes obey the same blocking rules as typed keys.
    pub fn on_paste(&mut self, s: &str) {
        if self.alert.is_some() || self.show_help || self.focus != Focus::Input {
            return;
        }
        self.insert_text(s);
        self.dirty = true;
    }

    /// Left click at a screen cell. Returns true when something was hit.
    pub fn on_click(&mut self, x: u16, y: u16) -> bool {
        if self.alert.is_some() || self.show_help {
            return false;
        }
        if let Some(idx) = self.button_at(x, y) {
            self.focus = Focus::History(idx);
            self.activate_button(idx);
            return true;
        }
        if let Some(area) = self.input_area {
            if contains(area, x, y) {
                self.focus = Focus::Input;
                self.dirty = true;
                return true;
            }
        }
        false
    }
}

pub fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}
