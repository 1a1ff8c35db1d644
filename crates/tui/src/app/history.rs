use super::{contains, App, Focus};

impl App {
    pub fn button_count(&self) -> usize {
        self.view().buttons().len()
    }

    // Focus cycles Input -> first button -> ... -> last button -> Input.
    pub fn focus_next(&mut self) {
        let n = self.button_count();
        self.focus = match self.focus {
            Focus::Input if n > 0 => Focus::History(0),
            Focus::History(i) if i + 1 < n => Focus::History(i + 1),
            _ => Focus::Input,
        };
    }

    pub fn focus_prev(&mut self) {
        let n = self.button_count();
        self.focus = match self.focus {
            Focus::Input if n > 0 => Focus::History(n - 1),
            Focus::History(i) if i > 0 && i - 1 < n => Focus::History(i - 1),
            _ => Focus::Input,
        };
    }

    pub fn focus_first_button(&mut self) {
        if self.button_count() > 0 {
            self.focus = Focus::History(0);
        }
    }

    pub fn clamp_focus(&mut self) {
        if let Focus::History(i) = self.focus {
            let n = self.button_count();
            self.focus = if n == 0 {
                Focus::Input
            } else {
                Focus::History(i.min(n - 1))
            };
        }
    }

    /// Fires the command behind the `idx`-th history button.
    pub fn activate_button(&mut self, idx: usize) {
        let Some(cmd) = self.view().buttons().get(idx).map(|b| b.command.clone()) else {
            return;
        };
        self.dispatch(cmd);
        if !self.view().is_visible() {
            self.focus = Focus::Input;
        }
    }

    pub fn button_at(&self, x: u16, y: u16) -> Option<usize> {
        let n = self.button_count();
        self.button_areas
            .iter()
            .take(n)
            .position(|r| contains(*r, x, y))
    }
}
