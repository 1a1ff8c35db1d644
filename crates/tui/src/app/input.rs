use unicode_segmentation::UnicodeSegmentation;

use super::App;

// The search box is a single line; cursor positions count graphemes.
impl App {
    pub fn insert_text(&mut self, s: &str) {
        // Pasted newlines would end up in the city name.
        let clean: String = s.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if clean.is_empty() {
            return;
        }
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        let mut next = parts[..idx].concat();
        next.push_str(&clean);
        next.push_str(&parts[idx..].concat());
        self.input = next;
        self.input_cursor = idx + clean.graphemes(true).count();
        self.input_changed();
    }

    pub fn delete_left_grapheme(&mut self) {
        let mut parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        if idx == 0 {
            return;
        }
        parts.remove(idx - 1);
        self.input = parts.concat();
        self.input_cursor = idx - 1;
    }

    pub fn delete_right_grapheme(&mut self) {
        let mut parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        if idx < parts.len() {
            parts.remove(idx);
            self.input = parts.concat();
        }
    }

    pub fn delete_prev_word(&mut self) {
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let end = self.input_cursor.min(parts.len());
        let mut i = end;
        while i > 0 && parts[i - 1].trim().is_empty() {
            i -= 1;
        }
        while i > 0 && !parts[i - 1].trim().is_empty() {
            i -= 1;
        }
        self.input = [parts[..i].concat(), parts[end..].concat()].concat();
        self.input_cursor = i;
    }

    pub fn kill_to_start(&mut self) {
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        self.input = parts[idx..].concat();
        self.input_cursor = 0;
    }

    pub fn kill_to_end(&mut self) {
        let parts: Vec<&str> = self.input.graphemes(true).collect();
        let idx = self.input_cursor.min(parts.len());
        self.input = parts[..idx].concat();
    }
}
