// Centralized UI strings and labels. ASCII-friendly by default.

use unicode_width::UnicodeWidthStr;

pub const APP_TITLE: &str = " Weather Lookup ";
pub const INPUT_HINT: &str = "Enter a city name, then press Enter";

// Block titles keep surrounding spaces for visual padding
pub const TITLE_SEARCH: &str = " City ";
pub const TITLE_RESULT: &str = " Result ";
pub const TITLE_ALERT: &str = " Invalid input ";
pub const TITLE_HELP: &str = " Help / Shortcuts ";

pub const ALERT_DISMISS: &str = "Press Enter to continue";
pub const MISSING_CITY: &str = "Please enter a city name";

pub fn looking_up(city: &str) -> String {
    format!("Looking up weather for \"{}\"...", city)
}

pub fn button_label(label: &str) -> String {
    format!("[ {} ]", label)
}

// Status line with width-aware compaction.
// - focus: "Input" or "History n/m"
// - history_len / max_items: history fill level
// - submissions: forms sent this session
// - storage: where history is persisted
pub fn build_status_line(
    focus: &str,
    history_len: usize,
    max_items: usize,
    submissions: usize,
    storage: &str,
    max_width: u16,
) -> String {
    let mut segments: Vec<String> = vec![
        format!("[{}]", focus),
        format!("Hist:{}/{}", history_len, max_items),
        format!("Sent:{}", submissions),
    ];
    let hints: [&str; 4] = [
        "Enter: search",
        "Tab: history",
        "F1: help",
        "Esc: quit",
    ];
    for h in hints {
        segments.push(h.to_string());
    }
    segments.push(format!("Store:{}", storage));

    let sep = "  |  ";
    let mut out = String::new();
    let mut used = 0usize;
    for (i, seg) in segments.iter().enumerate() {
        let segw = UnicodeWidthStr::width(seg.as_str());
        let addw = segw + if i == 0 { 0 } else { UnicodeWidthStr::width(sep) };
        if used + addw > max_width as usize {
            break;
        }
        if i > 0 {
            out.push_str(sep);
            used += UnicodeWidthStr::width(sep);
        }
        out.push_str(seg);
        used += segw;
    }
    out
}

pub fn help_lines_ascii() -> &'static [&'static str] {
    &[
        "Search",
        "  Enter: Submit city    Letters, spaces, hyphens and apostrophes only",
        "Input Editing",
        "  Left/Right: Move cursor    Home/End or Ctrl+A/E: Start/end",
        "  Backspace/Delete: Delete prev/next char    Ctrl+W: Delete prev word",
        "  Ctrl+U/K: Kill to start/end",
        "Recent Searches",
        "  Tab/Shift+Tab: Cycle focus    Down: Jump to history    Up: Back to input",
        "  Left/Right: Move between buttons    Enter/Space: Activate",
        "  Mouse click: Activate button",
        "Others",
        "  F1: Open/close this panel    Esc: Quit    Ctrl+C: Quit",
    ]
}
