use crate::history::SearchHistory;
use crate::page::Command;

pub const HISTORY_TITLE: &str = "Recent Searches:";
pub const CLEAR_LABEL: &str = "Clear History";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub command: Command,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryView {
    Hidden,
    Visible {
        title: &'static str,
        entries: Vec<Button>,
        clear: Button,
    },
}

impl HistoryView {
    pub fn is_visible(&self) -> bool {
        matches!(self, HistoryView::Visible { .. })
    }

    /// Entry buttons followed by the clear button, in display order.
    pub fn buttons(&self) -> Vec<&Button> {
        match self {
            HistoryView::Hidden => Vec::new(),
            HistoryView::Visible { entries, clear, .. } => {
                entries.iter().chain(std::iter::once(clear)).collect()
            }
        }
    }
}

pub fn render(history: &SearchHistory) -> HistoryView {
    if history.is_empty() {
        return HistoryView::Hidden;
    }
    let entries = history
        .iter()
        .map(|city| Button {
            label: city.clone(),
            command: Command::SelectHistoryEntry(city.clone()),
        })
        .collect();
    HistoryView::Visible {
        title: HISTORY_TITLE,
        entries,
        clear: Button {
            label: CLEAR_LABEL.to_string(),
            command: Command::ClearHistory,
        },
    }
}
