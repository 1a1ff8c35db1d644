//! Command dispatch for the search page.
//!
//! Host events become [`Command`]s; [`Page::dispatch`] applies them and
//! returns the side effects the host has to perform.

use tracing::{debug, info};

use crate::history::{HistoryConfig, RecentSearchCache, SearchHistory};
use crate::storage::Storage;
use crate::validate::validate_city;
use crate::view::{render, HistoryView};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Load,
    Input(String),
    Submit(String),
    SelectHistoryEntry(String),
    ClearHistory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Blocking message; the submission was aborted.
    Alert(String),
    /// The form goes out with this city.
    SubmitForm(String),
}

pub struct Page<S> {
    cache: RecentSearchCache<S>,
    input: String,
    history: SearchHistory,
    view: HistoryView,
}

impl<S: Storage> Page<S> {
    /// Builds the page and loads the persisted history.
    pub fn new(cfg: HistoryConfig, storage: S) -> Self {
        let mut page = Self {
            cache: RecentSearchCache::new(cfg, storage),
            input: String::new(),
            history: SearchHistory::new(),
            view: HistoryView::Hidden,
        };
        page.dispatch(Command::Load);
        page
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn view(&self) -> &HistoryView {
        &self.view
    }

    pub fn cache(&self) -> &RecentSearchCache<S> {
        &self.cache
    }

    pub fn dispatch(&mut self, cmd: Command) -> Vec<Effect> {
        debug!(target: "page", "dispatch: {:?}", cmd);
        match cmd {
            Command::Load => {
                self.history = self.cache.load();
                self.rerender();
                Vec::new()
            }
            Command::Input(text) => {
                self.input = text;
                Vec::new()
            }
            Command::Submit(text) => {
                self.input = text.trim().to_string();
                match validate_city(&self.input) {
                    Err(e) => {
                        info!(target: "page", "submit rejected: {:?}", self.input);
                        vec![Effect::Alert(e.to_string())]
                    }
                    Ok(city) => {
                        if !city.is_empty() {
                            self.history = self.cache.insert(&city);
                            self.rerender();
                        }
                        vec![Effect::SubmitForm(city)]
                    }
                }
            }
            Command::SelectHistoryEntry(city) => {
                self.input = city.clone();
                vec![Effect::SubmitForm(city)]
            }
            Command::ClearHistory => {
                self.cache.clear();
                self.history = SearchHistory::new();
                self.rerender();
                Vec::new()
            }
        }
    }

    fn rerender(&mut self) {
        self.view = render(&self.history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::DEFAULT_STORAGE_KEY;
    use crate::storage::MemoryStorage;
    use crate::validate::INVALID_CITY_MESSAGE;

    fn page() -> Page<MemoryStorage> {
        Page::new(HistoryConfig::default(), MemoryStorage::new())
    }

    #[test]
    fn starts_hidden_without_history() {
        let p = page();
        assert!(p.history().is_empty());
        assert_eq!(p.view(), &HistoryView::Hidden);
    }

    #[test]
    fn loads_persisted_history_on_construction() {
        let mut storage = MemoryStorage::new();
        storage.seed(DEFAULT_STORAGE_KEY, r#"["Oslo","Rome"]"#);
        let p = Page::new(HistoryConfig::default(), storage);
        assert_eq!(p.history().as_slice(), ["Oslo", "Rome"]);
        assert_eq!(p.view().buttons().len(), 3);
    }

    #[test]
    fn valid_submit_records_and_submits_trimmed_city() {
        let mut p = page();
        let fx = p.dispatch(Command::Submit("  Tokyo ".into()));
        assert_eq!(fx, vec![Effect::SubmitForm("Tokyo".into())]);
        assert_eq!(p.input(), "Tokyo");
        assert_eq!(p.history().as_slice(), ["Tokyo"]);
        assert!(p.view().is_visible());
    }

    #[test]
    fn invalid_submit_alerts_and_changes_nothing() {
        let mut p = page();
        p.dispatch(Command::Submit("Lima".into()));
        let fx = p.dispatch(Command::Submit(" Lima 42 ".into()));
        assert_eq!(fx, vec![Effect::Alert(INVALID_CITY_MESSAGE.into())]);
        assert_eq!(p.input(), "Lima 42");
        assert_eq!(p.history().as_slice(), ["Lima"]);
        assert_eq!(
            p.cache().storage().raw(DEFAULT_STORAGE_KEY),
            Some(r#"["Lima"]"#)
        );
    }

    #[test]
    fn empty_submit_goes_out_unrecorded() {
        let mut p = page();
        let fx = p.dispatch(Command::Submit("   ".into()));
        assert_eq!(fx, vec![Effect::SubmitForm(String::new())]);
        assert!(p.history().is_empty());
        assert!(p.cache().storage().is_empty());
    }

    #[test]
    fn select_fills_input_and_submits_without_reordering() {
        let mut p = page();
        p.dispatch(Command::Submit("Oslo".into()));
        p.dispatch(Command::Submit("Rome".into()));
        let fx = p.dispatch(Command::SelectHistoryEntry("Oslo".into()));
        assert_eq!(fx, vec![Effect::SubmitForm("Oslo".into())]);
        assert_eq!(p.input(), "Oslo");
        assert_eq!(p.history().as_slice(), ["Rome", "Oslo"]);
    }

    #[test]
    fn clear_hides_history_and_drops_record() {
        let mut p = page();
        p.dispatch(Command::Submit("Oslo".into()));
        assert!(p.dispatch(Command::ClearHistory).is_empty());
        assert!(p.history().is_empty());
        assert_eq!(p.view(), &HistoryView::Hidden);
        assert_eq!(p.cache().storage().raw(DEFAULT_STORAGE_KEY), None);
        p.dispatch(Command::Load);
        assert!(p.history().is_empty());
    }

    #[test]
    fn view_buttons_dispatch_back_into_the_page() {
        let mut p = page();
        p.dispatch(Command::Submit("Quito".into()));
        let cmds: Vec<Command> = p.view().buttons().iter().map(|b| b.command.clone()).collect();
        assert_eq!(
            p.dispatch(cmds[0].clone()),
            vec![Effect::SubmitForm("Quito".into())]
        );
        p.dispatch(cmds[1].clone());
        assert!(!p.view().is_visible());
    }

    #[test]
    fn input_command_replaces_text() {
        let mut p = page();
        p.dispatch(Command::Input("Ber".into()));
        assert_eq!(p.input(), "Ber");
        assert!(p.history().is_empty());
    }
}
