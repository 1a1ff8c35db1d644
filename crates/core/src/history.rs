use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::Storage;

pub const DEFAULT_STORAGE_KEY: &str = "weatherAppSearchHistory";
pub const DEFAULT_MAX_ITEMS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryConfig {
    pub storage_key: String,
    pub max_items: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

/// City names, most recent first. Entries are unique ignoring case.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory(Vec<String>);

impl SearchHistory {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn contains_ignore_case(&self, city: &str) -> bool {
        let needle = city.to_lowercase();
        self.0.iter().any(|c| c.to_lowercase() == needle)
    }

    /// Moves `city` to the front (dropping any entry equal ignoring case),
    /// then keeps the first `max_items`.
    pub fn promote(mut self, city: &str, max_items: usize) -> Self {
        let needle = city.to_lowercase();
        self.0.retain(|c| c.to_lowercase() != needle);
        self.0.insert(0, city.to_string());
        self.0.truncate(max_items);
        self
    }
}

impl SearchHistory {
    // Stored records are not trusted: blanks and later case-insensitive
    // repeats are dropped before the bound is applied.
    fn sanitized(items: Vec<String>, max_items: usize) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(items.len());
        let mut out = Vec::with_capacity(items.len().min(max_items));
        for item in items {
            if out.len() == max_items {
                break;
            }
            if item.trim().is_empty() {
                continue;
            }
            let folded = item.to_lowercase();
            if seen.contains(&folded) {
                continue;
            }
            seen.push(folded);
            out.push(item);
        }
        Self(out)
    }
}

impl From<Vec<String>> for SearchHistory {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

/// Bounded MRU list of searched cities persisted through a [`Storage`].
///
/// Storage faults never escape: unreadable or malformed records load as an
/// empty history and failed writes leave the returned history intact.
pub struct RecentSearchCache<S> {
    cfg: HistoryConfig,
    storage: S,
}

impl<S: Storage> RecentSearchCache<S> {
    pub fn new(mut cfg: HistoryConfig, storage: S) -> Self {
        cfg.max_items = cfg.max_items.max(1);
        Self { cfg, storage }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.cfg
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn load(&self) -> SearchHistory {
        let raw = match self.storage.get(&self.cfg.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SearchHistory::new(),
            Err(e) => {
                warn!(target: "history", "read {} failed: {}", self.cfg.storage_key, e);
                return SearchHistory::new();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(items) => SearchHistory::sanitized(items, self.cfg.max_items),
            Err(e) => {
                warn!(target: "history", "ignoring malformed {}: {}", self.cfg.storage_key, e);
                SearchHistory::new()
            }
        }
    }

    pub fn insert(&mut self, city: &str) -> SearchHistory {
        if city.trim().is_empty() {
            return self.load();
        }
        let next = self.load().promote(city, self.cfg.max_items);
        self.persist(&next);
        debug!(target: "history", "insert: city={} len={}", city, next.len());
        next
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.storage.remove(&self.cfg.storage_key) {
            warn!(target: "history", "clear {} failed: {}", self.cfg.storage_key, e);
        }
    }

    fn persist(&mut self, history: &SearchHistory) {
        let data = match serde_json::to_string(history) {
            Ok(d) => d,
            Err(e) => {
                warn!(target: "history", "encode history: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.cfg.storage_key, &data) {
            warn!(target: "history", "write {} failed: {}", self.cfg.storage_key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn cache() -> RecentSearchCache<MemoryStorage> {
        RecentSearchCache::new(HistoryConfig::default(), MemoryStorage::new())
    }

    fn names(h: &SearchHistory) -> Vec<&str> {
        h.iter().map(String::as_str).collect()
    }

    #[test]
    fn load_is_empty_without_record() {
        assert!(cache().load().is_empty());
    }

    #[test]
    fn reinsert_promotes_instead_of_duplicating() {
        let mut c = cache();
        c.insert("Paris");
        let h = c.insert("PARIS");
        assert_eq!(names(&h), ["PARIS"]);
        assert!(h.contains_ignore_case("paris"));
        assert!(!h.contains_ignore_case("Lyon"));
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let mut c = cache();
        let mut h = SearchHistory::new();
        for city in ["A", "B", "C", "D", "E", "F"] {
            h = c.insert(city);
        }
        assert_eq!(names(&h), ["F", "E", "D", "C", "B"]);
        assert_eq!(c.load(), h);
    }

    #[test]
    fn present_city_moves_to_front_without_growing() {
        let mut c = cache();
        for city in ["Oslo", "Rome", "Lima"] {
            c.insert(city);
        }
        let h = c.insert("rome");
        assert_eq!(names(&h), ["rome", "Lima", "Oslo"]);
        for _ in 0..4 {
            c.insert("rome");
        }
        assert_eq!(names(&c.load()), ["rome", "Lima", "Oslo"]);
    }

    #[test]
    fn invariants_hold_over_mixed_inserts() {
        let mut c = cache();
        let cities = [
            "Paris", "paris", "Oslo", "Rome", "OSLO", "Lima", "Kyiv", "Bern", "rome", "Quito",
            "Paris", "Accra", "kyiv",
        ];
        for city in cities {
            let h = c.insert(city);
            assert!(h.len() <= DEFAULT_MAX_ITEMS);
            assert_eq!(h.most_recent(), Some(city));
            let lowered: Vec<String> = h.iter().map(|s| s.to_lowercase()).collect();
            for (i, a) in lowered.iter().enumerate() {
                assert!(!lowered[i + 1..].contains(a), "duplicate {a} in {:?}", h);
            }
        }
    }

    #[test]
    fn clear_removes_record() {
        let mut c = cache();
        c.insert("Tokyo");
        c.clear();
        assert!(c.load().is_empty());
        assert_eq!(c.storage().raw(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn persisted_as_json_array_under_key() {
        let mut c = cache();
        c.insert("New York");
        c.insert("L'Aquila");
        assert_eq!(
            c.storage().raw(DEFAULT_STORAGE_KEY),
            Some(r#"["L'Aquila","New York"]"#)
        );
    }

    #[test]
    fn malformed_record_loads_empty() {
        for raw in ["not json", "{\"a\":1}", "[1,2]", "\"Paris\"", ""] {
            let mut storage = MemoryStorage::new();
            storage.seed(DEFAULT_STORAGE_KEY, raw);
            let c = RecentSearchCache::new(HistoryConfig::default(), storage);
            assert!(c.load().is_empty(), "{raw:?} should load empty");
        }
    }

    #[test]
    fn malformed_record_is_replaced_on_insert() {
        let mut storage = MemoryStorage::new();
        storage.seed(DEFAULT_STORAGE_KEY, "not json");
        let mut c = RecentSearchCache::new(HistoryConfig::default(), storage);
        assert_eq!(names(&c.insert("Lima")), ["Lima"]);
        assert_eq!(c.storage().raw(DEFAULT_STORAGE_KEY), Some(r#"["Lima"]"#));
    }

    #[test]
    fn oversized_record_is_truncated_on_load() {
        let mut storage = MemoryStorage::new();
        storage.seed(DEFAULT_STORAGE_KEY, r#"["a","b","c","d","e","f","g"]"#);
        let c = RecentSearchCache::new(HistoryConfig::default(), storage);
        assert_eq!(names(&c.load()), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn stored_blanks_and_case_repeats_are_dropped() {
        let mut storage = MemoryStorage::new();
        storage.seed(DEFAULT_STORAGE_KEY, r#"["Paris","PARIS","","  ","Rome","paris"]"#);
        let mut c = RecentSearchCache::new(HistoryConfig::default(), storage);
        assert_eq!(names(&c.load()), ["Paris", "Rome"]);

        let h = c.insert("Oslo");
        assert_eq!(names(&h), ["Oslo", "Paris", "Rome"]);
        assert_eq!(
            c.storage().raw(DEFAULT_STORAGE_KEY),
            Some(r#"["Oslo","Paris","Rome"]"#)
        );
    }

    #[test]
    fn bound_counts_entries_left_after_cleanup() {
        let mut storage = MemoryStorage::new();
        storage.seed(DEFAULT_STORAGE_KEY, r#"["a","A","b","","c","d","e","f"]"#);
        let c = RecentSearchCache::new(HistoryConfig::default(), storage);
        assert_eq!(names(&c.load()), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn write_failure_still_returns_result() {
        let mut c = RecentSearchCache::new(HistoryConfig::default(), MemoryStorage::with_quota(8));
        let h = c.insert("Johannesburg");
        assert_eq!(names(&h), ["Johannesburg"]);
        assert!(c.load().is_empty());
    }

    #[test]
    fn unavailable_storage_degrades_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.seed(DEFAULT_STORAGE_KEY, r#"["Oslo"]"#);
        storage.set_offline(true);
        let mut c = RecentSearchCache::new(HistoryConfig::default(), storage);
        assert!(c.load().is_empty());
        assert_eq!(names(&c.insert("Rome")), ["Rome"]);
        c.clear();
    }

    #[test]
    fn empty_city_is_a_noop() {
        let mut c = cache();
        c.insert("Oslo");
        assert_eq!(names(&c.insert("   ")), ["Oslo"]);
        assert_eq!(names(&c.insert("")), ["Oslo"]);
    }

    #[test]
    fn custom_config_is_honored() {
        let cfg = HistoryConfig {
            storage_key: "recent".into(),
            max_items: 2,
        };
        let mut c = RecentSearchCache::new(cfg, MemoryStorage::new());
        c.insert("A");
        c.insert("B");
        let h = c.insert("C");
        assert_eq!(names(&h), ["C", "B"]);
        assert_eq!(c.storage().raw("recent"), Some(r#"["C","B"]"#));
        assert_eq!(c.storage().raw(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn zero_max_items_is_clamped_to_one() {
        let cfg = HistoryConfig {
            max_items: 0,
            ..HistoryConfig::default()
        };
        let mut c = RecentSearchCache::new(cfg, MemoryStorage::new());
        c.insert("A");
        assert_eq!(names(&c.insert("B")), ["B"]);
    }
}
