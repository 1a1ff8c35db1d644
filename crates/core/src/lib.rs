pub mod history;
pub mod page;
pub mod storage;
pub mod validate;
pub mod view;

pub use history::{HistoryConfig, RecentSearchCache, SearchHistory};
pub use page::{Command, Effect, Page};
pub use storage::{MemoryStorage, Storage, StorageError};
pub use validate::{is_valid_city, validate_city, ValidationError};
pub use view::{render, Button, HistoryView};
