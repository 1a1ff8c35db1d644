use std::{collections::BTreeMap, fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use recents_core::{Storage, StorageError};
use tracing::warn;

type Scope = BTreeMap<String, String>;

pub fn storage_path() -> Option<PathBuf> {
    let base = BaseDirs::new()?;
    let dir = base.data_dir().join("weather-recents");
    Some(dir.join("storage.json"))
}

/// Key-value scope kept in a single JSON object file. Every call goes to
/// disk, so separate instances over the same path see each other's writes.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read(&self.path)
            .with_context(|| format!("read storage file: {}", self.path.display()))?;
        Ok(Some(data))
    }

    fn read_scope(&self) -> Result<Scope> {
        let Some(data) = self.read_bytes()? else {
            return Ok(Scope::new());
        };
        let scope: Scope = serde_json::from_slice(&data).with_context(|| "parse storage json")?;
        Ok(scope)
    }

    // Only an unparseable file is replaced; I/O failures abort the write so
    // the other keys survive.
    fn read_scope_for_write(&self) -> Result<Scope> {
        let Some(data) = self.read_bytes()? else {
            return Ok(Scope::new());
        };
        match serde_json::from_slice::<Scope>(&data) {
            Ok(s) => Ok(s),
            Err(e) => {
                warn!(target: "persist", "replacing corrupt storage {}: {}", self.path.display(), e);
                Ok(Scope::new())
            }
        }
    }

    fn write_scope(&self, scope: &Scope) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create storage dir: {}", parent.display()))?;
        }
        let data = serde_json::to_vec_pretty(scope)?;
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        {
            let mut f =
                fs::File::create(&tmp).with_context(|| format!("create tmp: {}", tmp.display()))?;
            f.write_all(&data)?;
            f.flush()?;
        }
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("persist storage to {}", self.path.display()))?;
        Ok(())
    }
}

fn unavailable(e: anyhow::Error) -> StorageError {
    StorageError::Unavailable(format!("{:#}", e))
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let scope = self.read_scope().map_err(unavailable)?;
        Ok(scope.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut scope = self.read_scope_for_write().map_err(unavailable)?;
        scope.insert(key.to_string(), value.to_string());
        self.write_scope(&scope).map_err(unavailable)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut scope = self.read_scope_for_write().map_err(unavailable)?;
        if scope.remove(key).is_none() {
            return Ok(());
        }
        self.write_scope(&scope).map_err(unavailable)
    }
}
