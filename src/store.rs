use crate::{StoreError, statics};
use indexmap::IndexMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// A durable string key/value store, in the spirit of browser local storage.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: IndexMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.shift_remove(key);
        Ok(())
    }
}

/// A store persisted as one JSON object (`{"key": "value", ...}`) on disk.
///
/// The file is read on every `get` and rewritten whole on every change, so
/// several stores may point at the same file without caching stale values.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/l10n-editor/store.json`, falling back to the working directory.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(statics::APP_DIR);
        path.push(statics::STORE_FILE_NAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where a corrupt store file is moved before it is replaced.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn read_all(&self) -> Result<IndexMap<String, String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(IndexMap::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(IndexMap::new());
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// `read_all` for a pending write: a corrupt file is moved to
    /// [`backup_path`](Self::backup_path) and read as empty, so the write
    /// replaces it instead of failing forever.
    fn read_for_update(&self) -> Result<IndexMap<String, String>, StoreError> {
        match self.read_all() {
            Err(StoreError::Corrupt { .. }) => {
                let backup = self.backup_path();
                fs::rename(&self.path, &backup).map_err(|source| StoreError::Write {
                    path: backup.clone(),
                    source,
                })?;
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    "Corrupt store file moved aside"
                );
                Ok(IndexMap::new())
            }
            other => other,
        }
    }

    fn write_all(&self, values: &IndexMap<String, String>) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let text = serde_json::to_string(values).map_err(|e| write_err(e.into()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        debug!(path = %self.path.display(), keys = values.len(), "Store written");
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.shift_remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.read_for_update()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut values = self.read_for_update()?;
        if values.shift_remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&values)
    }
}

/// Either backend, chosen at startup.
#[derive(Debug, Clone)]
pub enum AnyStore {
    File(FileStore),
    Memory(MemoryStore),
}

impl KvStore for AnyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            AnyStore::File(s) => s.get(key),
            AnyStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            AnyStore::File(s) => s.set(key, value),
            AnyStore::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            AnyStore::File(s) => s.remove(key),
            AnyStore::Memory(s) => s.remove(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileStore, KvStore, MemoryStore};
    use crate::StoreError;

    #[test]
    fn memory_store_get_set_remove() {
        let mut s = MemoryStore::new();
        assert_eq!(s.get("k").unwrap(), None);
        s.set("k", "v").unwrap();
        assert_eq!(s.get("k").unwrap().as_deref(), Some("v"));
        s.remove("k").unwrap();
        assert_eq!(s.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = FileStore::new(dir.path().join("nested").join("store.json"));
        assert_eq!(s.get("items").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut a = FileStore::new(&path);
        a.set("items", "[]").unwrap();
        a.set("other", "x").unwrap();

        let mut b = FileStore::new(&path);
        assert_eq!(b.get("items").unwrap().as_deref(), Some("[]"));
        b.remove("items").unwrap();

        assert_eq!(a.get("items").unwrap(), None);
        assert_eq!(a.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let s = FileStore::new(&path);
        assert!(matches!(s.get("items"), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn file_store_replaces_corrupt_file_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "not json").unwrap();

        let mut s = FileStore::new(&path);
        s.set("items", "[]").unwrap();

        assert_eq!(s.get("items").unwrap().as_deref(), Some("[]"));
        assert_eq!(s.backup_path(), dir.path().join("store.json.bak"));
        assert_eq!(std::fs::read_to_string(s.backup_path()).unwrap(), "not json");
    }

    #[test]
    fn file_store_remove_on_corrupt_file_clears_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{").unwrap();

        let mut s = FileStore::new(&path);
        s.remove("items").unwrap();

        assert_eq!(s.get("items").unwrap(), None);
        assert!(s.backup_path().exists());
    }
}
