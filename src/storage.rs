use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Persistent key-value store backing the user configuration.
///
/// Every flow that needs configuration depends on this interface rather than
/// on ambient global storage, so tests can substitute their own store. All
/// operations are read-or-overwrite on independent keys; there is no
/// cross-key transaction.
pub trait StorageService: Send + Sync {
    /// Return the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> Result<()>;
    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Whether [`JsonFileStore::open`] found an existing store file or had to
/// create one. A fresh file is the first-run ("installed") signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOpened {
    Opened,
    Created,
}

/// File-backed [`StorageService`]: one pretty-printed JSON object per store,
/// loaded wholesale at open and written back atomically on every mutation.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<(Self, StoreOpened)> {
        let path = path.into();
        let (entries, opened) = match load_entries(&path) {
            Some(entries) => (entries, StoreOpened::Opened),
            None => (BTreeMap::new(), StoreOpened::Created),
        };
        let store = Self {
            path,
            entries: Mutex::new(entries),
        };
        if opened == StoreOpened::Created {
            store
                .persist(&store.entries.lock().unwrap())
                .context("create store file")?;
        }
        Ok((store, opened))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        let json = serde_json::to_vec_pretty(entries)?;
        atomic_write(&self.path, &json).context("atomic write")?;
        Ok(())
    }
}

impl StorageService for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value);
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

/// Load the store file. Returns `None` when the file does not exist; a file
/// that cannot be read or parsed is set aside with a `.corrupt` extension and
/// the store starts empty.
fn load_entries(path: &Path) -> Option<BTreeMap<String, Value>> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(entries) => Some(entries),
            Err(err) => {
                tracing::warn!("store file {} is corrupt: {err}", path.display());
                let _ = fs::rename(path, path.with_extension("corrupt"));
                None
            }
        },
        Err(err) => {
            if err.kind() != io::ErrorKind::NotFound {
                let _ = fs::rename(path, path.with_extension("corrupt"));
            }
            None
        }
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
