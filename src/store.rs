use anyhow::Result;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Synchronous string key-value storage, shaped like the browser's
/// `localStorage`. Implementations never fail loudly: a value that cannot be
/// read is reported as absent and a write that cannot land is dropped.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

// ── In-memory ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

// ── JSON file ─────────────────────────────────────────────────────────

/// A JSON object on disk, rewritten in full on every mutation.
/// Stored at ~/.local/share/nudge/storage.json unless configured otherwise.
#[derive(Debug)]
pub struct FileStore {
    path:    Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("nudge").join("storage.json"))
    }

    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or corrupt one is logged and also treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match try_read(&path) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("ignoring unreadable store {}: {:#}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path: Some(path), entries }
    }

    /// Open the default location, or fall back to a store that lives only
    /// for this process when no data directory is known.
    pub fn open_default() -> Self {
        match Self::default_path() {
            Some(p) => Self::open(p),
            None => {
                log::warn!("no data directory; reminder state will not persist");
                Self { path: None, entries: BTreeMap::new() }
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn flush(&self) {
        let Some(path) = &self.path else { return };
        if let Err(e) = try_write(path, &self.entries) {
            log::warn!("failed to write store {}: {:#}", path.display(), e);
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

fn try_read(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(serde_json::from_str(&text)?)
}

fn try_write(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(entries)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let mut store = MemoryStore::with_entries([("a", "1")]);
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert_eq!(store.get("b"), None);

        store.set("b", "2");
        store.set("a", "3");
        assert_eq!(store.get("a").as_deref(), Some("3"));
        assert_eq!(store.get("b").as_deref(), Some("2"));

        store.remove("a");
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("dismissed_for_date"), None);
        store.set("dismissed_for_date", "2024-03-07");
        store.set("reminder_last_shown", "1709812800000");

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("dismissed_for_date").as_deref(), Some("2024-03-07"));
        assert_eq!(reopened.get("reminder_last_shown").as_deref(), Some("1709812800000"));
    }

    #[test]
    fn file_store_remove_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path);
        store.set("k", "v");
        store.remove("k");

        assert_eq!(FileStore::open(&path).get("k"), None);
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("anything"), None);

        // The next write replaces the corrupt contents.
        store.set("k", "v");
        assert_eq!(FileStore::open(&path).get("k").as_deref(), Some("v"));
    }
}
