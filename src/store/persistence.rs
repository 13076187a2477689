//! History slot backends: load/save/clear with atomic writes

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A single durable key-value slot holding the serialized conversation.
///
/// The store only ever hands over complete documents, so implementations never diff.
pub trait HistoryStorage {
    /// Read the slot, `None` when nothing has been saved
    fn load(&self) -> io::Result<Option<String>>;

    /// Replace the slot contents
    fn save(&self, contents: &str) -> io::Result<()>;

    /// Remove the slot entirely
    fn clear(&self) -> io::Result<()>;
}

/// History slot backed by one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HistoryStorage for JsonFileStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Write atomically (temp file + rename)
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-process slot; clones share the same contents
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `contents`, e.g. a previously saved history
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(contents.into()))) }
    }

    /// Current slot contents
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Option<String>) -> T) -> io::Result<T> {
        let mut slot =
            self.slot.lock().map_err(|_| io::Error::other("history slot lock poisoned"))?;
        Ok(f(&mut slot))
    }
}

impl HistoryStorage for MemoryStorage {
    fn load(&self) -> io::Result<Option<String>> {
        self.with_slot(|slot| slot.clone())
    }

    fn save(&self, contents: &str) -> io::Result<()> {
        self.with_slot(|slot| *slot = Some(contents.to_string()))
    }

    fn clear(&self) -> io::Result<()> {
        self.with_slot(|slot| *slot = None)
    }
}
