use std::fs;
use std::io;
use std::path::PathBuf;

/// The single storage slot the save store persists into: one string in,
/// one string out, no transactions. `read` returns `Ok(None)` when the slot
/// has never been written.
///
/// Two contexts sharing one slot race on the full-store rewrite; the last
/// writer wins and the other writer's updates are lost. The store accepts
/// this, matching the single-key semantics it models.
pub trait SaveStorage {
    fn read(&self) -> io::Result<Option<String>>;
    fn write(&mut self, contents: &str) -> io::Result<()>;
}

/// One JSON file on disk, the desktop analog of an origin-scoped key.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }
}

impl SaveStorage for FileStorage {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, contents)
    }
}

/// In-memory slot. Used by tests, and as the degraded mode when no durable
/// storage is available: the store keeps working, nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        MemoryStorage {
            contents: Some(contents.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl SaveStorage for MemoryStorage {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn temp_slot_path(tag: &str) -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "lumio_saves_{}_{}_{}.json",
            tag,
            std::process::id(),
            n
        ))
    }

    #[test]
    fn test_file_storage_missing_file_reads_none() {
        let storage = FileStorage::new(temp_slot_path("missing"));
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let path = temp_slot_path("roundtrip");
        let mut storage = FileStorage::new(&path);
        storage.write("{\"g\":1}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{\"g\":1}"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_file_storage_creates_parent_directories() {
        let path = temp_slot_path("nested").join("deeper").join("saves.json");
        let mut storage = FileStorage::new(&path);
        storage.write("{}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{}"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read().unwrap(), None);
        storage.write("hello").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("hello"));
        assert_eq!(storage.contents(), Some("hello"));
    }
}
