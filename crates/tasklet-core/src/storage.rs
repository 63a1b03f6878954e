use std::collections::BTreeMap;

/// Key/value medium that holds serialized state snapshots.
///
/// Reads return `Ok(None)` for a key that was never written. Writes replace
/// the whole value for the key.
pub trait SnapshotStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Process-local medium; contents live as long as the value does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: SnapshotStorage + ?Sized> SnapshotStorage for &mut S {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        (**self).write(key, value)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, anyhow, bail};
    use tempfile::NamedTempFile;
    use tracing::{debug, info};

    use super::SnapshotStorage;

    /// One `<key>.json` file per key under a directory, replaced atomically
    /// on every write.
    ///
    /// The medium for native hosts that embed the core and for headless
    /// tests. The browser bundle never builds it and persists through
    /// session storage instead.
    #[derive(Debug)]
    pub struct FileStorage {
        pub dir: PathBuf,
    }

    impl FileStorage {
        #[tracing::instrument(skip(dir))]
        pub fn open(dir: &Path) -> anyhow::Result<Self> {
            let dir = dir.to_path_buf();
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;

            info!(dir = %dir.display(), "opened snapshot directory");
            Ok(Self { dir })
        }

        pub fn path_for(&self, key: &str) -> anyhow::Result<PathBuf> {
            let valid = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
                && !key.starts_with('.');
            if !valid {
                bail!("snapshot key {key:?} is not usable as a file name");
            }
            Ok(self.dir.join(format!("{key}.json")))
        }
    }

    impl SnapshotStorage for FileStorage {
        #[tracing::instrument(skip(self))]
        fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
            let path = self.path_for(key)?;
            if !path.exists() {
                debug!(file = %path.display(), "no snapshot on disk");
                return Ok(None);
            }

            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed reading {}", path.display()))?;
            Ok(Some(raw))
        }

        #[tracing::instrument(skip(self, value))]
        fn write(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
            let path = self.path_for(key)?;
            debug!(file = %path.display(), bytes = value.len(), "writing snapshot atomically");

            let mut temp = NamedTempFile::new_in(&self.dir)?;
            temp.write_all(value.as_bytes())?;
            temp.flush()?;
            temp.persist(&path)
                .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

            Ok(())
        }
    }
}
