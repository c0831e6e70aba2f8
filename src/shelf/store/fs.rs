use super::KeyValueStore;
use crate::error::{Result, ShelfError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(&['/', '\\'][..]) || key.starts_with('.') {
            return Err(ShelfError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        self.ensure_dir()?;
        fs::write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "wrote slot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_key_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());
        assert_eq!(store.get("livros").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_round_trips() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("data");
        let mut store = FileStore::new(&root);

        store.set("livros", "[]").unwrap();

        assert!(root.join("livros.json").exists());
        assert_eq!(store.get("livros").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        store.set("livros", "[1]").unwrap();
        store.set("livros", "[]").unwrap();
        assert_eq!(store.get("livros").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path());
        assert!(store.set("../outside", "x").is_err());
        assert!(store.get("").is_err());
    }
}
