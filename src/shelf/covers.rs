//! Cover image references.
//!
//! A cover is an opaque string stored on the book. The registry that issued it
//! owns whatever sits behind it, and gets told when the reference is dropped
//! (record deleted, cover replaced) so nothing lingers.

use crate::error::{Result, ShelfError};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

pub const COVERS_DIR: &str = "covers";

pub trait CoverRegistry {
    /// Take ownership of the image at `source` and return a reference to it.
    fn register(&mut self, source: &Path) -> Result<String>;

    /// Drop a reference previously returned by `register`.
    fn release(&mut self, reference: &str) -> Result<()>;

    /// Where the referenced image can be read from, if it still exists.
    fn locate(&self, reference: &str) -> Option<PathBuf>;
}

/// Release `reference` once the change that dropped it is already stored.
///
/// The book list is the source of truth at that point, so a failure here only
/// leaves a stray image behind and is logged instead of returned.
pub fn release_after_commit<C: CoverRegistry + ?Sized>(covers: &mut C, reference: &str) {
    if let Err(e) = covers.release(reference) {
        warn!(%reference, error = %e, "could not release cover");
    }
}

/// Copies cover images into `<data-dir>/covers/` under a fresh name.
pub struct FileCovers {
    dir: PathBuf,
}

impl FileCovers {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, reference: &str) -> Option<PathBuf> {
        if reference.is_empty() || reference.contains(&['/', '\\'][..]) || reference.starts_with('.')
        {
            return None;
        }
        Some(self.dir.join(reference))
    }
}

impl CoverRegistry for FileCovers {
    fn register(&mut self, source: &Path) -> Result<String> {
        if !source.is_file() {
            return Err(ShelfError::Api(format!(
                "Cover image not found: {}",
                source.display()
            )));
        }
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| "img".to_string());
        let reference = format!("cover-{}.{}", Uuid::new_v4(), ext);

        fs::create_dir_all(&self.dir)?;
        fs::copy(source, self.dir.join(&reference))?;
        debug!(%reference, source = %source.display(), "registered cover");
        Ok(reference)
    }

    fn release(&mut self, reference: &str) -> Result<()> {
        let Some(path) = self.path_for(reference) else {
            debug!(%reference, "ignoring foreign cover reference");
            return Ok(());
        };
        if path.exists() {
            fs::remove_file(&path)?;
            debug!(%reference, "released cover");
        }
        Ok(())
    }

    fn locate(&self, reference: &str) -> Option<PathBuf> {
        self.path_for(reference).filter(|p| p.is_file())
    }
}

/// Tracks references without touching the filesystem.
#[derive(Debug, Default)]
pub struct InMemoryCovers {
    live: BTreeSet<String>,
    released: Vec<String>,
    issued: usize,
}

impl InMemoryCovers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_live(&self, reference: &str) -> bool {
        self.live.contains(reference)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn released(&self) -> &[String] {
        &self.released
    }
}

impl CoverRegistry for InMemoryCovers {
    fn register(&mut self, source: &Path) -> Result<String> {
        self.issued += 1;
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("cover");
        let reference = format!("mem:{}:{}", self.issued, name);
        self.live.insert(reference.clone());
        Ok(reference)
    }

    fn release(&mut self, reference: &str) -> Result<()> {
        if self.live.remove(reference) {
            self.released.push(reference.to_string());
        }
        Ok(())
    }

    fn locate(&self, reference: &str) -> Option<PathBuf> {
        self.live.get(reference).map(PathBuf::from)
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// Registers like [`InMemoryCovers`] but every release fails.
    #[derive(Debug, Default)]
    pub struct StuckCovers {
        pub inner: InMemoryCovers,
        pub failed_releases: usize,
    }

    impl CoverRegistry for StuckCovers {
        fn register(&mut self, source: &Path) -> Result<String> {
            self.inner.register(source)
        }

        fn release(&mut self, _reference: &str) -> Result<()> {
            self.failed_releases += 1;
            Err(ShelfError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "cover is read-only",
            )))
        }

        fn locate(&self, reference: &str) -> Option<PathBuf> {
            self.inner.locate(reference)
        }
    }
}
