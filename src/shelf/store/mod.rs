//! # Storage Layer
//!
//! The shelf keeps its whole collection in a single slot of a key-value store.
//! The [`KeyValueStore`] trait is that slot primitive: get and set a string by
//! key, nothing more. Every mutation rewrites the full value, so backends need
//! no notion of records.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `<key>.json` file per key inside the data directory
//! - [`memory::InMemoryStore`]: no persistence, used by tests
//!
//! ## Storage Format
//!
//! ```text
//! <data-dir>/
//! ├── livros.json        # JSON array of books (key is configurable)
//! ├── covers/            # Images behind the cover references
//! └── config.json        # ShelfConfig
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

/// A string-keyed persistence slot.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
