//! # The Book Collection
//!
//! [`BookCollection`] is the source of truth for the shelf: the in-memory list
//! of books mirrored to one slot of a [`KeyValueStore`].
//!
//! The slot is read exactly once, in [`BookCollection::load`]. After that the
//! in-memory list only changes through [`BookCollection::commit`], which
//! serializes the *next* list in full, writes it, and only then swaps it in.
//! A failed write leaves both sides on the previous version.

use crate::error::{Result, ShelfError};
use crate::model::{Book, BookId};
use crate::store::KeyValueStore;
use chrono::Utc;
use tracing::debug;

/// Hands out strictly increasing ids based on wall-clock milliseconds.
#[derive(Debug, Clone)]
pub struct IdClock {
    last: u64,
    now: fn() -> u64,
}

fn system_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

impl IdClock {
    pub fn new(now: fn() -> u64) -> Self {
        Self { last: 0, now }
    }

    pub fn system() -> Self {
        Self::new(system_millis)
    }

    /// Never issue anything at or below `id`.
    pub fn observe(&mut self, id: BookId) {
        self.last = self.last.max(id.0);
    }

    pub fn next(&mut self) -> Result<BookId> {
        let floor = self
            .last
            .checked_add(1)
            .ok_or_else(|| ShelfError::Store("No book ids left above the stored ones".into()))?;
        let id = (self.now)().max(floor);
        self.last = id;
        Ok(BookId(id))
    }
}

pub struct BookCollection<S: KeyValueStore> {
    store: S,
    key: String,
    books: Vec<Book>,
    ids: IdClock,
}

impl<S: KeyValueStore> BookCollection<S> {
    pub fn load(store: S, key: impl Into<String>) -> Result<Self> {
        Self::load_with_clock(store, key, IdClock::system())
    }

    pub fn load_with_clock(store: S, key: impl Into<String>, mut ids: IdClock) -> Result<Self> {
        let key = key.into();
        let books: Vec<Book> = match store.get(&key)? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).map_err(|source| ShelfError::Corrupt {
                    key: key.clone(),
                    source,
                })?
            }
            _ => Vec::new(),
        };
        for book in &books {
            ids.observe(book.id);
        }
        debug!(%key, count = books.len(), "loaded collection");

        Ok(Self {
            store,
            key,
            books,
            ids,
        })
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn next_id(&mut self) -> Result<BookId> {
        self.ids.next()
    }

    /// Persist `next` as the whole collection, then make it current.
    pub fn commit(&mut self, next: Vec<Book>) -> Result<()> {
        let json = serde_json::to_string(&next)?;
        self.store.set(&self.key, &json)?;
        debug!(key = %self.key, count = next.len(), "persisted collection");
        self.books = next;
        Ok(())
    }
}
