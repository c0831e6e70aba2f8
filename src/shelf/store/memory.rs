use super::KeyValueStore;
use crate::error::Result;
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    slots: HashMap<String, String>,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Book, BookId};

    pub const KEY: &str = "livros";

    /// Builds a store whose slot already holds a collection.
    pub struct StoreFixture {
        books: Vec<Book>,
        next_id: u64,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                books: Vec::new(),
                next_id: 1,
            }
        }

        pub fn with_book(mut self, title: &str, author: &str) -> Self {
            let id = BookId(self.next_id);
            self.next_id += 1;
            self.books.push(Book {
                id,
                title: title.to_string(),
                author: author.to_string(),
                year: 0,
                pages: None,
                cover: None,
                read: false,
            });
            self
        }

        pub fn with_read_book(mut self, title: &str, author: &str) -> Self {
            self = self.with_book(title, author);
            if let Some(book) = self.books.last_mut() {
                book.read = true;
            }
            self
        }

        pub fn books(&self) -> &[Book] {
            &self.books
        }

        pub fn build(self) -> InMemoryStore {
            let mut store = InMemoryStore::new();
            let json = serde_json::to_string(&self.books).unwrap();
            store.set(KEY, &json).unwrap();
            store.writes = 0;
            store
        }
    }
}
