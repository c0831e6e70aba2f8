//! # Command Layer
//!
//! One module per operation on the shelf. Commands take the collection (and
//! whatever collaborators they need) as plain arguments and return a
//! [`CmdResult`]; they never print, prompt on their own, or exit.
//!
//! Operations on an id that is not in the collection are silent no-ops: the
//! collection is left alone, nothing is written, and the result carries an
//! info message.

use crate::config::ShelfConfig;
use crate::model::{Book, BookId};
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod get;
pub mod search;
pub mod toggle;
pub mod update;

#[derive(Debug, Clone)]
pub struct ShelfPaths {
    pub data_dir: PathBuf,
}

impl ShelfPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn covers_dir(&self) -> PathBuf {
        self.data_dir.join(crate::covers::COVERS_DIR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub listed_books: Vec<Book>,
    pub config: Option<ShelfConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_listed_books(mut self, books: Vec<Book>) -> Self {
        self.listed_books = books;
        self
    }

    pub fn with_config(mut self, config: ShelfConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// True when the command changed the collection.
    pub fn changed(&self) -> bool {
        !self.affected_books.is_empty()
    }
}

pub(crate) fn not_found(id: BookId) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("No book with id {}", id)));
    result
}

/// Changes to apply to an existing book. The cover is only touched when a new
/// reference is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub pages: Option<u32>,
    pub new_cover: Option<String>,
}
