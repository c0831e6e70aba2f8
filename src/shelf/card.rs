use crate::model::Book;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

pub const NO_PAGES: &str = "N/A";

/// Everything a UI needs to draw one book tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub book: Book,
    /// Resolved image for the cover; `None` means draw the placeholder.
    pub cover_path: Option<PathBuf>,
    pub added_at: Option<DateTime<Utc>>,
}

impl BookCard {
    pub fn new(book: Book, cover_path: Option<PathBuf>) -> Self {
        let added_at = book.id.created_at();
        Self {
            book,
            cover_path,
            added_at,
        }
    }

    pub fn year_label(&self) -> String {
        if self.book.has_year() {
            self.book.year.to_string()
        } else {
            String::new()
        }
    }

    pub fn pages_label(&self) -> String {
        self.book
            .pages
            .map(|p| p.to_string())
            .unwrap_or_else(|| NO_PAGES.to_string())
    }

    /// Label of the read-toggle control: what pressing it would mark the book as.
    pub fn toggle_label(&self) -> &'static str {
        if self.book.read {
            "Unread"
        } else {
            "Read"
        }
    }

    pub fn has_cover(&self) -> bool {
        self.cover_path.is_some()
    }
}
