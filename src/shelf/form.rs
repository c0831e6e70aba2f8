//! # Form State
//!
//! The add and edit flows share one staging area for a book's fields. It is
//! modelled as [`Staging`], an enum whose variant says which flow (if any)
//! owns the fields, so a half-filled add form can never leak into an edit
//! and vice versa. The visible modal ([`Modal`]) is derived from it.
//!
//! While staging, fields are plain text and accept anything. Checking happens
//! once, in [`FormFields::validate`], when the form is submitted.

use crate::model::{Book, BookId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: String },
}

/// The cover as the form sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverInput {
    /// The reference the book already has, carried through an edit.
    Existing(String),
    /// A newly picked image file, not registered yet.
    New(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    pub author: String,
    pub year: String,
    pub pages: String,
    pub cover: Option<CoverInput>,
}

/// Form contents that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidForm {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub pages: Option<u32>,
    pub cover: Option<CoverInput>,
}

impl ValidForm {
    /// The image that still needs registering, if the user picked one.
    pub fn new_cover(&self) -> Option<&PathBuf> {
        match &self.cover {
            Some(CoverInput::New(path)) => Some(path),
            _ => None,
        }
    }
}

impl FormFields {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: if book.has_year() {
                book.year.to_string()
            } else {
                String::new()
            },
            pages: book.pages.map(|p| p.to_string()).unwrap_or_default(),
            cover: book.cover.clone().map(CoverInput::Existing),
        }
    }

    pub fn validate(&self) -> Result<ValidForm, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::Required("title"));
        }
        let author = self.author.trim();
        if author.is_empty() {
            return Err(FormError::Required("author"));
        }

        Ok(ValidForm {
            title: title.to_string(),
            author: author.to_string(),
            year: parse_year(&self.year)?,
            pages: parse_pages(&self.pages)?,
            cover: self.cover.clone(),
        })
    }
}

fn parse_year(raw: &str) -> Result<i32, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(|_| FormError::InvalidNumber {
        field: "year",
        value: raw.to_string(),
    })
}

fn parse_pages(raw: &str) -> Result<Option<u32>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let pages: i64 = raw.parse().map_err(|_| FormError::InvalidNumber {
        field: "pages",
        value: raw.to_string(),
    })?;
    if pages <= 0 {
        return Err(FormError::NotPositive {
            field: "pages",
            value: raw.to_string(),
        });
    }
    u32::try_from(pages)
        .map(Some)
        .map_err(|_| FormError::InvalidNumber {
            field: "pages",
            value: raw.to_string(),
        })
}

/// Which form, if any, is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Adding,
    Editing(BookId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Staging {
    #[default]
    Idle,
    Creating {
        fields: FormFields,
    },
    Editing {
        id: BookId,
        fields: FormFields,
    },
}

impl Staging {
    pub fn creating() -> Self {
        Staging::Creating {
            fields: FormFields::default(),
        }
    }

    pub fn editing(book: &Book) -> Self {
        Staging::Editing {
            id: book.id,
            fields: FormFields::from_book(book),
        }
    }

    pub fn modal(&self) -> Modal {
        match self {
            Staging::Idle => Modal::Closed,
            Staging::Creating { .. } => Modal::Adding,
            Staging::Editing { id, .. } => Modal::Editing(*id),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Staging::Idle)
    }

    pub fn fields(&self) -> Option<&FormFields> {
        match self {
            Staging::Idle => None,
            Staging::Creating { fields } | Staging::Editing { fields, .. } => Some(fields),
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut FormFields> {
        match self {
            Staging::Idle => None,
            Staging::Creating { fields } | Staging::Editing { fields, .. } => Some(fields),
        }
    }

    /// Back to idle, returning whatever was staged.
    pub fn reset(&mut self) -> Staging {
        std::mem::take(self)
    }
}
