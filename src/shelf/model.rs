use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Book identifier. Issued from a millisecond clock, so it doubles as the
/// creation time of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl BookId {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.0).ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BookId)
    }
}

/// One book on the shelf.
///
/// Field names on disk are kept compatible with collections written by
/// earlier versions of the reading list (`nome`, `autor`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    #[serde(rename = "nome")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    /// Publication year, 0 when unknown.
    #[serde(rename = "ano", default, deserialize_with = "year_or_unset")]
    pub year: i32,
    #[serde(
        rename = "paginas",
        default,
        deserialize_with = "positive_pages",
        skip_serializing_if = "Option::is_none"
    )]
    pub pages: Option<u32>,
    /// Transient reference handed out by a [`crate::covers::CoverRegistry`].
    #[serde(rename = "capa", default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(rename = "lido", default)]
    pub read: bool,
}

/// Older collections store a cleared year as `null`.
fn year_or_unset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or(0))
}

/// `null`, zero and negative page counts all read back as unset.
fn positive_pages<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.filter(|&n| n > 0).and_then(|n| u32::try_from(n).ok()))
}

impl Book {
    pub fn from_draft(id: BookId, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            year: draft.year,
            pages: draft.pages,
            cover: draft.cover,
            read: false,
        }
    }

    pub fn has_year(&self) -> bool {
        self.year != 0
    }
}

/// A validated record that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub pages: Option<u32>,
    pub cover: Option<String>,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }
}
