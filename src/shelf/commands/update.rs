use crate::collection::BookCollection;
use crate::commands::{not_found, BookChanges, CmdMessage, CmdResult};
use crate::covers::{release_after_commit, CoverRegistry};
use crate::error::Result;
use crate::model::BookId;
use crate::store::KeyValueStore;

/// Apply `changes` to the book with `id`.
///
/// A replaced cover is released once the new collection is stored. If the
/// book is gone, or the write fails, the newly supplied cover is released
/// instead so it does not outlive the attempt. Release failures are logged,
/// never returned, since they cannot change what was stored.
pub fn run<S: KeyValueStore, C: CoverRegistry>(
    collection: &mut BookCollection<S>,
    covers: &mut C,
    id: BookId,
    changes: BookChanges,
) -> Result<CmdResult> {
    let Some(current) = collection.get(id).cloned() else {
        if let Some(reference) = &changes.new_cover {
            release_after_commit(covers, reference);
        }
        return Ok(not_found(id));
    };

    let mut updated = current.clone();
    updated.title = changes.title;
    updated.author = changes.author;
    updated.year = changes.year;
    updated.pages = changes.pages;
    if let Some(reference) = changes.new_cover.clone() {
        updated.cover = Some(reference);
    }

    let next: Vec<_> = collection
        .books()
        .iter()
        .map(|b| if b.id == id { updated.clone() } else { b.clone() })
        .collect();

    if let Err(e) = collection.commit(next) {
        if let Some(reference) = &changes.new_cover {
            release_after_commit(covers, reference);
        }
        return Err(e);
    }

    let mut result = CmdResult::default();
    if changes.new_cover.is_some() {
        if let Some(old) = current.cover.as_deref() {
            if Some(old) != updated.cover.as_deref() {
                release_after_commit(covers, old);
            }
        }
    }

    result.add_message(CmdMessage::success(format!(
        "Book updated ({}): {}",
        updated.id, updated.title
    )));
    Ok(result.with_affected_books(vec![updated]))
}
