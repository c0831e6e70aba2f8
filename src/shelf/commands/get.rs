use crate::collection::BookCollection;
use crate::commands::CmdResult;
use crate::error::{Result, ShelfError};
use crate::model::BookId;
use crate::store::KeyValueStore;

/// Look up books by id. Unlike the mutating commands, an unknown id here is
/// an error: the caller asked to see something specific.
pub fn run<S: KeyValueStore>(
    collection: &BookCollection<S>,
    ids: &[BookId],
) -> Result<CmdResult> {
    let books = ids
        .iter()
        .map(|id| {
            collection
                .get(*id)
                .cloned()
                .ok_or(ShelfError::BookNotFound(*id))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed_books(books))
}
