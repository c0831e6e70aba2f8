use crate::collection::BookCollection;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Book, BookDraft};
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    collection: &mut BookCollection<S>,
    draft: BookDraft,
) -> Result<CmdResult> {
    let id = collection.next_id()?;
    let book = Book::from_draft(id, draft);

    let mut next = collection.books().to_vec();
    next.push(book.clone());
    collection.commit(next)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book added ({}): {}",
        book.id, book.title
    )));
    Ok(result.with_affected_books(vec![book]))
}
