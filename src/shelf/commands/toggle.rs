use crate::collection::BookCollection;
use crate::commands::{not_found, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BookId;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    collection: &mut BookCollection<S>,
    id: BookId,
) -> Result<CmdResult> {
    if collection.get(id).is_none() {
        return Ok(not_found(id));
    }

    let next: Vec<_> = collection
        .books()
        .iter()
        .map(|b| {
            let mut book = b.clone();
            if book.id == id {
                book.read = !book.read;
            }
            book
        })
        .collect();
    collection.commit(next)?;

    let mut result = CmdResult::default();
    if let Some(book) = collection.get(id).cloned() {
        let state = if book.read { "read" } else { "unread" };
        result.add_message(CmdMessage::success(format!(
            "Marked as {} ({}): {}",
            state, book.id, book.title
        )));
        result.affected_books.push(book);
    }
    Ok(result)
}
