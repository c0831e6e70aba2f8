use crate::collection::BookCollection;
use crate::commands::{not_found, CmdMessage, CmdResult};
use crate::confirm::Confirm;
use crate::covers::{release_after_commit, CoverRegistry};
use crate::error::Result;
use crate::model::BookId;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore, C: CoverRegistry, P: Confirm>(
    collection: &mut BookCollection<S>,
    covers: &mut C,
    prompt: &mut P,
    id: BookId,
) -> Result<CmdResult> {
    let Some(book) = collection.get(id).cloned() else {
        return Ok(not_found(id));
    };

    let question = format!(
        "Are you sure you want to delete \"{}\" by {}?",
        book.title, book.author
    );
    if !prompt.confirm(&question) {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Operation cancelled."));
        return Ok(result);
    }

    let next: Vec<_> = collection
        .books()
        .iter()
        .filter(|b| b.id != id)
        .cloned()
        .collect();
    collection.commit(next)?;

    if let Some(reference) = &book.cover {
        release_after_commit(covers, reference);
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Book deleted ({}): {}",
        book.id, book.title
    )));
    Ok(result.with_affected_books(vec![book]))
}
