//! # API Facade
//!
//! [`ShelfApi`] is the single entry point a UI drives. It owns the three
//! parts of the screen:
//!
//! - the **collection** (source of truth, mirrored to storage)
//! - the **staging area** for the add/edit forms, as a [`Staging`] enum
//! - the **search query** the card grid is filtered by
//!
//! Mutations dispatch to `commands/*`; the facade adds the form flow around
//! them (validate, register a picked cover, submit, close) and nothing else.
//! It never prints or prompts; confirmation is passed in as a [`Confirm`].
//!
//! ## Generic Over Collaborators
//!
//! `ShelfApi<S: KeyValueStore, C: CoverRegistry>`:
//! - Production: `ShelfApi<FileStore, FileCovers>`
//! - Testing: `ShelfApi<InMemoryStore, InMemoryCovers>`

use crate::card::BookCard;
use crate::collection::BookCollection;
use crate::commands::{self, BookChanges, CmdResult};
use crate::confirm::Confirm;
use crate::covers::{release_after_commit, CoverRegistry};
use crate::error::{Result, ShelfError};
use crate::form::{CoverInput, FormFields, Modal, Staging};
use crate::model::{Book, BookDraft, BookId};
use crate::store::KeyValueStore;
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct ShelfApi<S: KeyValueStore, C: CoverRegistry> {
    collection: BookCollection<S>,
    covers: C,
    staging: Staging,
    query: String,
}

impl<S: KeyValueStore, C: CoverRegistry> ShelfApi<S, C> {
    pub fn new(collection: BookCollection<S>, covers: C) -> Self {
        Self {
            collection,
            covers,
            staging: Staging::Idle,
            query: String::new(),
        }
    }

    /// Load the collection stored under `key` and build the facade around it.
    pub fn open(store: S, key: &str, covers: C) -> Result<Self> {
        let collection = BookCollection::load(store, key)?;
        Ok(Self::new(collection, covers))
    }

    pub fn collection(&self) -> &BookCollection<S> {
        &self.collection
    }

    pub fn covers(&self) -> &C {
        &self.covers
    }

    // --- Store ---

    pub fn get_books(&self, ids: &[BookId]) -> Result<CmdResult> {
        commands::get::run(&self.collection, ids)
    }

    pub fn search_books(&self, query: &str) -> Result<CmdResult> {
        commands::search::run(&self.collection, query)
    }

    /// The books currently visible under the live query.
    pub fn list_books(&self) -> Result<CmdResult> {
        commands::search::run(&self.collection, &self.query)
    }

    pub fn toggle_read(&mut self, id: BookId) -> Result<CmdResult> {
        commands::toggle::run(&mut self.collection, id)
    }

    pub fn delete_book<P: Confirm>(&mut self, id: BookId, prompt: &mut P) -> Result<CmdResult> {
        commands::delete::run(&mut self.collection, &mut self.covers, prompt, id)
    }

    // --- View ---

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn cards(&self) -> Vec<BookCard> {
        commands::search::filter(self.collection.books(), &self.query)
            .into_iter()
            .map(|book| self.card_for(book.clone()))
            .collect()
    }

    pub fn card_for(&self, book: Book) -> BookCard {
        let cover_path = book
            .cover
            .as_deref()
            .and_then(|reference| self.covers.locate(reference));
        BookCard::new(book, cover_path)
    }

    pub fn modal(&self) -> Modal {
        self.staging.modal()
    }

    // --- Form ---

    pub fn form(&self) -> Option<&FormFields> {
        self.staging.fields()
    }

    pub fn begin_add(&mut self) {
        self.replace_staging(Staging::creating());
    }

    pub fn begin_edit(&mut self, id: BookId) -> Result<()> {
        let book = self
            .collection
            .get(id)
            .ok_or(ShelfError::BookNotFound(id))?;
        let staging = Staging::editing(book);
        self.replace_staging(staging);
        Ok(())
    }

    /// Close whichever form is open, discarding its fields.
    pub fn close(&mut self) {
        let previous = self.staging.reset();
        debug!(modal = ?previous.modal(), "closed form");
    }

    pub fn set_title(&mut self, value: impl Into<String>) -> Result<()> {
        self.fields_mut()?.title = value.into();
        Ok(())
    }

    pub fn set_author(&mut self, value: impl Into<String>) -> Result<()> {
        self.fields_mut()?.author = value.into();
        Ok(())
    }

    pub fn set_year(&mut self, value: impl Into<String>) -> Result<()> {
        self.fields_mut()?.year = value.into();
        Ok(())
    }

    pub fn set_pages(&mut self, value: impl Into<String>) -> Result<()> {
        self.fields_mut()?.pages = value.into();
        Ok(())
    }

    /// Pick a new cover image for the open form.
    pub fn set_cover(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.fields_mut()?.cover = Some(CoverInput::New(path.into()));
        Ok(())
    }

    /// Validate and commit the open form, then close it.
    ///
    /// A validation or cover error leaves the form open and untouched.
    pub fn submit(&mut self) -> Result<CmdResult> {
        let modal = self.staging.modal();
        let fields = self.staging.fields().ok_or(ShelfError::NoActiveForm)?;
        let valid = fields.validate()?;

        let new_cover = match valid.new_cover() {
            Some(path) => Some(self.covers.register(path)?),
            None => None,
        };

        let result = match modal {
            Modal::Closed => return Err(ShelfError::NoActiveForm),
            Modal::Adding => {
                let draft = BookDraft {
                    title: valid.title,
                    author: valid.author,
                    year: valid.year,
                    pages: valid.pages,
                    cover: new_cover.clone(),
                };
                match commands::add::run(&mut self.collection, draft) {
                    Ok(result) => result,
                    Err(e) => {
                        if let Some(reference) = &new_cover {
                            release_after_commit(&mut self.covers, reference);
                        }
                        return Err(e);
                    }
                }
            }
            Modal::Editing(id) => {
                let changes = BookChanges {
                    title: valid.title,
                    author: valid.author,
                    year: valid.year,
                    pages: valid.pages,
                    new_cover,
                };
                commands::update::run(&mut self.collection, &mut self.covers, id, changes)?
            }
        };

        self.staging.reset();
        Ok(result)
    }

    fn fields_mut(&mut self) -> Result<&mut FormFields> {
        self.staging.fields_mut().ok_or(ShelfError::NoActiveForm)
    }

    fn replace_staging(&mut self, next: Staging) {
        if self.staging.is_open() {
            warn!(
                from = ?self.staging.modal(),
                to = ?next.modal(),
                "opening a form while another is open; staged fields dropped"
            );
        }
        debug!(modal = ?next.modal(), "opened form");
        self.staging = next;
    }
}

pub use crate::commands::{CmdMessage, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::Always;
    use crate::covers::fixtures::StuckCovers;
    use crate::covers::InMemoryCovers;
    use crate::form::FormError;
    use crate::store::memory::fixtures::{StoreFixture, KEY};
    use crate::store::memory::InMemoryStore;

    fn api_with(store: InMemoryStore) -> ShelfApi<InMemoryStore, InMemoryCovers> {
        ShelfApi::open(store, KEY, InMemoryCovers::new()).unwrap()
    }

    fn api() -> ShelfApi<InMemoryStore, InMemoryCovers> {
        api_with(
            StoreFixture::new()
                .with_book("Dune", "Herbert")
                .with_book("Emma", "Austen")
                .build(),
        )
    }

    #[test]
    fn add_flow_appends_and_closes() {
        let mut api = api();
        api.begin_add();
        assert_eq!(api.modal(), Modal::Adding);
        api.set_title("Neuromancer").unwrap();
        api.set_author("Gibson").unwrap();
        api.set_year("1984").unwrap();

        let result = api.submit().unwrap();

        assert_eq!(api.modal(), Modal::Closed);
        assert!(api.form().is_none());
        assert_eq!(api.collection().len(), 3);
        let added = &result.affected_books[0];
        assert_eq!(added.year, 1984);
        assert!(!added.read);
    }

    #[test]
    fn begin_add_starts_from_blank_fields() {
        let mut api = api();
        api.begin_edit(BookId(1)).unwrap();
        api.begin_add();
        assert_eq!(api.form(), Some(&FormFields::default()));
        assert_eq!(api.modal(), Modal::Adding);
    }

    #[test]
    fn edit_flow_prefills_and_updates() {
        let mut api = api();
        api.begin_edit(BookId(1)).unwrap();
        assert_eq!(api.modal(), Modal::Editing(BookId(1)));
        assert_eq!(api.form().unwrap().title, "Dune");

        api.set_title("Dune Messiah").unwrap();
        api.submit().unwrap();

        assert_eq!(api.modal(), Modal::Closed);
        let book = api.collection().get(BookId(1)).unwrap();
        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.author, "Herbert");
    }

    #[test]
    fn editing_unknown_book_is_an_error() {
        let mut api = api();
        assert!(matches!(
            api.begin_edit(BookId(99)),
            Err(ShelfError::BookNotFound(BookId(99)))
        ));
        assert_eq!(api.modal(), Modal::Closed);
    }

    #[test]
    fn only_one_form_is_ever_open() {
        let mut api = api();
        api.begin_edit(BookId(2)).unwrap();
        api.begin_add();
        assert_eq!(api.modal(), Modal::Adding);
        api.begin_edit(BookId(1)).unwrap();
        assert_eq!(api.modal(), Modal::Editing(BookId(1)));
        api.close();
        assert_eq!(api.modal(), Modal::Closed);
    }

    #[test]
    fn invalid_submit_keeps_form_open() {
        let mut api = api();
        api.begin_add();
        api.set_title("Dune").unwrap();

        let err = api.submit().err().unwrap();
        assert!(matches!(err, ShelfError::Form(FormError::Required("author"))));
        assert_eq!(api.modal(), Modal::Adding);
        assert_eq!(api.form().unwrap().title, "Dune");
        assert_eq!(api.collection().len(), 2);
    }

    #[test]
    fn bad_number_is_not_coerced() {
        let mut api = api();
        api.begin_add();
        api.set_title("Dune").unwrap();
        api.set_author("Herbert").unwrap();
        api.set_pages("lots").unwrap();

        assert!(api.submit().is_err());
        assert_eq!(api.collection().len(), 2);
    }

    #[test]
    fn field_updates_need_an_open_form() {
        let mut api = api();
        assert!(matches!(api.set_title("x"), Err(ShelfError::NoActiveForm)));
        assert!(matches!(api.submit(), Err(ShelfError::NoActiveForm)));
    }

    #[test]
    fn new_cover_is_registered_on_submit() {
        let mut api = api();
        api.begin_add();
        api.set_title("Dune").unwrap();
        api.set_author("Herbert").unwrap();
        api.set_cover("dune.png").unwrap();
        assert_eq!(api.covers().live_count(), 0);

        let result = api.submit().unwrap();
        let reference = result.affected_books[0].cover.clone().unwrap();
        assert!(api.covers().is_live(&reference));
    }

    #[test]
    fn replacing_cover_through_edit_releases_old() {
        let mut api = api_with(StoreFixture::new().build());
        api.begin_add();
        api.set_title("Dune").unwrap();
        api.set_author("Herbert").unwrap();
        api.set_cover("first.png").unwrap();
        let book = api.submit().unwrap().affected_books.remove(0);
        let first = book.cover.clone().unwrap();

        api.begin_edit(book.id).unwrap();
        api.set_cover("second.png").unwrap();
        let updated = api.submit().unwrap().affected_books.remove(0);

        assert!(!api.covers().is_live(&first));
        assert!(api.covers().is_live(updated.cover.as_deref().unwrap()));
        assert_eq!(api.covers().live_count(), 1);
    }

    #[test]
    fn edit_of_vanished_book_is_silent_and_closes() {
        let mut api = api();
        api.begin_edit(BookId(1)).unwrap();
        api.delete_book(BookId(1), &mut Always(true)).unwrap();

        let result = api.submit().unwrap();
        assert!(!result.changed());
        assert_eq!(api.modal(), Modal::Closed);
        assert_eq!(api.collection().len(), 1);
    }

    #[test]
    fn cards_follow_the_query() {
        let mut api = api();
        api.set_query("EM");
        let cards = api.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].book.title, "Emma");
        assert_eq!(api.list_books().unwrap().listed_books.len(), 1);

        api.set_query("");
        assert_eq!(api.cards().len(), 2);
    }

    #[test]
    fn toggle_and_delete_dispatch() {
        let mut api = api();
        api.toggle_read(BookId(2)).unwrap();
        assert!(api.collection().get(BookId(2)).unwrap().read);

        api.delete_book(BookId(2), &mut Always(false)).unwrap();
        assert_eq!(api.collection().len(), 2);
        api.delete_book(BookId(2), &mut Always(true)).unwrap();
        assert_eq!(api.collection().len(), 1);
    }

    #[test]
    fn edit_closes_even_when_old_cover_cannot_be_released() {
        let store = StoreFixture::new().with_book("Dune", "Herbert").build();
        let mut api = ShelfApi::open(store, KEY, StuckCovers::default()).unwrap();
        api.begin_edit(BookId(1)).unwrap();
        api.set_cover("first.png").unwrap();
        api.submit().unwrap();

        api.begin_edit(BookId(1)).unwrap();
        api.set_cover("second.png").unwrap();
        let result = api.submit().unwrap();

        assert!(result.changed());
        assert_eq!(api.modal(), Modal::Closed);
        assert!(api.form().is_none());
        let cover = api.collection().get(BookId(1)).unwrap().cover.clone().unwrap();
        assert!(cover.ends_with("second.png"));
        assert_eq!(api.covers().failed_releases, 1);
    }
}
