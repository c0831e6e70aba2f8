use crate::collection::BookCollection;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Book;
use crate::store::KeyValueStore;

/// Case-insensitive substring match on the title. An empty query matches all.
pub fn matches(book: &Book, query: &str) -> bool {
    let query = query.to_lowercase();
    book.title.to_lowercase().contains(&query)
}

/// Books whose title contains `query`, in collection order.
pub fn filter<'a>(books: &'a [Book], query: &str) -> Vec<&'a Book> {
    books.iter().filter(|b| matches(b, query)).collect()
}

pub fn run<S: KeyValueStore>(collection: &BookCollection<S>, query: &str) -> Result<CmdResult> {
    let listed = filter(collection.books(), query).into_iter().cloned().collect();
    Ok(CmdResult::default().with_listed_books(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{StoreFixture, KEY};

    fn collection() -> BookCollection<crate::store::memory::InMemoryStore> {
        let store = StoreFixture::new()
            .with_book("Dune", "Herbert")
            .with_book("Emma", "Austen")
            .with_book("Children of DUNE", "Herbert")
            .with_book("Redundant Systems", "Dunham")
            .build();
        BookCollection::load(store, KEY).unwrap()
    }

    fn titles(result: &CmdResult) -> Vec<&str> {
        result.listed_books.iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn matches_title_substring_in_any_case() {
        let collection = collection();
        for query in ["dun", "DUN", "Dun"] {
            let result = run(&collection, query).unwrap();
            assert_eq!(
                titles(&result),
                vec!["Dune", "Children of DUNE", "Redundant Systems"]
            );
        }
    }

    #[test]
    fn does_not_search_author() {
        let collection = collection();
        let result = run(&collection, "austen").unwrap();
        assert!(result.listed_books.is_empty());
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let collection = collection();
        let result = run(&collection, "").unwrap();
        assert_eq!(
            titles(&result),
            vec!["Dune", "Emma", "Children of DUNE", "Redundant Systems"]
        );
    }

    #[test]
    fn does_not_touch_the_store() {
        let collection = collection();
        run(&collection, "dune").unwrap();
        assert_eq!(collection.store().writes(), 0);
        assert_eq!(collection.len(), 4);
    }

    #[test]
    fn single_book_predicate() {
        let collection = collection();
        assert!(matches(&collection.books()[0], "UNE"));
        assert!(!matches(&collection.books()[1], "une"));
    }
}
