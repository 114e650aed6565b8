use super::banner::Banners;
use super::form::FormState;
use crate::model::{Book, BookId};

/// Everything the view renders.
///
/// `books` is a cache of the last fetch, patched after each successful
/// mutation; the backend stays the source of truth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeskState {
    pub books: Vec<Book>,
    pub search_query: String,
    pub form: FormState,
    pub banners: Banners,
    pub loading: bool,
}

impl DeskState {
    pub fn book(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|book| &book.id == id)
    }

    /// Swaps the cached entry for `id` with `book`, keeping its position.
    /// Returns whether an entry was replaced.
    pub fn replace_book(&mut self, id: &BookId, book: Book) -> bool {
        match self.books.iter_mut().find(|cached| &cached.id == id) {
            Some(cached) => {
                *cached = book;
                true
            }
            None => false,
        }
    }

    pub fn append_book(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Drops the cached entry for `id`. Returns whether one was removed.
    pub fn remove_book(&mut self, id: &BookId) -> bool {
        let before = self.books.len();
        self.books.retain(|book| &book.id != id);
        self.books.len() != before
    }

    /// Applies a mutation result to the cache. Returns whether the list
    /// changed.
    pub fn apply(&mut self, patch: &CachePatch) -> bool {
        match patch {
            CachePatch::Replace(id, book) => self.replace_book(id, book.clone()),
            CachePatch::Append(book) => {
                // A fetch may already have picked the new book up.
                if !self.replace_book(&book.id, book.clone()) {
                    self.append_book(book.clone());
                }
                true
            }
            CachePatch::Remove(id) => self.remove_book(id),
        }
    }
}

/// A confirmed mutation, as it applies to the cached list.
#[derive(Debug, Clone, PartialEq)]
pub enum CachePatch {
    Replace(BookId, Book),
    Append(Book),
    Remove(BookId),
}
