use std::collections::HashMap;
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookFilter, BookPatch};
use crate::core::library::{LibraryError, LibraryResult};

// Catalog owns the book records in insertion order. Copy counts only change
// through add/update here and reserve/release driven by the loan ledger.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<BookEntity>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<BookEntity>) -> LibraryResult<Self> {
        let mut catalog = Self::new();
        for book in books {
            validate_book(&book)?;
            if book.available_copies < 0 || book.available_copies > book.total_copies {
                return Err(LibraryError::validation(format!("available copies {} of {} must be within 0..={}",
                                                            book.available_copies, book.book_id, book.total_copies).as_str(), Some("available_copies".to_string())));
            }
            if book.checkout_count < 0 {
                return Err(LibraryError::validation(format!("checkout count of {} cannot be negative",
                                                            book.book_id).as_str(), Some("checkout_count".to_string())));
            }
            catalog.insert(book)?;
        }
        Ok(catalog)
    }

    pub fn add(&mut self, book: BookEntity) -> LibraryResult<&BookEntity> {
        validate_book(&book)?;
        self.insert(book)
    }

    fn insert(&mut self, book: BookEntity) -> LibraryResult<&BookEntity> {
        if self.index.contains_key(&book.book_id) {
            return Err(LibraryError::duplicate_key(format!("book with id {} already exists",
                                                           book.book_id).as_str()));
        }
        let pos = self.books.len();
        self.index.insert(book.book_id.to_string(), pos);
        self.books.push(book);
        Ok(&self.books[pos])
    }

    // applies every field of the patch or none of them
    pub fn update(&mut self, book_id: &str, patch: &BookPatch) -> LibraryResult<&BookEntity> {
        let existing = self.get_mut(book_id)?;
        let mut updated = existing.clone();
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(LibraryError::validation(format!("title cannot be blank for {}",
                                                            book_id).as_str(), Some("title".to_string())));
            }
            updated.title = title.to_string();
        }
        if let Some(author) = &patch.author {
            updated.author = author.to_string();
        }
        if let Some(genre) = &patch.genre {
            updated.genre = genre.to_string();
        }
        if let Some(total_copies) = patch.total_copies {
            updated.resize(total_copies)?;
        }
        if let Some(year) = patch.publication_year {
            updated.publication_year = year;
        }
        *existing = updated;
        Ok(&*existing)
    }

    pub fn get(&self, book_id: &str) -> LibraryResult<&BookEntity> {
        self.index.get(book_id)
            .and_then(|pos| self.books.get(*pos))
            .ok_or_else(|| LibraryError::not_found(format!("book with id {} not found", book_id).as_str()))
    }

    fn get_mut(&mut self, book_id: &str) -> LibraryResult<&mut BookEntity> {
        match self.index.get(book_id) {
            Some(pos) => self.books.get_mut(*pos).ok_or_else(|| {
                LibraryError::internal(format!("catalog index points past the end for {}", book_id).as_str())
            }),
            None => Err(LibraryError::not_found(format!("book with id {} not found", book_id).as_str())),
        }
    }

    pub fn exists(&self, book_id: &str) -> bool {
        self.index.contains_key(book_id)
    }

    pub fn find(&self, filter: &BookFilter) -> Vec<&BookEntity> {
        self.books.iter().filter(|b| filter.matches(b)).collect()
    }

    pub fn books(&self) -> &[BookEntity] {
        self.books.as_slice()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub(crate) fn reserve_copy(&mut self, book_id: &str) -> LibraryResult<&BookEntity> {
        let book = self.get_mut(book_id)?;
        book.reserve_copy()?;
        Ok(&*book)
    }

    pub(crate) fn release_copy(&mut self, book_id: &str) -> LibraryResult<&BookEntity> {
        let book = self.get_mut(book_id)?;
        book.release_copy()?;
        Ok(&*book)
    }
}

fn validate_book(book: &BookEntity) -> LibraryResult<()> {
    if book.book_id.trim().is_empty() {
        return Err(LibraryError::validation("book id cannot be blank", Some("book_id".to_string())));
    }
    if book.title.trim().is_empty() {
        return Err(LibraryError::validation(format!("title cannot be blank for {}",
                                                    book.book_id).as_str(), Some("title".to_string())));
    }
    if book.total_copies <= 0 {
        return Err(LibraryError::validation(format!("total copies must be greater than 0 for {}",
                                                    book.book_id).as_str(), Some("total_copies".to_string())));
    }
    Ok(())
}
