use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::library::{LibraryError, LibraryResult};

// BookEntity abstracts a catalog title; the library owns `total_copies` physical
// copies of it and `total_copies - available_copies` of them are on loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub total_copies: i64,
    pub available_copies: i64,
    pub checkout_count: i64,
    pub publication_year: i32,
}

impl BookEntity {
    pub fn new(book_id: &str, title: &str, author: &str, genre: &str,
               total_copies: i64, publication_year: i32) -> Self {
        Self {
            book_id: book_id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            total_copies,
            available_copies: total_copies,
            checkout_count: 0,
            publication_year,
        }
    }

    // takes one copy off the shelf
    pub(crate) fn reserve_copy(&mut self) -> LibraryResult<()> {
        if self.available_copies <= 0 {
            return Err(LibraryError::unavailable(format!("book is not available {}",
                                                         self.book_id).as_str(), Some("no_copies".to_string()), false));
        }
        self.available_copies -= 1;
        self.checkout_count += 1;
        Ok(())
    }

    pub(crate) fn release_copy(&mut self) -> LibraryResult<()> {
        if self.available_copies >= self.total_copies {
            return Err(LibraryError::internal(format!("releasing a copy of {} would exceed its {} total copies",
                                                      self.book_id, self.total_copies).as_str()));
        }
        self.available_copies += 1;
        Ok(())
    }

    // resizes the holding while keeping every borrowed copy accounted for
    pub(crate) fn resize(&mut self, total_copies: i64) -> LibraryResult<()> {
        let borrowed = self.borrowed_copies();
        if total_copies <= 0 {
            return Err(LibraryError::validation(format!("total copies must be greater than 0 for {}",
                                                        self.book_id).as_str(), Some("total_copies".to_string())));
        }
        if total_copies < borrowed {
            return Err(LibraryError::validation(format!("total copies {} cannot be less than {} borrowed copies of {}",
                                                        total_copies, borrowed, self.book_id).as_str(), Some("total_copies".to_string())));
        }
        self.total_copies = total_copies;
        self.available_copies = total_copies - borrowed;
        Ok(())
    }
}

impl Book for BookEntity {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn total_copies(&self) -> i64 {
        self.total_copies
    }

    fn available_copies(&self) -> i64 {
        self.available_copies
    }
}
