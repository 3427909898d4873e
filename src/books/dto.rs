use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub total_copies: i64,
    pub available_copies: i64,
    pub borrowed_copies: i64,
    pub checkout_count: i64,
    pub publication_year: i32,
}

impl Book for BookDto {
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

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            genre: other.genre.to_string(),
            total_copies: other.total_copies,
            available_copies: other.available_copies,
            borrowed_copies: other.borrowed_copies(),
            checkout_count: other.checkout_count,
            publication_year: other.publication_year,
        }
    }
}

/// Partial update of a book; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub total_copies: Option<i64>,
    pub publication_year: Option<i32>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.genre.is_none()
            && self.total_copies.is_none() && self.publication_year.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchField {
    Title,
    Author,
    Genre,
    Any,
}

// BookFilter matches a case-insensitive substring of the chosen field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookFilter {
    pub field: SearchField,
    pub term: String,
}

impl BookFilter {
    pub fn new(field: SearchField, term: &str) -> Self {
        Self {
            field,
            term: term.to_string(),
        }
    }

    pub fn title(term: &str) -> Self {
        Self::new(SearchField::Title, term)
    }

    pub fn author(term: &str) -> Self {
        Self::new(SearchField::Author, term)
    }

    pub fn genre(term: &str) -> Self {
        Self::new(SearchField::Genre, term)
    }

    pub fn matches(&self, book: &BookEntity) -> bool {
        let term = self.term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        let contains = |value: &str| value.to_lowercase().contains(term.as_str());
        match self.field {
            SearchField::Title => contains(&book.title),
            SearchField::Author => contains(&book.author),
            SearchField::Genre => contains(&book.genre),
            SearchField::Any => contains(&book.title) || contains(&book.author) || contains(&book.genre),
        }
    }
}
