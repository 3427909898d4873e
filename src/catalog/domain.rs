pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::books::dto::{BookDto, BookFilter, BookPatch};
use crate::core::library::LibraryResult;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, book_id: &str, title: &str, author: &str, genre: &str,
                      total_copies: i64, publication_year: i32) -> LibraryResult<BookDto>;
    async fn update_book(&self, book_id: &str, patch: &BookPatch) -> LibraryResult<BookDto>;
    async fn find_books(&self, filter: &BookFilter) -> LibraryResult<Vec<BookDto>>;
    async fn find_book_by_id(&self, book_id: &str) -> LibraryResult<BookDto>;
    async fn list_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn exists(&self, book_id: &str) -> bool;
}
