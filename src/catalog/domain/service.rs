use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::{debug, info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::dto::{BookDto, BookFilter, BookPatch};
use crate::catalog::domain::CatalogService;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::core::store::SharedStore;
use crate::gateway::events::{EventPublisher, publish_committed};

pub(crate) struct CatalogServiceImpl {
    store: SharedStore,
    events_publisher: Arc<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub(crate) fn new(store: SharedStore, events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            store,
            events_publisher,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book_id: &str, title: &str, author: &str, genre: &str,
                      total_copies: i64, publication_year: i32) -> LibraryResult<BookDto> {
        let book = {
            let mut store = self.store.write().await;
            let entity = BookEntity::new(book_id, title, author, genre, total_copies, publication_year);
            store.catalog.add(entity).map(BookDto::from).map_err(|err| {
                warn!(book_id, "rejected new book: {}", err);
                err
            })?
        };
        info!(book_id = %book.book_id, total_copies = book.total_copies, "added book");
        publish_committed(self.events_publisher.as_ref(), DomainEvent::added(
            "book_added", "books", book.book_id.as_str(), &HashMap::new(), &book)).await;
        Ok(book)
    }

    async fn update_book(&self, book_id: &str, patch: &BookPatch) -> LibraryResult<BookDto> {
        if patch.is_empty() {
            debug!(book_id, "empty book update");
            return self.find_book_by_id(book_id).await;
        }
        let book = {
            let mut store = self.store.write().await;
            store.catalog.update(book_id, patch).map(BookDto::from).map_err(|err| {
                warn!(book_id, "rejected book update: {}", err);
                err
            })?
        };
        info!(book_id = %book.book_id, total_copies = book.total_copies,
              available_copies = book.available_copies, "updated book");
        publish_committed(self.events_publisher.as_ref(), DomainEvent::updated(
            "book_updated", "books", book.book_id.as_str(), &HashMap::new(), &book)).await;
        Ok(book)
    }

    async fn find_books(&self, filter: &BookFilter) -> LibraryResult<Vec<BookDto>> {
        let store = self.store.read().await;
        let books: Vec<BookDto> = store.catalog.find(filter).into_iter().map(BookDto::from).collect();
        debug!(field = ?filter.field, term = %filter.term, found = books.len(), "searched books");
        Ok(books)
    }

    async fn find_book_by_id(&self, book_id: &str) -> LibraryResult<BookDto> {
        self.store.read().await.catalog.get(book_id).map(BookDto::from)
    }

    async fn list_books(&self) -> LibraryResult<Vec<BookDto>> {
        Ok(self.store.read().await.catalog.books().iter().map(BookDto::from).collect())
    }

    async fn exists(&self, book_id: &str) -> bool {
        self.store.read().await.catalog.exists(book_id)
    }
}
