use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::{BookDto, BookFilter, SearchField};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct FindBooksCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl FindBooksCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FindBooksCommandRequest {
    pub field: SearchField,
    #[serde(default)]
    pub term: String,
}

impl FindBooksCommandRequest {
    pub fn new(field: SearchField, term: &str) -> Self {
        Self {
            field,
            term: term.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FindBooksCommandResponse {
    pub books: Vec<BookDto>,
}

#[async_trait]
impl Command<FindBooksCommandRequest, FindBooksCommandResponse> for FindBooksCommand {
    async fn execute(&self, req: FindBooksCommandRequest) -> Result<FindBooksCommandResponse, CommandError> {
        let filter = BookFilter::new(req.field, req.term.as_str());
        self.catalog_service.find_books(&filter)
            .await.map_err(CommandError::from).map(|books| FindBooksCommandResponse { books })
    }
}

#[cfg(test)]
mod tests {
    use crate::books::dto::SearchField;
    use crate::catalog::command::find_books_cmd::{FindBooksCommand, FindBooksCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::store::AppState;
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_run_find_books() {
        let state = AppState::new(Configuration::new(), GatewayPublisherVia::Logs).expect("should build state");
        let catalog_svc = factory::create_catalog_service(&state);
        let _ = catalog_svc.add_book("B001", "Python Programming", "John Smith", "Technology", 5, 2022).await.expect("should add book");
        let _ = catalog_svc.add_book("B002", "Data Structures", "Jane Doe", "Computer Science", 3, 2021).await.expect("should add book");

        let cmd = FindBooksCommand::new(factory::create_catalog_service(&state));
        let res = cmd.execute(FindBooksCommandRequest::new(SearchField::Author, "DOE")).await.expect("should find books");
        assert_eq!(1, res.books.len());
        assert_eq!("B002", res.books[0].book_id.as_str());

        let req: FindBooksCommandRequest = serde_json::from_str(r#"{"field":"Any"}"#).expect("should parse request");
        assert_eq!(2, cmd.execute(req).await.expect("should find books").books.len());
    }
}
