use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddBookCommandRequest {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub total_copies: i64,
    pub publication_year: i32,
}

impl AddBookCommandRequest {
    pub fn new(book_id: &str, title: &str, author: &str, genre: &str,
               total_copies: i64, publication_year: i32) -> Self {
        Self {
            book_id: book_id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            total_copies,
            publication_year,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(req.book_id.as_str(), req.title.as_str(), req.author.as_str(),
                                      req.genre.as_str(), req.total_copies, req.publication_year)
            .await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::store::AppState;
    use crate::gateway::GatewayPublisherVia;

    fn build_command() -> AddBookCommand {
        let state = AppState::new(Configuration::new(), GatewayPublisherVia::Logs).expect("should build state");
        AddBookCommand::new(factory::create_catalog_service(&state))
    }

    #[tokio::test]
    async fn test_should_run_add_book() {
        let cmd = build_command();
        let res = cmd.execute(AddBookCommandRequest::new("B001", "Python Programming", "John Smith", "Technology", 5, 2022))
            .await.expect("should add book");
        assert_eq!("B001", res.book.book_id.as_str());
        assert_eq!(5, res.book.available_copies);
    }

    #[tokio::test]
    async fn test_should_parse_request_and_reject_zero_copies() {
        let cmd = build_command();
        let req: AddBookCommandRequest = serde_json::from_str(
            r#"{"book_id":"B009","title":"Empty Shelf","author":"Nobody","genre":"None","total_copies":0,"publication_year":2020}"#)
            .expect("should parse request");
        let res = cmd.execute(req).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
