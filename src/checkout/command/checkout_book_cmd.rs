use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::CheckoutDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::serializer;

pub struct CheckoutBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl CheckoutBookCommand {
    pub fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckoutBookCommandRequest {
    pub book_id: String,
    pub borrower_id: String,
    pub borrower_name: String,
    #[serde(with = "serializer")]
    pub today: NaiveDate,
}

impl CheckoutBookCommandRequest {
    pub fn new(book_id: &str, borrower_id: &str, borrower_name: &str, today: NaiveDate) -> Self {
        Self {
            book_id: book_id.to_string(),
            borrower_id: borrower_id.to_string(),
            borrower_name: borrower_name.to_string(),
            today,
        }
    }
}


#[derive(Debug, Serialize)]
pub struct CheckoutBookCommandResponse {
    pub checkout: CheckoutDto,
}

impl CheckoutBookCommandResponse {
    pub fn new(checkout: CheckoutDto) -> Self {
        Self {
            checkout,
        }
    }
}

#[async_trait]
impl Command<CheckoutBookCommandRequest, CheckoutBookCommandResponse> for CheckoutBookCommand {
    async fn execute(&self, req: CheckoutBookCommandRequest) -> Result<CheckoutBookCommandResponse, CommandError> {
        self.checkout_service.checkout(req.book_id.as_str(), req.borrower_id.as_str(),
                                       req.borrower_name.as_str(), req.today)
            .await.map_err(CommandError::from).map(CheckoutBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory::create_catalog_service;
    use crate::checkout::command::checkout_book_cmd::{CheckoutBookCommand, CheckoutBookCommandRequest};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::CheckoutStatus;
    use crate::core::store::AppState;
    use crate::gateway::GatewayPublisherVia;
    use crate::utils::date::parse_date;

    #[tokio::test]
    async fn test_should_run_checkout_book() {
        let state = AppState::new(Configuration::new(), GatewayPublisherVia::Logs).expect("should build state");
        let add_cmd = AddBookCommand::new(create_catalog_service(&state));
        let checkout_cmd = CheckoutBookCommand::new(create_checkout_service(&state));

        let _ = add_cmd.execute(AddBookCommandRequest::new("B002", "Data Structures", "Jane Doe", "Computer Science", 1, 2021))
            .await.expect("should add book");

        let req: CheckoutBookCommandRequest = serde_json::from_str(
            r#"{"book_id":"B002","borrower_id":"S010","borrower_name":"Sam","today":"2024-03-01"}"#)
            .expect("should parse request");
        let res = checkout_cmd.execute(req).await.expect("should checkout book");
        assert_eq!("T001", res.checkout.checkout_id.as_str());
        assert_eq!(CheckoutStatus::Active, res.checkout.checkout_status);
        assert_eq!(parse_date("2024-03-15").expect("should parse"), res.checkout.due_date);

        let req = CheckoutBookCommandRequest::new("B002", "S011", "Kim", parse_date("2024-03-01").expect("should parse"));
        match checkout_cmd.execute(req).await {
            Err(CommandError::Unavailable { retryable, .. }) => assert!(!retryable),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
