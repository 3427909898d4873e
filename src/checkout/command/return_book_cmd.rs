use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::ReturnReceiptDto;
use crate::core::command::{Command, CommandError};
use crate::utils::date::serializer;

pub struct ReturnBookCommand {
    checkout_service: Box<dyn CheckoutService>,
}

impl ReturnBookCommand {
    pub fn new(checkout_service: Box<dyn CheckoutService>) -> Self {
        Self {
            checkout_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReturnBookCommandRequest {
    pub checkout_id: String,
    #[serde(with = "serializer")]
    pub today: NaiveDate,
}

impl ReturnBookCommandRequest {
    pub fn new(checkout_id: &str, today: NaiveDate) -> Self {
        Self {
            checkout_id: checkout_id.to_string(),
            today,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReturnBookCommandResponse {
    pub receipt: ReturnReceiptDto,
}

impl ReturnBookCommandResponse {
    pub fn new(receipt: ReturnReceiptDto) -> Self {
        Self {
            receipt,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.checkout_service.returned(req.checkout_id.as_str(), req.today)
            .await.map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}
