use async_trait::async_trait;
use chrono::NaiveDate;
use crate::checkout::dto::{CheckoutDto, ReturnReceiptDto};
use crate::core::library::LibraryResult;

pub mod model;
pub mod service;

#[async_trait]
pub trait CheckoutService: Sync + Send {
    async fn checkout(&self, book_id: &str, borrower_id: &str, borrower_name: &str,
                      today: NaiveDate) -> LibraryResult<CheckoutDto>;
    async fn returned(&self, checkout_id: &str, today: NaiveDate) -> LibraryResult<ReturnReceiptDto>;
    async fn active_loan_count(&self, borrower_id: &str) -> LibraryResult<i64>;
    async fn active_loans(&self, borrower_id: &str) -> LibraryResult<Vec<CheckoutDto>>;
    async fn find_checkout_by_id(&self, checkout_id: &str) -> LibraryResult<CheckoutDto>;
}
