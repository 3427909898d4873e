use serde::{Deserialize, Serialize};
use crate::checkout::dto::CheckoutDto;
use crate::core::domain::Configuration;

// OverdueLoanDto is one active loan past its due date with the fine it would owe today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueLoanDto {
    pub checkout: CheckoutDto,
    pub book_title: String,
    pub days_overdue: i64,
    pub projected_fine: f64,
}

// InventorySummaryDto totals copies across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySummaryDto {
    pub total_titles: i64,
    pub total_copies: i64,
    pub available_copies: i64,
    pub borrowed_copies: i64,
    /// `None` when the catalog holds no copies at all.
    pub utilization_rate: Option<f64>,
    pub available_books: Vec<String>,
    pub unavailable_books: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerActivityDto {
    pub name: String,
    pub total_loans: i64,
    pub active_loans: i64,
    pub total_fines_accrued: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummaryDto {
    pub total_transactions: i64,
    pub active_loans: i64,
    pub completed_returns: i64,
    pub total_fines_collected: f64,
    pub pending_fines: f64,
    pub recent: Vec<CheckoutDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatusDto {
    pub total_titles: i64,
    pub total_copies: i64,
    pub available_copies: i64,
    pub active_loans: i64,
    pub overdue_loans: i64,
    pub configuration: Configuration,
}
