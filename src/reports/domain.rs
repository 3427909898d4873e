pub mod service;

use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::NaiveDate;
use crate::books::dto::BookDto;
use crate::core::library::LibraryResult;
use crate::reports::dto::{BorrowerActivityDto, InventorySummaryDto, OverdueLoanDto, SystemStatusDto, TransactionSummaryDto};

/// Read-only aggregations over the catalog and the ledger. Every call works on
/// one consistent snapshot of both.
#[async_trait]
pub trait ReportService: Sync + Send {
    async fn overdue_loans(&self, as_of: NaiveDate) -> LibraryResult<Vec<OverdueLoanDto>>;
    async fn inventory_summary(&self) -> LibraryResult<InventorySummaryDto>;
    async fn popularity_ranking(&self, top_n: usize) -> LibraryResult<Vec<BookDto>>;
    async fn high_demand_books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn borrower_activity(&self) -> LibraryResult<BTreeMap<String, BorrowerActivityDto>>;
    async fn transaction_summary(&self, as_of: NaiveDate, recent_limit: usize) -> LibraryResult<TransactionSummaryDto>;
    async fn system_status(&self, as_of: NaiveDate) -> LibraryResult<SystemStatusDto>;
}
