use std::collections::BTreeMap;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::checkout::dto::CheckoutDto;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::store::{LibraryStore, SharedStore};
use crate::policy::LoanPolicy;
use crate::reports::domain::ReportService;
use crate::reports::dto::{BorrowerActivityDto, InventorySummaryDto, OverdueLoanDto, SystemStatusDto, TransactionSummaryDto};

pub(crate) struct ReportServiceImpl {
    config: Configuration,
    policy: LoanPolicy,
    store: SharedStore,
}

impl ReportServiceImpl {
    pub(crate) fn new(config: &Configuration, store: SharedStore) -> Self {
        Self {
            config: config.clone(),
            policy: LoanPolicy::new(config),
            store,
        }
    }

    // the read guard is held only while cloning
    async fn snapshot(&self) -> LibraryStore {
        self.store.read().await.clone()
    }
}

fn overdue_rows(store: &LibraryStore, policy: &LoanPolicy, as_of: NaiveDate) -> Vec<OverdueLoanDto> {
    store.ledger.records().iter()
        .filter(|checkout| checkout.is_active())
        .filter_map(|checkout| {
            let days_overdue = policy.days_overdue(checkout.due_date, as_of);
            if days_overdue == 0 {
                return None;
            }
            let book_title = store.catalog.get(checkout.book_id.as_str())
                .map(|book| book.title().to_string())
                .unwrap_or_default();
            Some(OverdueLoanDto {
                checkout: CheckoutDto::from(checkout),
                book_title,
                days_overdue,
                projected_fine: policy.fine(checkout.due_date, as_of),
            })
        })
        .collect()
}

fn copy_totals(books: &[BookEntity]) -> (i64, i64) {
    books.iter().fold((0, 0), |(total, available), book| {
        (total + book.total_copies(), available + book.available_copies())
    })
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    async fn overdue_loans(&self, as_of: NaiveDate) -> LibraryResult<Vec<OverdueLoanDto>> {
        let snapshot = self.snapshot().await;
        let rows = overdue_rows(&snapshot, &self.policy, as_of);
        debug!(as_of = %as_of, overdue = rows.len(), "listed overdue loans");
        Ok(rows)
    }

    async fn inventory_summary(&self) -> LibraryResult<InventorySummaryDto> {
        let snapshot = self.snapshot().await;
        let books = snapshot.catalog.books();
        let (total_copies, available_copies) = copy_totals(books);
        let borrowed_copies = total_copies - available_copies;
        let utilization_rate = if total_copies > 0 {
            Some(borrowed_copies as f64 / total_copies as f64)
        } else {
            None
        };
        let (available, unavailable): (Vec<&BookEntity>, Vec<&BookEntity>) = books.iter().partition(|book| book.is_available());
        Ok(InventorySummaryDto {
            total_titles: books.len() as i64,
            total_copies,
            available_copies,
            borrowed_copies,
            utilization_rate,
            available_books: available.into_iter().map(|book| book.book_id.to_string()).collect(),
            unavailable_books: unavailable.into_iter().map(|book| book.book_id.to_string()).collect(),
        })
    }

    async fn popularity_ranking(&self, top_n: usize) -> LibraryResult<Vec<BookDto>> {
        let snapshot = self.snapshot().await;
        let mut books: Vec<&BookEntity> = snapshot.catalog.books().iter().collect();
        // stable sort keeps catalog order among equal counts
        books.sort_by(|a, b| b.checkout_count.cmp(&a.checkout_count));
        Ok(books.into_iter().take(top_n).map(BookDto::from).collect())
    }

    async fn high_demand_books(&self) -> LibraryResult<Vec<BookDto>> {
        let snapshot = self.snapshot().await;
        Ok(snapshot.catalog.books().iter()
            .filter(|book| book.checkout_count > self.config.high_demand_threshold)
            .map(BookDto::from)
            .collect())
    }

    async fn borrower_activity(&self) -> LibraryResult<BTreeMap<String, BorrowerActivityDto>> {
        let snapshot = self.snapshot().await;
        let mut activity: BTreeMap<String, BorrowerActivityDto> = BTreeMap::new();
        for checkout in snapshot.ledger.records() {
            let entry = activity.entry(checkout.borrower_id.to_string()).or_insert_with(|| BorrowerActivityDto {
                name: checkout.borrower_name.to_string(),
                total_loans: 0,
                active_loans: 0,
                total_fines_accrued: 0.0,
            });
            entry.total_loans += 1;
            if checkout.is_active() {
                entry.active_loans += 1;
            }
            entry.total_fines_accrued += checkout.fine;
        }
        Ok(activity)
    }

    async fn transaction_summary(&self, as_of: NaiveDate, recent_limit: usize) -> LibraryResult<TransactionSummaryDto> {
        let snapshot = self.snapshot().await;
        let records = snapshot.ledger.records();
        let active_loans = records.iter().filter(|checkout| checkout.is_active()).count() as i64;
        let pending_fines: f64 = overdue_rows(&snapshot, &self.policy, as_of).iter()
            .map(|row| row.projected_fine)
            .sum();
        let skip = records.len().saturating_sub(recent_limit);
        Ok(TransactionSummaryDto {
            total_transactions: records.len() as i64,
            active_loans,
            completed_returns: records.len() as i64 - active_loans,
            total_fines_collected: records.iter().map(|checkout| checkout.fine).sum(),
            pending_fines,
            recent: records[skip..].iter().map(CheckoutDto::from).collect(),
        })
    }

    async fn system_status(&self, as_of: NaiveDate) -> LibraryResult<SystemStatusDto> {
        let snapshot = self.snapshot().await;
        let (total_copies, available_copies) = copy_totals(snapshot.catalog.books());
        Ok(SystemStatusDto {
            total_titles: snapshot.catalog.len() as i64,
            total_copies,
            available_copies,
            active_loans: snapshot.ledger.records().iter().filter(|checkout| checkout.is_active()).count() as i64,
            overdue_loans: overdue_rows(&snapshot, &self.policy, as_of).len() as i64,
            configuration: self.config.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::books::domain::model::BookEntity;
    use crate::catalog::domain::model::Catalog;
    use crate::checkout::domain::model::{CheckoutEntity, LoanLedger};
    use crate::checkout::factory::create_checkout_service;
    use crate::core::domain::Configuration;
    use crate::core::library::CheckoutStatus;
    use crate::core::store::{AppState, LibraryStore};
    use crate::gateway::GatewayPublisherVia;
    use crate::reports::factory::create_report_service;
    use crate::utils::date::parse_date;

    fn day(s: &str) -> NaiveDate {
        parse_date(s).expect("should parse date")
    }

    fn book(id: &str, title: &str, total: i64, available: i64, count: i64) -> BookEntity {
        let mut book = BookEntity::new(id, title, "Author", "Technology", total, 2022);
        book.available_copies = available;
        book.checkout_count = count;
        book
    }

    fn seeded_state() -> AppState {
        let mut returned = CheckoutEntity::new("T002", "B002", "S002", "David Brown", day("2024-01-10"), day("2024-01-24"));
        returned.checkout_status = CheckoutStatus::Returned;
        returned.return_date = Some(day("2024-01-28"));
        returned.fine = 8.0;
        let catalog = Catalog::with_books(vec![
            book("B001", "Python Programming", 5, 4, 15),
            book("B002", "Data Structures", 3, 3, 25),
            book("B003", "Web Development", 4, 4, 15),
        ]).expect("should build catalog");
        let ledger = LoanLedger::with_records(vec![
            CheckoutEntity::new("T001", "B001", "S001", "Alice Johnson", day("2024-01-15"), day("2024-01-29")),
            returned,
        ]).expect("should build ledger");
        let store = LibraryStore::new(catalog, ledger).expect("should build store");
        AppState::with_store(Configuration::new(), store, GatewayPublisherVia::Logs).expect("should build state")
    }

    #[tokio::test]
    async fn test_should_list_overdue_loans() {
        let state = seeded_state();
        let reports = create_report_service(&state);

        assert!(reports.overdue_loans(day("2024-01-29")).await.expect("should list").is_empty());
        let rows = reports.overdue_loans(day("2024-02-03")).await.expect("should list");
        assert_eq!(1, rows.len());
        assert_eq!("T001", rows[0].checkout.checkout_id.as_str());
        assert_eq!("Python Programming", rows[0].book_title.as_str());
        assert_eq!(5, rows[0].days_overdue);
        assert_eq!(10.0, rows[0].projected_fine);

        let again = reports.overdue_loans(day("2024-02-03")).await.expect("should list");
        assert_eq!(rows, again);
    }

    #[tokio::test]
    async fn test_should_summarize_inventory() {
        let state = seeded_state();
        let reports = create_report_service(&state);
        let summary = reports.inventory_summary().await.expect("should summarize");
        assert_eq!(3, summary.total_titles);
        assert_eq!(12, summary.total_copies);
        assert_eq!(11, summary.available_copies);
        assert_eq!(1, summary.borrowed_copies);
        assert_eq!(Some(1.0 / 12.0), summary.utilization_rate);
        assert_eq!(vec!["B001", "B002", "B003"], summary.available_books);
        assert!(summary.unavailable_books.is_empty());
    }

    #[tokio::test]
    async fn test_should_report_no_utilization_for_empty_catalog() {
        let state = AppState::new(Configuration::new(), GatewayPublisherVia::Logs).expect("should build state");
        let summary = create_report_service(&state).inventory_summary().await.expect("should summarize");
        assert_eq!(0, summary.total_copies);
        assert_eq!(None, summary.utilization_rate);
    }

    #[tokio::test]
    async fn test_should_rank_by_popularity() {
        let state = seeded_state();
        let reports = create_report_service(&state);
        let ranked: Vec<String> = reports.popularity_ranking(10).await.expect("should rank")
            .into_iter().map(|b| b.book_id).collect();
        assert_eq!(vec!["B002", "B001", "B003"], ranked);
        assert_eq!(1, reports.popularity_ranking(1).await.expect("should rank").len());

        let high: Vec<String> = reports.high_demand_books().await.expect("should list")
            .into_iter().map(|b| b.book_id).collect();
        assert_eq!(vec!["B002"], high);
    }

    #[tokio::test]
    async fn test_should_aggregate_borrower_activity() {
        let state = seeded_state();
        let checkout_svc = create_checkout_service(&state);
        let _ = checkout_svc.checkout("B003", "S001", "Alice Johnson", day("2024-02-01")).await.expect("should checkout");

        let activity = create_report_service(&state).borrower_activity().await.expect("should aggregate");
        assert_eq!(2, activity.len());
        let alice = activity.get("S001").expect("should have alice");
        assert_eq!("Alice Johnson", alice.name.as_str());
        assert_eq!(2, alice.total_loans);
        assert_eq!(2, alice.active_loans);
        let david = activity.get("S002").expect("should have david");
        assert_eq!(1, david.total_loans);
        assert_eq!(0, david.active_loans);
        assert_eq!(8.0, david.total_fines_accrued);
    }

    #[tokio::test]
    async fn test_should_summarize_transactions() {
        let state = seeded_state();
        let checkout_svc = create_checkout_service(&state);
        let _ = checkout_svc.checkout("B003", "S003", "Carol", day("2024-02-01")).await.expect("should checkout");

        let summary = create_report_service(&state).transaction_summary(day("2024-02-03"), 2)
            .await.expect("should summarize");
        assert_eq!(3, summary.total_transactions);
        assert_eq!(2, summary.active_loans);
        assert_eq!(1, summary.completed_returns);
        assert_eq!(8.0, summary.total_fines_collected);
        assert_eq!(10.0, summary.pending_fines);
        let recent: Vec<String> = summary.recent.into_iter().map(|c| c.checkout_id).collect();
        assert_eq!(vec!["T002", "T003"], recent);
    }

    #[tokio::test]
    async fn test_should_report_system_status() {
        let state = seeded_state();
        let status = create_report_service(&state).system_status(day("2024-02-03")).await.expect("should report");
        assert_eq!(3, status.total_titles);
        assert_eq!(12, status.total_copies);
        assert_eq!(11, status.available_copies);
        assert_eq!(1, status.active_loans);
        assert_eq!(1, status.overdue_loans);
        assert_eq!(Configuration::new(), status.configuration);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_read_consistent_snapshots() {
        let state = seeded_state();
        let mut handles = vec![];
        for i in 0..10 {
            let svc = create_checkout_service(&state);
            handles.push(tokio::spawn(async move {
                let _ = svc.checkout("B003", format!("R{:03}", i).as_str(), "Reader", day("2024-02-01")).await;
            }));
        }
        let reports = create_report_service(&state);
        for _ in 0..10 {
            let status = reports.system_status(day("2024-02-01")).await.expect("should report");
            assert_eq!(status.total_copies, status.available_copies + status.active_loans);
        }
        for handle in handles {
            handle.await.expect("task should finish");
        }
        let status = reports.system_status(day("2024-02-01")).await.expect("should report");
        assert_eq!(7, status.available_copies);
        assert_eq!(5, status.active_loans);
    }
}
