use std::env;
use std::error::Error;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};
use lms_ledger::books::domain::model::BookEntity;
use lms_ledger::books::dto::BookFilter;
use lms_ledger::catalog::domain::model::Catalog;
use lms_ledger::catalog::factory::create_catalog_service;
use lms_ledger::checkout::domain::model::{CheckoutEntity, LoanLedger};
use lms_ledger::checkout::factory::create_checkout_service;
use lms_ledger::core::domain::Configuration;
use lms_ledger::core::library::{CheckoutStatus, LibraryResult};
use lms_ledger::core::store::{AppState, LibraryStore};
use lms_ledger::gateway::GatewayPublisherVia;
use lms_ledger::reports::factory::create_report_service;
use lms_ledger::utils::date::{add_days, parse_date};
use lms_ledger::utils::telemetry::{level_from_str, setup_tracing};

const LOG_LEVEL_ENV: &str = "LMS_LOG";

fn sample_book(book_id: &str, title: &str, author: &str, genre: &str, total_copies: i64,
               available_copies: i64, checkout_count: i64, publication_year: i32) -> BookEntity {
    let mut book = BookEntity::new(book_id, title, author, genre, total_copies, publication_year);
    book.available_copies = available_copies;
    book.checkout_count = checkout_count;
    book
}

// one active loan on B001, one closed loan on B002
fn sample_store() -> LibraryResult<LibraryStore> {
    let catalog = Catalog::with_books(vec![
        sample_book("B001", "Python Programming", "John Smith", "Technology", 5, 4, 15, 2022),
        sample_book("B002", "Data Structures", "Jane Doe", "Computer Science", 3, 3, 25, 2021),
        sample_book("B003", "Web Development", "Bob Wilson", "Technology", 4, 4, 8, 2023),
    ])?;
    let mut returned = CheckoutEntity::new("T002", "B002", "S002", "David Brown",
                                           parse_date("2024-01-10")?, parse_date("2024-01-24")?);
    returned.checkout_status = CheckoutStatus::Returned;
    returned.return_date = Some(parse_date("2024-01-22")?);
    let ledger = LoanLedger::with_records(vec![
        CheckoutEntity::new("T001", "B001", "S001", "Alice Johnson",
                            parse_date("2024-01-15")?, parse_date("2024-01-29")?),
        returned,
    ])?;
    LibraryStore::new(catalog, ledger)
}

fn print_report<T: Serialize>(name: &str, report: &T) -> Result<(), Box<dyn Error>> {
    println!("{}: {}", name, serde_json::to_string_pretty(report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing(level_from_str(env::var(LOG_LEVEL_ENV).ok().as_deref()));

    let today: NaiveDate = match env::args().nth(1) {
        Some(date) => parse_date(date.as_str())?,
        None => Local::now().date_naive(),
    };
    let config = Configuration::from_env()?;
    info!(today = %today, loan_period_days = config.loan_period_days,
          fine_per_day = config.fine_per_day, "starting ledger");

    let state = AppState::with_store(config, sample_store()?, GatewayPublisherVia::Logs)?;
    let catalog_svc = create_catalog_service(&state);
    let checkout_svc = create_checkout_service(&state);
    let reports = create_report_service(&state);

    print_report("technology_books", &catalog_svc.find_books(&BookFilter::genre("technology")).await?)?;

    let checkout = checkout_svc.checkout("B002", "S010", "Sam Lee", today).await?;
    let _ = checkout_svc.checkout("B003", "S010", "Sam Lee", today).await?;
    let receipt = checkout_svc.returned(checkout.checkout_id.as_str(), add_days(today, 3)?).await?;
    print_report("return_receipt", &receipt)?;

    if let Err(err) = checkout_svc.returned(checkout.checkout_id.as_str(), today).await {
        warn!(checkout_id = %checkout.checkout_id, "second return refused: {}", err);
    }

    print_report("overdue_loans", &reports.overdue_loans(today).await?)?;
    print_report("inventory_summary", &reports.inventory_summary().await?)?;
    print_report("popular_books", &reports.popularity_ranking(10).await?)?;
    print_report("high_demand_books", &reports.high_demand_books().await?)?;
    print_report("transaction_summary", &reports.transaction_summary(today, 5).await?)?;
    print_report("borrower_activity", &reports.borrower_activity().await?)?;
    print_report("system_status", &reports.system_status(today).await?)?;
    Ok(())
}
