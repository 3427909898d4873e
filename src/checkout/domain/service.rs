use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{error, info, warn};
use crate::books::domain::Book;
use crate::checkout::domain::CheckoutService;
use crate::checkout::dto::{CheckoutDto, ReturnReceiptDto};
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::store::SharedStore;
use crate::gateway::events::{EventPublisher, publish_committed};
use crate::policy::LoanPolicy;
use crate::utils::date::format_date;

pub(crate) struct CheckoutServiceImpl {
    policy: LoanPolicy,
    store: SharedStore,
    events_publisher: Arc<dyn EventPublisher>,
}

impl CheckoutServiceImpl {
    pub(crate) fn new(config: &Configuration, store: SharedStore,
                      events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            policy: LoanPolicy::new(config),
            store,
            events_publisher,
        }
    }

    // Checks run in order (book exists, copy available, borrower under limit) and
    // the reservation plus ledger entry happen under the same write guard.
    async fn open_checkout(&self, book_id: &str, borrower_id: &str, borrower_name: &str,
                           today: NaiveDate) -> LibraryResult<CheckoutDto> {
        let mut store = self.store.write().await;
        let book = store.catalog.get(book_id)?;
        if !book.is_available() {
            return Err(LibraryError::unavailable(format!("book is not available {}",
                                                         book_id).as_str(), Some("no_copies".to_string()), false));
        }
        let active = store.ledger.active_count(borrower_id);
        if !self.policy.can_borrow(active) {
            return Err(LibraryError::borrow_limit_exceeded(format!("borrower {} already has {} active loans",
                                                                   borrower_id, active).as_str(), self.policy.max_loans_per_borrower()));
        }
        let due_date = self.policy.due_date(today)?;
        let checkout_id = store.ledger.next_key();
        if store.ledger.get(checkout_id.as_str()).is_ok() {
            return Err(LibraryError::internal(format!("transaction key {} is already taken",
                                                      checkout_id).as_str()));
        }
        store.catalog.reserve_copy(book_id).map_err(|err| {
            if err.is_internal() {
                err
            } else {
                LibraryError::unavailable(format!("book {} could not be reserved: {}",
                                                  book_id, err).as_str(), Some("no_copies".to_string()), true)
            }
        })?;
        let checkout = store.ledger.open(book_id, borrower_id, borrower_name, today, due_date)?;
        Ok(CheckoutDto::from(checkout))
    }

    async fn close_checkout(&self, checkout_id: &str, today: NaiveDate) -> LibraryResult<ReturnReceiptDto> {
        let mut store = self.store.write().await;
        let existing = store.ledger.get(checkout_id)?;
        if !existing.is_active() {
            return Err(LibraryError::already_returned(format!("checkout {} was already returned",
                                                              checkout_id).as_str()));
        }
        if today < existing.checkout_date {
            return Err(LibraryError::validation(format!("return date {} is before checkout date {} for {}",
                                                        format_date(today), format_date(existing.checkout_date), checkout_id).as_str(), Some("return_date".to_string())));
        }
        let days_overdue = self.policy.days_overdue(existing.due_date, today);
        let fine = self.policy.fine(existing.due_date, today);
        let book_id = existing.book_id.to_string();
        store.catalog.release_copy(book_id.as_str()).map_err(|err| {
            if err.is_internal() {
                error!(checkout_id, book_id = %book_id, "copy invariant violated on return: {}", err);
            }
            err
        })?;
        let checkout = store.ledger.get_mut(checkout_id)?;
        checkout.mark_returned(today, fine)?;
        Ok(ReturnReceiptDto {
            checkout: CheckoutDto::from(&*checkout),
            days_overdue,
            fine_charged: fine,
        })
    }
}

#[async_trait]
impl CheckoutService for CheckoutServiceImpl {
    async fn checkout(&self, book_id: &str, borrower_id: &str, borrower_name: &str,
                      today: NaiveDate) -> LibraryResult<CheckoutDto> {
        if borrower_id.trim().is_empty() || borrower_name.trim().is_empty() {
            return Err(LibraryError::validation("borrower id and name are required", Some("borrower".to_string())));
        }
        let checkout = self.open_checkout(book_id, borrower_id, borrower_name, today).await.map_err(|err| {
            warn!(book_id, borrower_id, "checkout rejected: {}", err);
            err
        })?;
        info!(checkout_id = %checkout.checkout_id, book_id, borrower_id,
              due_date = %format_date(checkout.due_date), "book checked out");
        let metadata = HashMap::from([("date".to_string(), format_date(today))]);
        publish_committed(self.events_publisher.as_ref(), DomainEvent::added(
            "book_checkout", "checkout", checkout.checkout_id.as_str(), &metadata, &checkout)).await;
        Ok(checkout)
    }

    async fn returned(&self, checkout_id: &str, today: NaiveDate) -> LibraryResult<ReturnReceiptDto> {
        let receipt = self.close_checkout(checkout_id, today).await.map_err(|err| {
            warn!(checkout_id, "return rejected: {}", err);
            err
        })?;
        info!(checkout_id, book_id = %receipt.checkout.book_id, days_overdue = receipt.days_overdue,
              fine = receipt.fine_charged, "book returned");
        let metadata = HashMap::from([("date".to_string(), format_date(today))]);
        publish_committed(self.events_publisher.as_ref(), DomainEvent::updated(
            "book_returned", "checkout", checkout_id, &metadata, &receipt)).await;
        Ok(receipt)
    }

    async fn active_loan_count(&self, borrower_id: &str) -> LibraryResult<i64> {
        Ok(self.store.read().await.ledger.active_count(borrower_id))
    }

    async fn active_loans(&self, borrower_id: &str) -> LibraryResult<Vec<CheckoutDto>> {
        Ok(self.store.read().await.ledger.active_for(borrower_id).into_iter().map(CheckoutDto::from).collect())
    }

    async fn find_checkout_by_id(&self, checkout_id: &str) -> LibraryResult<CheckoutDto> {
        self.store.read().await.ledger.get(checkout_id).map(CheckoutDto::from)
    }
}
