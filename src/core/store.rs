use std::sync::Arc;
use tokio::sync::RwLock;
use crate::books::domain::Book;
use crate::catalog::domain::model::Catalog;
use crate::checkout::domain::model::LoanLedger;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::gateway::factory::create_publisher;
use crate::gateway::GatewayPublisherVia;
use crate::policy::LoanPolicy;

// LibraryStore keeps the catalog and the ledger under one owner so that every
// operation sees both sides of the copy invariant together.
#[derive(Debug, Clone, Default)]
pub struct LibraryStore {
    pub(crate) catalog: Catalog,
    pub(crate) ledger: LoanLedger,
}

impl LibraryStore {
    pub fn new(catalog: Catalog, ledger: LoanLedger) -> LibraryResult<Self> {
        let store = Self { catalog, ledger };
        store.verify_invariants().map_err(|err| {
            LibraryError::validation(format!("inconsistent seed data: {}", err).as_str(), Some("seed".to_string()))
        })?;
        Ok(store)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &LoanLedger {
        &self.ledger
    }

    /// Checks `available + active loans == total` for every book and that every
    /// loan points at a catalog book.
    pub fn verify_invariants(&self) -> LibraryResult<()> {
        for checkout in self.ledger.records() {
            if !self.catalog.exists(checkout.book_id.as_str()) {
                return Err(LibraryError::internal(format!("checkout {} references unknown book {}",
                                                          checkout.checkout_id, checkout.book_id).as_str()));
            }
        }
        for book in self.catalog.books() {
            let active = self.ledger.active_for_book(book.book_id.as_str());
            if book.available_copies() + active != book.total_copies() {
                return Err(LibraryError::internal(format!("book {} has {} available and {} on loan but {} total copies",
                                                          book.book_id, book.available_copies(), active, book.total_copies()).as_str()));
            }
        }
        Ok(())
    }

    /// Checks that every loan was opened with the configured loan period.
    pub fn verify_loan_terms(&self, policy: &LoanPolicy) -> LibraryResult<()> {
        for checkout in self.ledger.records() {
            let due_date = policy.due_date(checkout.checkout_date)?;
            if checkout.due_date != due_date {
                return Err(LibraryError::validation(format!("checkout {} is due {} but the loan period gives {}",
                                                            checkout.checkout_id, checkout.due_date, due_date).as_str(), Some("due_date".to_string())));
            }
        }
        Ok(())
    }
}

pub type SharedStore = Arc<RwLock<LibraryStore>>;

// AppState is handed to every factory; services built from the same state share one store.
#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub store: SharedStore,
    pub publisher: Arc<dyn EventPublisher>,
}

impl AppState {
    pub fn new(config: Configuration, via: GatewayPublisherVia) -> LibraryResult<AppState> {
        Self::with_store(config, LibraryStore::default(), via)
    }

    pub fn with_store(config: Configuration, store: LibraryStore, via: GatewayPublisherVia) -> LibraryResult<AppState> {
        config.validate()?;
        store.verify_loan_terms(&LoanPolicy::new(&config))?;
        Ok(AppState {
            config,
            store: Arc::new(RwLock::new(store)),
            publisher: create_publisher(via),
        })
    }
}
