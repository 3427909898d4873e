use std::collections::HashMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::library::{CheckoutStatus, LibraryError, LibraryResult};
use crate::utils::date::{opt_serializer, serializer};

pub const TRANSACTION_PREFIX: &str = "T";

// CheckoutEntity abstracts one loan of a book copy to a borrower.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutEntity {
    pub checkout_id: String,
    pub book_id: String,
    pub borrower_id: String,
    pub borrower_name: String,
    pub checkout_status: CheckoutStatus,
    #[serde(with = "serializer")]
    pub checkout_date: NaiveDate,
    #[serde(with = "serializer")]
    pub due_date: NaiveDate,
    #[serde(with = "opt_serializer", default)]
    pub return_date: Option<NaiveDate>,
    pub fine: f64,
}

impl CheckoutEntity {
    pub fn new(checkout_id: &str, book_id: &str, borrower_id: &str, borrower_name: &str,
               checkout_date: NaiveDate, due_date: NaiveDate) -> Self {
        Self {
            checkout_id: checkout_id.to_string(),
            book_id: book_id.to_string(),
            borrower_id: borrower_id.to_string(),
            borrower_name: borrower_name.to_string(),
            checkout_status: CheckoutStatus::Active,
            checkout_date,
            due_date,
            return_date: None,
            fine: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.checkout_status == CheckoutStatus::Active
    }

    // Active -> Returned, exactly once
    pub(crate) fn mark_returned(&mut self, return_date: NaiveDate, fine: f64) -> LibraryResult<()> {
        if !self.is_active() {
            return Err(LibraryError::already_returned(format!("checkout {} was already returned",
                                                              self.checkout_id).as_str()));
        }
        self.checkout_status = CheckoutStatus::Returned;
        self.return_date = Some(return_date);
        self.fine = fine;
        Ok(())
    }
}

// LoanLedger owns every checkout ever made, in the order they were opened, and
// the sequence used to mint transaction keys.
#[derive(Debug, Clone, Default)]
pub struct LoanLedger {
    records: Vec<CheckoutEntity>,
    index: HashMap<String, usize>,
    sequence: u64,
}

impl LoanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CheckoutEntity>) -> LibraryResult<Self> {
        let mut ledger = Self::new();
        for record in records {
            if record.checkout_id.trim().is_empty() {
                return Err(LibraryError::validation("checkout id cannot be blank", Some("checkout_id".to_string())));
            }
            if record.fine < 0.0 {
                return Err(LibraryError::validation(format!("fine of {} cannot be negative",
                                                            record.checkout_id).as_str(), Some("fine".to_string())));
            }
            if record.is_active() == record.return_date.is_some() {
                return Err(LibraryError::validation(format!("return date of {} does not match its {} status",
                                                            record.checkout_id, record.checkout_status).as_str(), Some("return_date".to_string())));
            }
            if let Some(seq) = key_sequence(&record.checkout_id) {
                ledger.sequence = ledger.sequence.max(seq);
            }
            ledger.insert(record)?;
        }
        Ok(ledger)
    }

    pub fn next_key(&self) -> String {
        format_key(self.sequence + 1)
    }

    // allocates the next transaction key and records the loan in one step
    pub(crate) fn open(&mut self, book_id: &str, borrower_id: &str, borrower_name: &str,
                       checkout_date: NaiveDate, due_date: NaiveDate) -> LibraryResult<&CheckoutEntity> {
        let seq = self.sequence + 1;
        let checkout = CheckoutEntity::new(format_key(seq).as_str(), book_id, borrower_id,
                                           borrower_name, checkout_date, due_date);
        let pos = self.insert(checkout)?;
        self.sequence = seq;
        Ok(&self.records[pos])
    }

    fn insert(&mut self, checkout: CheckoutEntity) -> LibraryResult<usize> {
        if self.index.contains_key(&checkout.checkout_id) {
            return Err(LibraryError::duplicate_key(format!("checkout with id {} already exists",
                                                           checkout.checkout_id).as_str()));
        }
        let pos = self.records.len();
        self.index.insert(checkout.checkout_id.to_string(), pos);
        self.records.push(checkout);
        Ok(pos)
    }

    pub fn get(&self, checkout_id: &str) -> LibraryResult<&CheckoutEntity> {
        self.index.get(checkout_id)
            .and_then(|pos| self.records.get(*pos))
            .ok_or_else(|| LibraryError::not_found(format!("checkout with id {} not found", checkout_id).as_str()))
    }

    pub(crate) fn get_mut(&mut self, checkout_id: &str) -> LibraryResult<&mut CheckoutEntity> {
        match self.index.get(checkout_id) {
            Some(pos) => self.records.get_mut(*pos).ok_or_else(|| {
                LibraryError::internal(format!("ledger index points past the end for {}", checkout_id).as_str())
            }),
            None => Err(LibraryError::not_found(format!("checkout with id {} not found", checkout_id).as_str())),
        }
    }

    pub fn active_count(&self, borrower_id: &str) -> i64 {
        self.records.iter().filter(|c| c.is_active() && c.borrower_id == borrower_id).count() as i64
    }

    pub fn active_for(&self, borrower_id: &str) -> Vec<&CheckoutEntity> {
        self.records.iter().filter(|c| c.is_active() && c.borrower_id == borrower_id).collect()
    }

    pub fn active_for_book(&self, book_id: &str) -> i64 {
        self.records.iter().filter(|c| c.is_active() && c.book_id == book_id).count() as i64
    }

    pub fn records(&self) -> &[CheckoutEntity] {
        self.records.as_slice()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn format_key(seq: u64) -> String {
    format!("{}{:03}", TRANSACTION_PREFIX, seq)
}

fn key_sequence(checkout_id: &str) -> Option<u64> {
    checkout_id.strip_prefix(TRANSACTION_PREFIX).and_then(|digits| digits.parse::<u64>().ok())
}

#[cfg(test)]
mod tests {
    use crate::checkout::domain::model::{CheckoutEntity, format_key, LoanLedger};
    use crate::core::library::{CheckoutStatus, LibraryError};
    use crate::utils::date::parse_date;

    fn loan(id: &str, borrower: &str) -> CheckoutEntity {
        CheckoutEntity::new(id, "B001", borrower, "Alice Johnson",
                            parse_date("2024-01-15").expect("should parse"),
                            parse_date("2024-01-29").expect("should parse"))
    }

    #[tokio::test]
    async fn test_should_build_checkout() {
        let checkout = loan("T001", "S001");
        assert_eq!("B001", checkout.book_id.as_str());
        assert_eq!(CheckoutStatus::Active, checkout.checkout_status);
        assert_eq!(None, checkout.return_date);
        assert_eq!(0.0, checkout.fine);
    }

    #[tokio::test]
    async fn test_should_format_keys() {
        assert_eq!("T001", format_key(1).as_str());
        assert_eq!("T042", format_key(42).as_str());
        assert_eq!("T1000", format_key(1000).as_str());
    }

    #[tokio::test]
    async fn test_should_continue_sequence_after_seed() {
        let mut returned = loan("T007", "S002");
        returned.mark_returned(parse_date("2024-01-22").expect("should parse"), 0.0).expect("should return");
        let ledger = LoanLedger::with_records(vec![loan("T002", "S001"), returned, loan("legacy", "S003")])
            .expect("should seed ledger");
        assert_eq!("T008", ledger.next_key().as_str());
        assert_eq!(1, ledger.active_count("S001"));
        assert_eq!(0, ledger.active_count("S002"));
        assert_eq!(2, ledger.active_for_book("B001"));
    }

    #[tokio::test]
    async fn test_should_reject_inconsistent_seed() {
        let res = LoanLedger::with_records(vec![loan("T001", "S001"), loan("T001", "S002")]);
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        let mut broken = loan("T002", "S001");
        broken.return_date = parse_date("2024-01-20").ok();
        assert!(matches!(LoanLedger::with_records(vec![broken]), Err(LibraryError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_should_open_sequential_loans() {
        let mut ledger = LoanLedger::new();
        let today = parse_date("2024-03-01").expect("should parse");
        let due = parse_date("2024-03-15").expect("should parse");
        let first = ledger.open("B001", "S001", "Alice", today, due).expect("should open").checkout_id.clone();
        let second = ledger.open("B002", "S001", "Alice", today, due).expect("should open").checkout_id.clone();
        assert_eq!("T001", first.as_str());
        assert_eq!("T002", second.as_str());
        assert_eq!(2, ledger.active_for("S001").len());
    }

    #[tokio::test]
    async fn test_should_return_only_once() {
        let mut checkout = loan("T001", "S001");
        let day = parse_date("2024-02-03").expect("should parse");
        checkout.mark_returned(day, 10.0).expect("should return");
        let res = checkout.mark_returned(parse_date("2024-02-10").expect("should parse"), 28.0);
        assert!(matches!(res, Err(LibraryError::AlreadyReturned { .. })));
        assert_eq!(Some(day), checkout.return_date);
        assert_eq!(10.0, checkout.fine);
    }
}
