use chrono::NaiveDate;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::utils::date::{add_days, days_between};

/// Lending rules derived from [`Configuration`]. Every function is pure: dates
/// come from the caller and nothing here reads a clock.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanPolicy {
    loan_period_days: i64,
    fine_per_day: f64,
    max_loans_per_borrower: i64,
}

impl LoanPolicy {
    pub fn new(config: &Configuration) -> Self {
        Self {
            loan_period_days: config.loan_period_days,
            fine_per_day: config.fine_per_day,
            max_loans_per_borrower: config.max_loans_per_borrower,
        }
    }

    pub fn due_date(&self, checkout_date: NaiveDate) -> LibraryResult<NaiveDate> {
        add_days(checkout_date, self.loan_period_days)
    }

    // the due date itself is not overdue
    pub fn days_overdue(&self, due_date: NaiveDate, as_of: NaiveDate) -> i64 {
        days_between(due_date, as_of).max(0)
    }

    pub fn fine(&self, due_date: NaiveDate, as_of: NaiveDate) -> f64 {
        self.days_overdue(due_date, as_of) as f64 * self.fine_per_day
    }

    pub fn can_borrow(&self, active_loans: i64) -> bool {
        active_loans < self.max_loans_per_borrower
    }

    pub fn max_loans_per_borrower(&self) -> i64 {
        self.max_loans_per_borrower
    }
}
