use std::env;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::library::{LibraryError, LibraryResult};

pub const LOAN_PERIOD_DAYS_ENV: &str = "LMS_LOAN_PERIOD_DAYS";
pub const FINE_PER_DAY_ENV: &str = "LMS_FINE_PER_DAY";
pub const MAX_LOANS_PER_BORROWER_ENV: &str = "LMS_MAX_LOANS_PER_BORROWER";
pub const HIGH_DEMAND_THRESHOLD_ENV: &str = "LMS_HIGH_DEMAND_THRESHOLD";

pub const MAX_LOAN_PERIOD_DAYS: i64 = 3650;

// Configuration abstracts lending policy options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Configuration {
    pub loan_period_days: i64,
    pub fine_per_day: f64,
    pub max_loans_per_borrower: i64,
    pub high_demand_threshold: i64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            loan_period_days: 14,
            fine_per_day: 2.0,
            max_loans_per_borrower: 3,
            high_demand_threshold: 20,
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> LibraryResult<Self> {
        let config: Configuration = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlays the `LMS_*` environment variables on top of the defaults.
    pub fn from_env() -> LibraryResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> LibraryResult<Self>
        where F: Fn(&str) -> Option<String> {
        let mut config = Configuration::default();
        if let Some(val) = parse_var(&lookup, LOAN_PERIOD_DAYS_ENV)? {
            config.loan_period_days = val;
        }
        if let Some(val) = parse_var(&lookup, FINE_PER_DAY_ENV)? {
            config.fine_per_day = val;
        }
        if let Some(val) = parse_var(&lookup, MAX_LOANS_PER_BORROWER_ENV)? {
            config.max_loans_per_borrower = val;
        }
        if let Some(val) = parse_var(&lookup, HIGH_DEMAND_THRESHOLD_ENV)? {
            config.high_demand_threshold = val;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LibraryResult<()> {
        if self.loan_period_days < 0 || self.loan_period_days > MAX_LOAN_PERIOD_DAYS {
            return Err(LibraryError::validation(format!("loan period days must be within 0..={} {}",
                                                        MAX_LOAN_PERIOD_DAYS, self.loan_period_days).as_str(), Some("config".to_string())));
        }
        if !self.fine_per_day.is_finite() || self.fine_per_day < 0.0 {
            return Err(LibraryError::validation(format!("fine per day must be a non-negative amount {}",
                                                        self.fine_per_day).as_str(), Some("config".to_string())));
        }
        if self.max_loans_per_borrower < 1 {
            return Err(LibraryError::validation(format!("max loans per borrower must be at least 1 {}",
                                                        self.max_loans_per_borrower).as_str(), Some("config".to_string())));
        }
        if self.high_demand_threshold < 0 {
            return Err(LibraryError::validation(format!("high demand threshold cannot be negative {}",
                                                        self.high_demand_threshold).as_str(), Some("config".to_string())));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> LibraryResult<Option<T>>
    where F: Fn(&str) -> Option<String>, T: FromStr {
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            LibraryError::validation(format!("invalid value {:?} for {}", raw, name).as_str(),
                                     Some("config".to_string()))
        }),
        None => Ok(None),
    }
}
