use chrono::{Duration, NaiveDate};
use crate::core::library::{LibraryError, LibraryResult};

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn parse_date(str_date: &str) -> LibraryResult<NaiveDate> {
    NaiveDate::parse_from_str(str_date.trim(), DATE_FMT).map_err(|err| {
        LibraryError::validation(format!("invalid date {:?} {}", str_date, err).as_str(), None)
    })
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{}", date.format(DATE_FMT))
}

// whole calendar days from `from` to `to`, negative when `to` is earlier
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

// wider than the whole NaiveDate range, and small enough for Duration::days
const MAX_DAY_SPAN: u64 = i32::MAX as u64;

pub fn add_days(date: NaiveDate, days: i64) -> LibraryResult<NaiveDate> {
    Some(days)
        .filter(|d| d.unsigned_abs() <= MAX_DAY_SPAN)
        .and_then(|d| date.checked_add_signed(Duration::days(d)))
        .ok_or_else(|| {
            LibraryError::validation(format!("date {} plus {} days is out of range",
                                             format_date(date), days).as_str(), None)
        })
}

pub mod serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{DATE_FMT, format_date};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        format_date(*date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let str_date: String = Deserialize::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&str_date, DATE_FMT).map_err(D::Error::custom)
    }
}

pub mod opt_serializer {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{DATE_FMT, format_date};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
        date.map(format_date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        let str_date: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_date {
            Some(s) => NaiveDate::parse_from_str(&s, DATE_FMT).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
