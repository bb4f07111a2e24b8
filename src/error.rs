use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the filtering core.
///
/// Aggregation never fails; only the filter (and the criteria parser that
/// feeds it) can reject its input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// A record carries a date that is not a calendar date.
    #[error("record {index} has an unparseable date: {date:?}")]
    InvalidRecord { index: usize, date: String },

    /// The selected range ends before it starts.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A criteria date string supplied by the caller could not be parsed.
    #[error("invalid {field} date: {value:?}")]
    InvalidCriteria { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
