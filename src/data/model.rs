use std::fmt;

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

/// Date-only layouts, each tried only on input of the given length so that a
/// year-month such as `2024-12` is never read as an ordinal day.
const DATE_FORMATS: &[(usize, &str)] = &[
    (10, "%Y-%m-%d"),
    (8, "%Y%m%d"),
    (8, "%Y-%j"),
    (7, "%Y%j"),
    (10, "%G-W%V-%u"),
    (8, "%GW%V%u"),
];

/// Date-time layouts tried after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y%m%dT%H%M%S",
];

/// Parse an ISO-8601 calendar date.
///
/// Accepts calendar (`2024-01-05`, `20240105`), ordinal (`2024-005`),
/// week (`2024-W01-5`) and year-month (`2024-01`, the first of the month)
/// forms, as well as date-times such as `2024-01-05T10:30:00` or
/// `2024-01-05T10:30:00+02:00`. For date-times the calendar date as written
/// is used (no timezone conversion).
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date = DATE_FORMATS
        .iter()
        .filter(|(len, _)| *len == s.len())
        .find_map(|(_, fmt)| NaiveDate::parse_from_str(s, fmt).ok());
    if date.is_some() {
        return date;
    }
    if s.len() == 7 && s.as_bytes()[4] == b'-' {
        return NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

// ---------------------------------------------------------------------------
// SalesRecord – one observation
// ---------------------------------------------------------------------------

/// A single sales observation as supplied by the record source.
///
/// The date is kept as the source text and parsed by the filter, which
/// reports a bad one as [`DashboardError::InvalidRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// ISO-8601 date string, e.g. `"2024-01-05"`.
    pub date: String,
    /// Product category label, e.g. `"Electronics"`.
    pub category: String,
    /// Sales region label, e.g. `"North"`.
    pub region: String,
    /// Non-negative sales amount.
    pub sales: f64,
}

impl SalesRecord {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        region: impl Into<String>,
        sales: f64,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            region: region.into(),
            sales,
        }
    }

    /// The record's calendar date, if its date string parses.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.date)
    }
}

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// Inclusive calendar range. `start <= end` is checked by the filter, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Build a range from the two date strings a date-picker hands over.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_iso_date(start).ok_or_else(|| DashboardError::InvalidCriteria {
            field: "start",
            value: start.to_string(),
        })?;
        let end = parse_iso_date(end).ok_or_else(|| DashboardError::InvalidCriteria {
            field: "end",
            value: end.to_string(),
        })?;
        Ok(Self { start, end })
    }

    /// The `months` calendar months ending on `today` (both ends inclusive).
    ///
    /// Month arithmetic clamps to the last day of shorter months, so
    /// March 31 minus one month is the last day of February.
    pub fn trailing_months(today: NaiveDate, months: u32) -> Self {
        let start = today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Category selection
// ---------------------------------------------------------------------------

/// Which categories pass the filter.
///
/// Serialized as the selector string the UI uses: `"All"` or a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategorySelection {
    #[default]
    All,
    Only(String),
}

impl CategorySelection {
    /// Selector value meaning "no category restriction".
    pub const ALL: &'static str = "All";

    /// Interpret a selector string. `"All"` and the empty string select everything.
    pub fn from_selector(selector: &str) -> Self {
        if selector.is_empty() || selector == Self::ALL {
            CategorySelection::All
        } else {
            CategorySelection::Only(selector.to_string())
        }
    }

    /// Case-sensitive exact match against a record's category.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Only(label) => label == category,
        }
    }

    pub fn as_selector(&self) -> &str {
        match self {
            CategorySelection::All => Self::ALL,
            CategorySelection::Only(label) => label,
        }
    }
}

impl From<String> for CategorySelection {
    fn from(selector: String) -> Self {
        if selector.is_empty() || selector == Self::ALL {
            CategorySelection::All
        } else {
            CategorySelection::Only(selector)
        }
    }
}

impl From<&str> for CategorySelection {
    fn from(selector: &str) -> Self {
        Self::from_selector(selector)
    }
}

impl From<CategorySelection> for String {
    fn from(selection: CategorySelection) -> Self {
        match selection {
            CategorySelection::All => CategorySelection::ALL.to_string(),
            CategorySelection::Only(label) => label,
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_selector())
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// The user's current selection: a date range plus a category selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub range: DateRange,
    #[serde(default)]
    pub category: CategorySelection,
}

impl FilterCriteria {
    pub fn new(range: DateRange, category: impl Into<CategorySelection>) -> Self {
        Self {
            range,
            category: category.into(),
        }
    }

    /// Criteria straight from UI inputs: two date strings and a selector.
    pub fn from_inputs(start: &str, end: &str, category: &str) -> Result<Self> {
        Ok(Self {
            range: DateRange::parse(start, end)?,
            category: CategorySelection::from_selector(category),
        })
    }
}

// ---------------------------------------------------------------------------
// Derived shapes
// ---------------------------------------------------------------------------

/// Summed sales for one label of a grouping key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub label: String,
    pub total: f64,
}

impl GroupTotal {
    pub fn new(label: impl Into<String>, total: f64) -> Self {
        Self {
            label: label.into(),
            total,
        }
    }
}

/// Per-category total (bar chart).
pub type CategoryTotal = GroupTotal;

/// Per-region total (pie chart).
pub type RegionTotal = GroupTotal;

/// One point of the trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// The originating record's date string, unchanged.
    pub date: String,
    pub value: f64,
}
