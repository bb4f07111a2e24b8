//! Sales analytics dashboard core.
//!
//! Filters a set of [`SalesRecord`]s by date range and category and derives
//! the three chart views (trend line, totals per category, totals per
//! region) from that one filtered snapshot.

pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod view;

pub use data::aggregate::{sum_by_category, sum_by_region, to_time_series, GroupKey};
pub use data::filter::filter_records;
pub use data::model::{
    CategorySelection, CategoryTotal, DateRange, FilterCriteria, GroupTotal, RegionTotal,
    SalesRecord, TimeSeriesPoint,
};
pub use error::{DashboardError, Result};
pub use view::{build_view_models, ChartSeries, ChartSet, ViewModels};
