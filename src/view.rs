use serde::{Deserialize, Serialize};

use crate::data::aggregate::{sum_by_category, sum_by_region, to_time_series};
use crate::data::filter::filter_records;
use crate::data::model::{
    parse_iso_date, CategoryTotal, FilterCriteria, GroupTotal, RegionTotal, SalesRecord,
    TimeSeriesPoint,
};
use crate::error::Result;

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// The three render-ready shapes, all derived from one filtered snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewModels {
    pub time_series: Vec<TimeSeriesPoint>,
    pub category_totals: Vec<CategoryTotal>,
    pub region_totals: Vec<RegionTotal>,
}

impl ViewModels {
    /// Fan one filtered set out to the three aggregators.
    pub fn from_filtered(filtered: &[&SalesRecord]) -> Self {
        Self {
            time_series: to_time_series(filtered.iter().copied()),
            category_totals: sum_by_category(filtered.iter().copied()),
            region_totals: sum_by_region(filtered.iter().copied()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.time_series.is_empty()
    }

    /// Label/value projections for a chart adapter.
    pub fn charts(&self) -> ChartSet {
        ChartSet {
            trend: ChartSeries::from(self.time_series.as_slice()),
            by_category: ChartSeries::from(self.category_totals.as_slice()),
            by_region: ChartSeries::from(self.region_totals.as_slice()),
        }
    }
}

/// Filter `records` once and derive every view from that single result.
///
/// Equal arguments always give deep-equal output; nothing is cached.
pub fn build_view_models(records: &[SalesRecord], criteria: &FilterCriteria) -> Result<ViewModels> {
    let filtered = filter_records(records, criteria)?;
    Ok(ViewModels::from_filtered(&filtered))
}

// ---------------------------------------------------------------------------
// Chart projections
// ---------------------------------------------------------------------------

/// Parallel label / value arrays, the shape chart libraries take.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<&[TimeSeriesPoint]> for ChartSeries {
    fn from(points: &[TimeSeriesPoint]) -> Self {
        Self {
            labels: points.iter().map(|p| short_date_label(&p.date)).collect(),
            values: points.iter().map(|p| p.value).collect(),
        }
    }
}

impl From<&[GroupTotal]> for ChartSeries {
    fn from(totals: &[GroupTotal]) -> Self {
        Self {
            labels: totals.iter().map(|t| t.label.clone()).collect(),
            values: totals.iter().map(|t| t.total).collect(),
        }
    }
}

/// Projections for all three charts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSet {
    pub trend: ChartSeries,
    pub by_category: ChartSeries,
    pub by_region: ChartSeries,
}

/// Short US date label (`1/5/2024`). Unparseable input is returned as is.
pub fn short_date_label(date: &str) -> String {
    match parse_iso_date(date) {
        Some(d) => d.format("%-m/%-d/%Y").to_string(),
        None => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    fn records() -> Vec<SalesRecord> {
        vec![
            SalesRecord::new("2024-01-05", "Electronics", "North", 100.0),
            SalesRecord::new("2024-01-20", "Clothing", "North", 25.0),
            SalesRecord::new("2024-02-10", "Clothing", "South", 50.0),
        ]
    }

    #[test]
    fn test_all_views_share_one_snapshot() {
        let data = records();
        let criteria = FilterCriteria::from_inputs("2024-01-01", "2024-01-31", "All").unwrap();
        let views = build_view_models(&data, &criteria).unwrap();

        assert_eq!(views.time_series.len(), 2);
        let series_sum: f64 = views.time_series.iter().map(|p| p.value).sum();
        let category_sum: f64 = views.category_totals.iter().map(|t| t.total).sum();
        let region_sum: f64 = views.region_totals.iter().map(|t| t.total).sum();
        assert_eq!(series_sum, 125.0);
        assert_eq!(category_sum, 125.0);
        assert_eq!(region_sum, 125.0);
        assert_eq!(views.region_totals.len(), 1);
    }

    #[test]
    fn test_error_propagates() {
        let criteria = FilterCriteria::from_inputs("2024-03-01", "2024-01-01", "All").unwrap();
        assert!(matches!(
            build_view_models(&records(), &criteria),
            Err(DashboardError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_chart_projection() {
        let data = records();
        let criteria = FilterCriteria::from_inputs("2024-01-01", "2024-12-31", "Clothing").unwrap();
        let charts = build_view_models(&data, &criteria).unwrap().charts();

        assert_eq!(charts.trend.labels, vec!["1/20/2024", "2/10/2024"]);
        assert_eq!(charts.trend.values, vec![25.0, 50.0]);
        assert_eq!(charts.by_category.labels, vec!["Clothing"]);
        assert_eq!(charts.by_category.values, vec![75.0]);
        assert_eq!(charts.by_region.labels, vec!["North", "South"]);
        assert_eq!(charts.by_region.len(), 2);
    }

    #[test]
    fn test_short_date_label() {
        assert_eq!(short_date_label("2024-11-03"), "11/3/2024");
        assert_eq!(short_date_label("2024-11-03T08:00:00Z"), "11/3/2024");
        assert_eq!(short_date_label("someday"), "someday");
    }

    #[test]
    fn test_empty_views() {
        let criteria = FilterCriteria::from_inputs("2024-01-01", "2024-01-31", "All").unwrap();
        let views = build_view_models(&[], &criteria).unwrap();
        assert!(views.is_empty());
        assert_eq!(views, ViewModels::default());
        assert!(views.charts().trend.is_empty());
    }
}
