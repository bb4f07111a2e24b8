use crate::data::aggregate::distinct_categories;
use crate::data::filter::filtered_indices;
use crate::data::model::{CategorySelection, DateRange, FilterCriteria, SalesRecord};
use crate::error::Result;
use crate::view::ViewModels;

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Everything a front end needs between interactions, independent of rendering.
///
/// Every setter recomputes the filtered snapshot and all three views from
/// scratch, so the charts are always derived from the same selection.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Loaded records (empty until a dataset is set).
    records: Vec<SalesRecord>,

    /// Current selection.
    criteria: FilterCriteria,

    /// Indices of records passing the current criteria.
    visible_indices: Vec<usize>,

    /// Views of the last successful refresh; `None` before the first refresh
    /// and after a failed one.
    views: Option<ViewModels>,

    /// Status / error message for the UI.
    pub status_message: Option<String>,
}

impl DashboardState {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            records: Vec::new(),
            criteria,
            visible_indices: Vec::new(),
            views: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and refresh the views.
    pub fn set_records(&mut self, records: Vec<SalesRecord>) -> Result<&ViewModels> {
        log::info!("Dataset loaded: {} records", records.len());
        self.records = records;
        self.refresh()
    }

    /// Replace the whole selection.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<&ViewModels> {
        self.criteria = criteria;
        self.refresh()
    }

    /// Change only the date range.
    pub fn set_range(&mut self, range: DateRange) -> Result<&ViewModels> {
        self.criteria.range = range;
        self.refresh()
    }

    /// Change only the category selector.
    pub fn set_category(&mut self, category: impl Into<CategorySelection>) -> Result<&ViewModels> {
        self.criteria.category = category.into();
        self.refresh()
    }

    /// Recompute the filtered snapshot and all views.
    ///
    /// On failure the previous views are dropped, not kept.
    pub fn refresh(&mut self) -> Result<&ViewModels> {
        match filtered_indices(&self.records, &self.criteria) {
            Ok(indices) => {
                let snapshot: Vec<&SalesRecord> =
                    indices.iter().map(|&i| &self.records[i]).collect();
                let views = ViewModels::from_filtered(&snapshot);
                log::debug!(
                    "Filter {} / {}: {} of {} records visible",
                    self.criteria.range,
                    self.criteria.category,
                    indices.len(),
                    self.records.len()
                );
                self.visible_indices = indices;
                self.status_message = None;
                let views: &ViewModels = self.views.insert(views);
                Ok(views)
            }
            Err(e) => {
                log::warn!("Filter rejected: {e}");
                self.visible_indices.clear();
                self.views = None;
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn views(&self) -> Option<&ViewModels> {
        self.views.as_ref()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_indices.len()
    }

    /// Records passing the current criteria, in input order.
    pub fn visible_records(&self) -> impl Iterator<Item = &SalesRecord> {
        self.visible_indices.iter().map(|&i| &self.records[i])
    }

    /// Category selector options: `"All"` followed by `configured`, or by the
    /// categories present in the data when nothing is configured.
    pub fn category_options(&self, configured: &[String]) -> Vec<String> {
        let mut options = vec![CategorySelection::ALL.to_string()];
        if configured.is_empty() {
            options.extend(distinct_categories(&self.records));
        } else {
            options.extend(configured.iter().cloned());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;

    fn january() -> FilterCriteria {
        FilterCriteria::from_inputs("2024-01-01", "2024-01-31", "All").unwrap()
    }

    fn records() -> Vec<SalesRecord> {
        vec![
            SalesRecord::new("2024-01-05", "Electronics", "North", 100.0),
            SalesRecord::new("2024-01-09", "Clothing", "East", 20.0),
            SalesRecord::new("2024-02-10", "Clothing", "South", 50.0),
        ]
    }

    #[test]
    fn test_set_records_refreshes() {
        let mut state = DashboardState::new(january());
        let views = state.set_records(records()).unwrap();
        assert_eq!(views.time_series.len(), 2);
        assert_eq!(state.visible_count(), 2);
        assert_eq!(state.records().len(), 3);
    }

    #[test]
    fn test_category_change() {
        let mut state = DashboardState::new(january());
        state.set_records(records()).unwrap();
        let views = state.set_category("Clothing").unwrap();
        assert_eq!(views.category_totals.len(), 1);
        assert_eq!(views.category_totals[0].total, 20.0);
        assert_eq!(
            state.criteria().category,
            CategorySelection::Only("Clothing".into())
        );
        let visible: Vec<&str> = state.visible_records().map(|r| r.date.as_str()).collect();
        assert_eq!(visible, ["2024-01-09"]);
    }

    #[test]
    fn test_failed_refresh_clears_views() {
        let mut state = DashboardState::new(january());
        state.set_records(records()).unwrap();
        assert!(state.views().is_some());

        let inverted = DateRange::parse("2024-03-01", "2024-01-01").unwrap();
        let err = state.set_range(inverted).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));
        assert!(state.views().is_none());
        assert_eq!(state.visible_count(), 0);
        assert!(state.status_message.is_some());

        // A valid selection recovers.
        state.set_criteria(january()).unwrap();
        assert!(state.views().is_some());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_category_options() {
        let mut state = DashboardState::new(january());
        state.set_records(records()).unwrap();
        assert_eq!(
            state.category_options(&[]),
            vec!["All", "Electronics", "Clothing"]
        );
        assert_eq!(
            state.category_options(&["Furniture".to_string()]),
            vec!["All", "Furniture"]
        );
    }

    #[test]
    fn test_no_views_before_first_refresh() {
        let inverted = FilterCriteria::from_inputs("2024-03-01", "2024-01-01", "All").unwrap();
        let mut state = DashboardState::new(inverted);
        assert!(state.views().is_none());
        assert!(state.status_message.is_none());

        assert!(state.set_records(records()).is_err());
        assert!(state.views().is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_records_kept_after_failed_refresh() {
        let inverted = FilterCriteria::from_inputs("2024-03-01", "2024-01-01", "All").unwrap();
        let mut state = DashboardState::new(inverted);
        let err = state.set_records(records()).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRange { .. }));

        assert_eq!(state.records().len(), 3);
        assert_eq!(
            state.category_options(&[]),
            vec!["All", "Electronics", "Clothing"]
        );
    }
}
