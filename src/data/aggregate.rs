use std::collections::{HashMap, HashSet};

use super::model::{CategoryTotal, GroupTotal, RegionTotal, SalesRecord, TimeSeriesPoint};

// ---------------------------------------------------------------------------
// Grouping key
// ---------------------------------------------------------------------------

/// Record field used to bucket records for summation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Category,
    Region,
}

impl GroupKey {
    /// The label this key selects from a record.
    pub fn of(self, record: &SalesRecord) -> &str {
        match self {
            GroupKey::Category => &record.category,
            GroupKey::Region => &record.region,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregators
// ---------------------------------------------------------------------------

/// One trend-line point per record, in input order. Records sharing a date
/// stay separate points; ordering by date is left to the caller.
pub fn to_time_series<'a, I>(records: I) -> Vec<TimeSeriesPoint>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    records
        .into_iter()
        .map(|r| TimeSeriesPoint {
            date: r.date.clone(),
            value: r.sales,
        })
        .collect()
}

/// Sum `sales` per distinct label of `key`.
///
/// Labels are compared exactly (case-sensitive). Output follows the order in
/// which each label first appears; labels with no records get no entry.
pub fn group_totals<'a, I>(records: I, key: GroupKey) -> Vec<GroupTotal>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut totals: Vec<GroupTotal> = Vec::new();
    let mut slots: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        let label = key.of(record);
        let slot = *slots.entry(label).or_insert_with(|| {
            totals.push(GroupTotal::new(label, 0.0));
            totals.len() - 1
        });
        totals[slot].total += record.sales;
    }

    totals
}

/// Bar chart data: total sales per category.
pub fn sum_by_category<'a, I>(records: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    group_totals(records, GroupKey::Category)
}

/// Pie chart data: total sales per region.
pub fn sum_by_region<'a, I>(records: I) -> Vec<RegionTotal>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    group_totals(records, GroupKey::Region)
}

/// Distinct labels of `key` in first-appearance order.
pub fn distinct_labels<'a, I>(records: I, key: GroupKey) -> Vec<String>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    let mut seen: HashSet<&'a str> = HashSet::new();
    records
        .into_iter()
        .map(|r| key.of(r))
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect()
}

/// Category selector options for a dataset.
pub fn distinct_categories<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    distinct_labels(records, GroupKey::Category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<SalesRecord> {
        vec![
            SalesRecord::new("2024-01-03", "Furniture", "West", 30.0),
            SalesRecord::new("2024-01-01", "Electronics", "North", 100.0),
            SalesRecord::new("2024-01-03", "Furniture", "North", 20.5),
            SalesRecord::new("2024-01-02", "electronics", "West", 1.0),
        ]
    }

    #[test]
    fn test_time_series_is_one_to_one_and_unsorted() {
        let data = records();
        let series = to_time_series(&data);
        let dates: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(
            dates,
            ["2024-01-03", "2024-01-01", "2024-01-03", "2024-01-02"]
        );
        assert_eq!(series[2].value, 20.5);
    }

    #[test]
    fn test_category_totals_first_appearance_order() {
        let data = records();
        let totals = sum_by_category(&data);
        assert_eq!(
            totals,
            vec![
                GroupTotal::new("Furniture", 50.5),
                GroupTotal::new("Electronics", 100.0),
                GroupTotal::new("electronics", 1.0),
            ]
        );
    }

    #[test]
    fn test_region_totals() {
        let data = records();
        let totals = sum_by_region(&data);
        assert_eq!(
            totals,
            vec![
                GroupTotal::new("West", 31.0),
                GroupTotal::new("North", 120.5),
            ]
        );
    }

    #[test]
    fn test_borrowed_subset_input() {
        let data = records();
        let subset: Vec<&SalesRecord> = data.iter().filter(|r| r.region == "North").collect();
        let totals = sum_by_category(subset.iter().copied());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].label, "Electronics");
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        let empty: Vec<SalesRecord> = Vec::new();
        assert!(to_time_series(&empty).is_empty());
        assert!(sum_by_category(&empty).is_empty());
        assert!(sum_by_region(&empty).is_empty());
    }

    #[test]
    fn test_distinct_categories() {
        let data = records();
        assert_eq!(
            distinct_categories(&data),
            vec!["Furniture", "Electronics", "electronics"]
        );
    }
}
