use super::model::{FilterCriteria, SalesRecord};
use crate::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Range / category filter
// ---------------------------------------------------------------------------

/// Return indices of records that pass the criteria, in input order.
///
/// A record passes when:
/// * its date lies in `criteria.range`, both ends inclusive
/// * the category selector is `All`, or equals the record's category exactly
///
/// Fails with [`DashboardError::InvalidRange`] when the range is inverted and
/// with [`DashboardError::InvalidRecord`] on the first record whose date does
/// not parse. A bad date rejects the whole call even if the record would have
/// been excluded by category.
pub fn filtered_indices(records: &[SalesRecord], criteria: &FilterCriteria) -> Result<Vec<usize>> {
    let range = criteria.range;
    if !range.is_ordered() {
        return Err(DashboardError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }

    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match record.parsed_date() {
            None => Some(Err(DashboardError::InvalidRecord {
                index,
                date: record.date.clone(),
            })),
            Some(date) if range.contains(date) && criteria.category.matches(&record.category) => {
                Some(Ok(index))
            }
            Some(_) => None,
        })
        .collect()
}

/// The records that pass the criteria, borrowed from `records` in input order.
pub fn filter_records<'a>(
    records: &'a [SalesRecord],
    criteria: &FilterCriteria,
) -> Result<Vec<&'a SalesRecord>> {
    Ok(filtered_indices(records, criteria)?
        .into_iter()
        .map(|i| &records[i])
        .collect())
}
