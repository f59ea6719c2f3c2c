//! Allocates identifiers for new expense records.

use crate::record::ExpenseRecord;

/// Compute the next unique record identifier for `records`.
///
/// Returns `"1"` for an empty set, otherwise one more than the largest id
/// that parses as a base-10 integer. Ids that do not parse are ignored for
/// the max computation but are never rejected.
///
/// The id is re-derived from the full record set on every call; there is no
/// separate counter. A consequence kept on purpose: once every record with a
/// higher number has been deleted, an id becomes available for reuse.
pub fn next_id(records: &[ExpenseRecord]) -> String {
    let max_id = records
        .iter()
        .filter_map(|record| record.id.parse::<i64>().ok())
        .max();

    match max_id {
        Some(max_id) => (max_id + 1).to_string(),
        None => "1".to_owned(),
    }
}
