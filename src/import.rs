//! Merges rows from an import file into the existing record set.

use crate::{
    Error,
    csv::parse_rows,
    identity::next_id,
    ledger::Ledger,
    store::KeyValueStore,
};

/// Import CSV `text` into the ledger and return how many rows were kept.
///
/// Each row, in input order, is assigned the next sequential id continuing
/// from the existing set's maximum, then validated; rows failing validation
/// are dropped silently. The id counter advances for dropped rows too,
/// matching the allocator's "next integer" semantics, so a rejected row
/// leaves a gap. Surviving rows are appended after all pre-existing records
/// and the merged set is written back as a single full replacement.
///
/// # Errors
/// Returns [Error::InvalidCsv] if the text cannot be read as CSV, or the
/// save error if the replacement write fails. No per-row rejection reasons
/// are reported.
pub fn import_csv<S: KeyValueStore>(ledger: &mut Ledger<S>, text: &str) -> Result<usize, Error> {
    let rows = parse_rows(text)?;

    // next_id always yields decimal text, so the parse cannot fail in
    // practice; an unparseable value would only restart the sequence at 1.
    let mut next_number: i64 = next_id(ledger.records()).parse().unwrap_or(1);

    let mut kept = Vec::new();
    for row in rows {
        let id = next_number.to_string();
        next_number += 1;

        match row.into_record(id) {
            Some(record) => kept.push(record),
            None => tracing::debug!("dropping import row that failed validation"),
        }
    }

    let imported = kept.len();
    ledger.append_imported(kept)?;

    Ok(imported)
}
