//! The expense ledger: create, update, delete and derived reads over the
//! in-memory record set, kept in sync with the persistence gateway.
//!
//! The ledger owns the single process-wide record set. It is loaded once,
//! held in memory, and fully re-serialized to the store on every mutation;
//! there is no batching and no incremental diffing. The in-memory set is
//! authoritative between writes.

use time::OffsetDateTime;

use crate::{
    Error,
    identity::next_id,
    record::{ExpenseRecord, Priority, parse_amount},
    store::KeyValueStore,
};

/// The store key holding the JSON-serialized record set.
pub const EXPENSES_KEY: &str = "expenses";

/// The store key holding the user's name.
pub const USERNAME_KEY: &str = "username";

const DEFAULT_AUTHOR: &str = "Me";

/// Orchestrates the expense record lifecycle over a [KeyValueStore].
#[derive(Debug)]
pub struct Ledger<S: KeyValueStore> {
    store: S,
    records: Vec<ExpenseRecord>,
    author: String,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the record set and the author name from `store`.
    ///
    /// A missing or malformed expenses blob yields an empty set, and a
    /// missing author name falls back to `"Me"`. Load never fails: storage
    /// errors are logged and treated the same as missing data.
    pub fn load(store: S) -> Self {
        let author = match store.get(USERNAME_KEY) {
            Ok(Some(name)) if !name.is_empty() => name,
            Ok(_) => DEFAULT_AUTHOR.to_owned(),
            Err(error) => {
                tracing::warn!("could not read the stored user name: {error}");
                DEFAULT_AUTHOR.to_owned()
            }
        };

        let records = match store.get(EXPENSES_KEY) {
            Ok(Some(text)) => parse_record_set(&text),
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!("could not read the stored expenses: {error}");
                Vec::new()
            }
        };

        Self {
            store,
            records,
            author,
        }
    }

    /// The record set in its at-rest order, most recently created first.
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// The name stamped on records created through this ledger.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Set the author name and persist it under the `username` key.
    ///
    /// An empty name resets the author to the default, matching what a
    /// missing key yields at load time.
    pub fn set_author(&mut self, name: &str) -> Result<(), Error> {
        self.author = if name.is_empty() {
            DEFAULT_AUTHOR.to_owned()
        } else {
            name.to_owned()
        };

        self.store.set(USERNAME_KEY, &self.author)
    }

    /// Create a record from manual entry and persist the full set.
    ///
    /// The record gets the next free id, today's date and the ledger's
    /// author, and is prepended so the unsorted view shows the most recent
    /// entry first.
    ///
    /// # Errors
    /// Returns [Error::EmptyTitle] or [Error::InvalidAmount] without mutating
    /// anything if the entry fails validation.
    pub fn create(
        &mut self,
        title: &str,
        amount_text: &str,
        priority: Priority,
    ) -> Result<ExpenseRecord, Error> {
        let amount = validate_entry(title, amount_text)?;

        let record = ExpenseRecord {
            id: next_id(&self.records),
            title: title.to_owned(),
            amount,
            date: today(),
            priority,
            author: self.author.clone(),
        };

        self.records.insert(0, record.clone());
        self.persist()?;

        Ok(record)
    }

    /// Replace the title, amount and priority of the record with `id` and
    /// persist the full set. The record's id, date and author never change.
    ///
    /// Updating an id that is not in the set is a no-op, not an error.
    ///
    /// # Errors
    /// Returns [Error::EmptyTitle] or [Error::InvalidAmount] without mutating
    /// anything if the entry fails validation.
    pub fn update(
        &mut self,
        id: &str,
        title: &str,
        amount_text: &str,
        priority: Priority,
    ) -> Result<(), Error> {
        let amount = validate_entry(title, amount_text)?;

        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            return Ok(());
        };

        record.title = title.to_owned();
        record.amount = amount;
        record.priority = priority;

        self.persist()
    }

    /// Remove the record with `id`, if present, and persist the full set.
    ///
    /// Deleting an id that is not in the set is a no-op, not an error.
    pub fn delete(&mut self, id: &str) -> Result<(), Error> {
        let count_before = self.records.len();
        self.records.retain(|record| record.id != id);

        if self.records.len() == count_before {
            return Ok(());
        }

        self.persist()
    }

    /// The sum of amounts over records passing the display-validity filter.
    ///
    /// A derived read, never persisted.
    pub fn total(&self) -> f64 {
        self.records
            .iter()
            .filter(|record| record.is_displayable())
            .map(|record| record.amount)
            .sum()
    }

    /// Append already-identified records after the existing ones and write
    /// the merged set back as a single full replacement.
    ///
    /// This is the import merge engine's write path; callers are expected to
    /// have run each record through validation and [next_id]-continuing
    /// identity assignment.
    pub fn append_imported(&mut self, records: Vec<ExpenseRecord>) -> Result<(), Error> {
        self.records.extend(records);

        self.persist()
    }

    /// Consume the ledger and hand back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<(), Error> {
        let json = serde_json::to_string(&self.records)
            .map_err(|error| Error::JsonSerialization(error.to_string()))?;

        self.store.set(EXPENSES_KEY, &json)
    }
}

/// Check a manual entry and return the parsed amount.
fn validate_entry(title: &str, amount_text: &str) -> Result<f64, Error> {
    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }

    parse_amount(amount_text).ok_or_else(|| Error::InvalidAmount(amount_text.to_owned()))
}

/// Parse the persisted expenses blob, salvaging what can be salvaged.
///
/// A blob that is not a JSON array yields the empty set. Elements that do not
/// parse as records are dropped individually so one bad element does not
/// throw away the rest.
fn parse_record_set(text: &str) -> Vec<ExpenseRecord> {
    let elements: Vec<serde_json::Value> = match serde_json::from_str(text) {
        Ok(elements) => elements,
        Err(error) => {
            tracing::debug!("stored expenses were not a JSON array, starting empty: {error}");
            return Vec::new();
        }
    };

    let element_count = elements.len();
    let records: Vec<ExpenseRecord> = elements
        .into_iter()
        .filter_map(|element| match serde_json::from_value(element) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::debug!("dropping stored element that is not an expense record: {error}");
                None
            }
        })
        .collect();

    if records.len() < element_count {
        tracing::debug!(
            "dropped {} of {element_count} stored elements",
            element_count - records.len()
        );
    }

    records
}

fn today() -> String {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
        .to_string()
}
