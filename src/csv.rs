//! Renders the record set as CSV and parses CSV rows back for import.
//!
//! The export header is literally `ID,Title,Amount,Date,Priority,Author` with
//! one row per record in the current in-memory order. Import matches columns
//! by header name rather than position, ignores any id column, and skips
//! empty lines. Fields that embed delimiters are quoted by the writer and
//! understood by the reader, so titles containing commas round-trip.

use std::str::FromStr;

use serde::Deserialize;

use crate::{
    Error,
    record::{ExpenseRecord, Priority, parse_amount},
};

/// Render `records` as CSV text, in the given order.
pub fn render_csv(records: &[ExpenseRecord]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["ID", "Title", "Amount", "Date", "Priority", "Author"])
        .map_err(|error| Error::Io(error.to_string()))?;

    for record in records {
        writer
            .write_record([
                record.id.as_str(),
                record.title.as_str(),
                &record.amount.to_string(),
                record.date.as_str(),
                &record.priority.to_string(),
                record.author.as_str(),
            ])
            .map_err(|error| Error::Io(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::Io(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::Io(error.to_string()))
}

/// One loosely-typed row from an import file, before coercion.
///
/// Every field is optional so that a missing column, like a missing value,
/// flows into the single validation pass in [ImportRow::into_record] instead
/// of failing the parse. Columns other than the five named here (notably
/// `id`) are ignored.
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct ImportRow {
    /// What the money was spent on.
    #[serde(default)]
    pub title: Option<String>,
    /// The amount as text; coerced to a number during validation.
    #[serde(default)]
    pub amount: Option<String>,
    /// When the expense happened.
    #[serde(default)]
    pub date: Option<String>,
    /// The priority name; coerced to [Priority] during validation.
    #[serde(default)]
    pub priority: Option<String>,
    /// Who recorded the expense.
    #[serde(default)]
    pub author: Option<String>,
}

impl ImportRow {
    /// Coerce and validate the row into a record carrying `id`.
    ///
    /// Returns `None` if any field is missing or empty, the amount does not
    /// parse as a finite number, or the priority is not one of the four
    /// names. The caller decides what a rejected row means; import drops it
    /// silently.
    pub fn into_record(self, id: String) -> Option<ExpenseRecord> {
        let title = self.title.filter(|text| !text.is_empty())?;
        let amount = parse_amount(&self.amount?)?;
        let date = self.date.filter(|text| !text.is_empty())?;
        let priority = Priority::from_str(&self.priority?).ok()?;
        let author = self.author.filter(|text| !text.is_empty())?;

        Some(ExpenseRecord {
            id,
            title,
            amount,
            date,
            priority,
            author,
        })
    }
}

/// Parse CSV text into import rows.
///
/// The first row must be a header; column names are matched
/// case-insensitively so the exporter's capitalized header reads back in.
/// Empty lines are skipped. Returns [Error::InvalidCsv] when the text cannot
/// be read as CSV at all, including rows with the wrong number of fields;
/// per-field problems are left for validation.
pub fn parse_rows(text: &str) -> Result<Vec<ImportRow>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| Error::InvalidCsv(error.to_string()))?
        .iter()
        .map(|name| name.to_ascii_lowercase())
        .collect::<csv::StringRecord>();
    reader.set_headers(headers);

    reader
        .deserialize()
        .map(|row| row.map_err(|error| Error::InvalidCsv(error.to_string())))
        .collect()
}

#[cfg(test)]
mod render_csv_tests {
    use crate::record::{ExpenseRecord, Priority};

    use super::render_csv;

    fn record(id: &str, title: &str, amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_owned(),
            title: title.to_owned(),
            amount,
            date: "2024-01-01".to_owned(),
            priority: Priority::Low,
            author: "Me".to_owned(),
        }
    }

    #[test]
    fn writes_header_for_empty_set() {
        let got = render_csv(&[]).unwrap();

        assert_eq!("ID,Title,Amount,Date,Priority,Author\n", got);
    }

    #[test]
    fn writes_one_row_per_record_in_order() {
        let records = [record("1", "Coffee", 50.0), record("2", "Rent", 5000.0)];

        let got = render_csv(&records).unwrap();

        let want = "ID,Title,Amount,Date,Priority,Author\n\
            1,Coffee,50,2024-01-01,LOW,Me\n\
            2,Rent,5000,2024-01-01,LOW,Me\n";
        assert_eq!(want, got);
    }

    #[test]
    fn quotes_fields_with_embedded_commas() {
        let records = [record("1", "Flour, eggs and milk", 12.5)];

        let got = render_csv(&records).unwrap();

        assert_eq!(
            "ID,Title,Amount,Date,Priority,Author\n\
            1,\"Flour, eggs and milk\",12.5,2024-01-01,LOW,Me\n",
            got
        );
    }
}

#[cfg(test)]
mod parse_rows_tests {
    use super::parse_rows;

    #[test]
    fn matches_columns_by_lowercase_header_name() {
        let text = "author,priority,date,amount,title\nX,LOW,2024-01-01,10,A\n";

        let rows = parse_rows(text).unwrap();

        assert_eq!(1, rows.len());
        assert_eq!(Some("A".to_owned()), rows[0].title);
        assert_eq!(Some("10".to_owned()), rows[0].amount);
        assert_eq!(Some("X".to_owned()), rows[0].author);
    }

    #[test]
    fn matches_capitalized_header_names() {
        let text = "ID,Title,Amount,Date,Priority,Author\n9,A,10,2024-01-01,LOW,X\n";

        let rows = parse_rows(text).unwrap();

        assert_eq!(1, rows.len());
        assert_eq!(Some("A".to_owned()), rows[0].title);
        assert_eq!(Some("LOW".to_owned()), rows[0].priority);
    }

    #[test]
    fn skips_empty_lines() {
        let text = "title,amount,date,priority,author\n\nA,10,2024-01-01,LOW,X\n\n";

        let rows = parse_rows(text).unwrap();

        assert_eq!(1, rows.len());
    }

    #[test]
    fn missing_columns_become_none() {
        let text = "title,amount\nA,10\n";

        let rows = parse_rows(text).unwrap();

        assert_eq!(None, rows[0].date);
        assert_eq!(None, rows[0].priority);
        assert_eq!(None, rows[0].author);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let text = "title,amount,date,priority,author\n  A  , 10 ,2024-01-01, LOW ,X\n";

        let rows = parse_rows(text).unwrap();

        assert_eq!(Some("A".to_owned()), rows[0].title);
        assert_eq!(Some("LOW".to_owned()), rows[0].priority);
    }
}

#[cfg(test)]
mod into_record_tests {
    use crate::record::Priority;

    use super::ImportRow;

    fn complete_row() -> ImportRow {
        ImportRow {
            title: Some("A".to_owned()),
            amount: Some("10".to_owned()),
            date: Some("2024-01-01".to_owned()),
            priority: Some("LOW".to_owned()),
            author: Some("X".to_owned()),
        }
    }

    #[test]
    fn complete_row_becomes_a_record() {
        let record = complete_row().into_record("4".to_owned()).unwrap();

        assert_eq!("4", record.id);
        assert_eq!("A", record.title);
        assert_eq!(10.0, record.amount);
        assert_eq!("2024-01-01", record.date);
        assert_eq!(Priority::Low, record.priority);
        assert_eq!("X", record.author);
    }

    #[test]
    fn empty_title_is_rejected() {
        let row = ImportRow {
            title: Some(String::new()),
            ..complete_row()
        };

        assert_eq!(None, row.into_record("1".to_owned()));
    }

    #[test]
    fn unparseable_amount_is_rejected() {
        let row = ImportRow {
            amount: Some("ten".to_owned()),
            ..complete_row()
        };

        assert_eq!(None, row.into_record("1".to_owned()));
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let row = ImportRow {
            priority: Some("WHENEVER".to_owned()),
            ..complete_row()
        };

        assert_eq!(None, row.into_record("1".to_owned()));
    }

    #[test]
    fn missing_field_is_rejected() {
        let row = ImportRow {
            author: None,
            ..complete_row()
        };

        assert_eq!(None, row.into_record("1".to_owned()));
    }
}
