//! The expense record model and the validation rules applied to it.
//!
//! Two levels of validation exist and must not be conflated:
//! - Entry-time checks ([parse_amount] plus a non-empty title) guard manual
//!   create/update before any mutation happens.
//! - The display-validity filter ([ExpenseRecord::is_displayable]) is applied
//!   before rendering or totaling and silently excludes bad records without
//!   mutating them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// How urgently an expense needs to be paid.
///
/// The discriminant order is the urgency rank: `Urgent` sorts first when
/// ordering by decreasing urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Needs to be dealt with immediately.
    Urgent,
    /// Important, but can wait a short while.
    High,
    /// The default level of importance.
    Medium,
    /// Can be dealt with whenever convenient.
    Low,
}

impl Priority {
    /// The rank used for urgent-first ordering, zero being the most urgent.
    pub fn urgency_rank(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Urgent => "URGENT",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };

        write!(f, "{name}")
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.to_ascii_uppercase().as_str() {
            "URGENT" => Ok(Priority::Urgent),
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            _ => Err(Error::InvalidPriority(text.to_owned())),
        }
    }
}

/// A single expense entry.
///
/// Records are created by [crate::ledger::Ledger::create] (manual entry) or by
/// [crate::import::import_csv] (CSV rows). `id`, `date` and `author` are fixed
/// at creation; only `title`, `amount` and `priority` may change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// An incrementing decimal integer serialized as text, unique within the
    /// record set.
    pub id: String,
    /// What the money was spent on.
    pub title: String,
    /// How much money was spent. Expected to be non-negative, but only
    /// checked for being a finite number.
    pub amount: f64,
    /// When the expense happened, as `YYYY-MM-DD` text. Free text is
    /// tolerated but sorts as the minimum date.
    pub date: String,
    /// How urgently the expense needs to be paid.
    pub priority: Priority,
    /// Who recorded the expense.
    pub author: String,
}

impl ExpenseRecord {
    /// The display-validity filter.
    ///
    /// Records failing this check are excluded from views and from the
    /// running total, but are never mutated or rejected in place.
    pub fn is_displayable(&self) -> bool {
        !self.id.is_empty()
            && !self.title.is_empty()
            && self.amount.is_finite()
            && !self.date.is_empty()
            && !self.author.is_empty()
    }
}

/// Parse the amount text from a form field or CSV cell.
///
/// Returns `None` unless the text parses as a finite number. Infinities and
/// NaN are rejected so they can never enter the record set.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}


#[cfg(test)]
mod parse_amount_tests {
    use super::parse_amount;

    #[test]
    fn parses_plain_number() {
        assert_eq!(Some(50.0), parse_amount("50"));
    }

    #[test]
    fn parses_decimal_with_whitespace() {
        assert_eq!(Some(12.5), parse_amount(" 12.5 "));
    }

    #[test]
    fn rejects_text() {
        assert_eq!(None, parse_amount("fifty"));
    }

    #[test]
    fn rejects_empty_string() {
        assert_eq!(None, parse_amount(""));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(None, parse_amount("NaN"));
        assert_eq!(None, parse_amount("inf"));
    }
}
