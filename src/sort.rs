//! Presentation-time ordering of the record set.
//!
//! Sorting never mutates the stored set and is recomputed per call; the order
//! at rest stays whatever the mutations left.

use std::{cmp::Reverse, str::FromStr};

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, record::ExpenseRecord};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The user-selectable view orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Keep the input order.
    #[default]
    None,
    /// URGENT first, LOW last.
    PriorityUrgentLow,
    /// LOW first, URGENT last.
    PriorityLowUrgent,
    /// Cheapest first.
    PriceLowHigh,
    /// Most expensive first.
    PriceHighLow,
    /// Most recent date first.
    DateNewest,
    /// Oldest date first.
    DateOldest,
}

impl SortOption {
    /// The option's name, as accepted by [SortOption::from_str].
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::None => "none",
            SortOption::PriorityUrgentLow => "priority-urgent-low",
            SortOption::PriorityLowUrgent => "priority-low-urgent",
            SortOption::PriceLowHigh => "price-low-high",
            SortOption::PriceHighLow => "price-high-low",
            SortOption::DateNewest => "date-newest",
            SortOption::DateOldest => "date-oldest",
        }
    }
}

impl FromStr for SortOption {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "none" => Ok(SortOption::None),
            "priority-urgent-low" => Ok(SortOption::PriorityUrgentLow),
            "priority-low-urgent" => Ok(SortOption::PriorityLowUrgent),
            "price-low-high" => Ok(SortOption::PriceLowHigh),
            "price-high-low" => Ok(SortOption::PriceHighLow),
            "date-newest" => Ok(SortOption::DateNewest),
            "date-oldest" => Ok(SortOption::DateOldest),
            _ => Err(Error::InvalidSortOption(text.to_owned())),
        }
    }
}

/// Return a copy of `records` ordered by `option`.
///
/// Every ordering is stable: records with equal sort keys keep their relative
/// input order. Dates that do not parse as `YYYY-MM-DD` compare as the
/// minimum date rather than failing.
pub fn sorted_view(records: &[ExpenseRecord], option: SortOption) -> Vec<ExpenseRecord> {
    let mut sorted = records.to_vec();

    match option {
        SortOption::None => {}
        SortOption::PriorityUrgentLow => {
            sorted.sort_by_key(|record| record.priority.urgency_rank());
        }
        SortOption::PriorityLowUrgent => {
            sorted.sort_by_key(|record| Reverse(record.priority.urgency_rank()));
        }
        SortOption::PriceLowHigh => {
            sorted.sort_by(|a, b| a.amount.total_cmp(&b.amount));
        }
        SortOption::PriceHighLow => {
            sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        }
        SortOption::DateNewest => {
            sorted.sort_by_key(|record| Reverse(parse_date(&record.date)));
        }
        SortOption::DateOldest => {
            sorted.sort_by_key(|record| parse_date(&record.date));
        }
    }

    sorted
}

fn parse_date(text: &str) -> Date {
    Date::parse(text, DATE_FORMAT).unwrap_or(Date::MIN)
}
