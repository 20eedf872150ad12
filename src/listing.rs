//! Listing parameters shared by todo and experience queries.

use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;

/// Sort direction for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword for this direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parses `ASC` or `DESC`, falling back to [`SortOrder::Desc`] for any
    /// other input.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "ASC" => Self::Asc,
            "DESC" => Self::Desc,
            _ => Self::default(),
        }
    }

    /// Applies this direction to an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Inclusive window over the calendar date of a record's creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CreatedWithin {
    /// Earliest creation date to include.
    pub from: Option<NaiveDate>,
    /// Latest creation date to include.
    pub to: Option<NaiveDate>,
}

impl CreatedWithin {
    /// Creates a window from optional bounds.
    #[must_use]
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Returns whether `created_at` falls inside the window.
    #[must_use]
    pub fn contains(&self, created_at: DateTime<Utc>) -> bool {
        let day = created_at.date_naive();
        self.from.is_none_or(|from| day >= from) && self.to.is_none_or(|to| day <= to)
    }
}

/// Parses an optional `YYYY-MM-DD` input where blank means absent.
///
/// # Errors
///
/// Returns the parse error when a non-blank value is not a valid calendar
/// date.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .transpose()
}
