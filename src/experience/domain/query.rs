//! Filtering and ordering rules for experience lists.

use super::Experience;
use crate::listing::{CreatedWithin, SortOrder};
use std::cmp::Ordering;

/// Allow-listed sort keys for experience lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExperienceSortKey {
    /// Creation timestamp.
    #[default]
    CreatedAt,
    /// Latest modification timestamp.
    UpdatedAt,
    /// Title, byte-wise.
    Title,
}

impl ExperienceSortKey {
    /// Every accepted key.
    pub const ALL: [Self; 3] = [Self::CreatedAt, Self::UpdatedAt, Self::Title];

    /// Returns the request name of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Title => "title",
        }
    }

    /// Matches a request name, falling back to
    /// [`ExperienceSortKey::CreatedAt`].
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .unwrap_or_default()
    }
}

/// Sort key and direction for an experience list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExperienceSort {
    /// Key to sort by.
    pub key: ExperienceSortKey,
    /// Direction.
    pub order: SortOrder,
}

impl ExperienceSort {
    /// Parses request values, replacing anything unknown with the defaults.
    #[must_use]
    pub fn parse(sort_by: &str, sort_order: &str) -> Self {
        Self {
            key: ExperienceSortKey::parse_or_default(sort_by),
            order: SortOrder::parse_or_default(sort_order),
        }
    }

    /// Compares two experiences in list order; ties fall back to the key in
    /// the same direction.
    #[must_use]
    pub fn compare(&self, left: &Experience, right: &Experience) -> Ordering {
        let primary = match self.key {
            ExperienceSortKey::CreatedAt => left.created_at().cmp(&right.created_at()),
            ExperienceSortKey::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
            ExperienceSortKey::Title => left.title().cmp(right.title()),
        };
        self.order
            .apply(primary.then_with(|| left.id().cmp(&right.id())))
    }
}

/// Predicate and ordering for an experience list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExperienceQuery {
    /// Inclusive creation date bounds.
    pub created: CreatedWithin,
    /// Ordering.
    pub sort: ExperienceSort,
}

impl ExperienceQuery {
    /// Returns `true` when `experience` satisfies the date bounds.
    #[must_use]
    pub fn matches(&self, experience: &Experience) -> bool {
        self.created.contains(experience.created_at())
    }
}
