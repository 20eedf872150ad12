//! Todo status and priority with their fixed rank orders.

use super::TodoDomainError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Closed enumeration with an explicit rank table.
///
/// Ranks start at 1 and follow [`RankedValue::ALL`]. Values found in
/// storage that match no variant share [`RankedValue::UNRECOGNIZED_RANK`],
/// which sorts after every recognized value.
pub trait RankedValue: Copy + Eq + Sized + 'static {
    /// Every recognized value in ascending rank order.
    const ALL: &'static [Self];

    /// Rank assigned to stored values that match no variant.
    const UNRECOGNIZED_RANK: u8;

    /// Returns the canonical storage representation.
    fn as_str(self) -> &'static str;

    /// Returns the position of this value in the rank table.
    fn rank(self) -> u8;

    /// Matches a stored value exactly against the canonical representations.
    #[must_use]
    fn from_storage(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == value)
    }
}

/// Todo workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Captured but not yet triaged.
    #[default]
    InQueue,
    /// Triaged and ready to start.
    Ready,
    /// Being worked on.
    InProgress,
    /// Paused.
    Hold,
    /// Completed.
    Done,
}

impl RankedValue for TaskStatus {
    const ALL: &'static [Self] = &[
        Self::InQueue,
        Self::Ready,
        Self::InProgress,
        Self::Hold,
        Self::Done,
    ];

    const UNRECOGNIZED_RANK: u8 = 6;

    fn as_str(self) -> &'static str {
        match self {
            Self::InQueue => "in-queue",
            Self::Ready => "ready",
            Self::InProgress => "in-progress",
            Self::Hold => "hold",
            Self::Done => "done",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::InQueue => 1,
            Self::Ready => 2,
            Self::InProgress => 3,
            Self::Hold => 4,
            Self::Done => 5,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = TodoDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::from_storage(&normalized)
            .ok_or_else(|| TodoDomainError::UnknownStatus(value.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Todo priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Normal importance.
    #[default]
    Medium,
    /// Important.
    High,
    /// Must be handled first.
    Critical,
}

impl TaskPriority {
    /// Returns the urgency position used by today's schedule: `Critical`
    /// first, `Low` last.
    #[must_use]
    pub fn urgency(self) -> u8 {
        Self::UNRECOGNIZED_RANK - self.rank()
    }
}

impl RankedValue for TaskPriority {
    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];

    const UNRECOGNIZED_RANK: u8 = 5;

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = TodoDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TodoDomainError::UnknownPriority(value.to_owned()))
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored enum value that may predate the current enumeration.
///
/// Rows written by older releases can hold values such as `pending`; they
/// are kept verbatim and rank last instead of failing the read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recognized<T> {
    /// A value from the current enumeration.
    Known(T),
    /// A stored value that matches no variant.
    Unrecognized(String),
}

impl<T: RankedValue> Recognized<T> {
    /// Classifies a stored value.
    #[must_use]
    pub fn from_storage(value: impl Into<String>) -> Self {
        let raw = value.into();
        T::from_storage(&raw).map_or(Self::Unrecognized(raw), Self::Known)
    }

    /// Returns the stored representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(value) => value.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Returns the sort rank; unrecognized values rank last.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Known(value) => value.rank(),
            Self::Unrecognized(_) => T::UNRECOGNIZED_RANK,
        }
    }

    /// Returns the recognized value, if any.
    #[must_use]
    pub const fn known(&self) -> Option<T> {
        match self {
            Self::Known(value) => Some(*value),
            Self::Unrecognized(_) => None,
        }
    }

    /// Returns `true` when this is exactly `value`.
    #[must_use]
    pub fn is(&self, value: T) -> bool {
        self.known() == Some(value)
    }
}

impl<T> From<T> for Recognized<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: RankedValue> fmt::Display for Recognized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: RankedValue> Serialize for Recognized<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
