//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for program and library data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A count or duration that must be strictly positive was zero.
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    /// A day listed no exercises.
    #[error("week {week}, day {day:?} has no exercises")]
    EmptyDay { week: u32, day: String },

    /// A day expands to more work segments than a session can hold.
    #[error("week {week}, day {day:?} has {segments} work segments (max {max})")]
    DayTooLong {
        week: u32,
        day: String,
        segments: u64,
        max: u64,
    },

    /// Two weeks share the same number.
    #[error("week {week} is defined more than once")]
    DuplicateWeek { week: u32 },

    /// Two days in one week share the same title.
    #[error("week {week} defines day {day:?} more than once")]
    DuplicateDay { week: u32, day: String },

    /// Two library entries share the same exercise ID.
    #[error("exercise {id:?} is defined more than once")]
    DuplicateExercise { id: String },

    /// Invalid segment kind value.
    #[error("invalid segment kind: {value}")]
    InvalidSegmentKind { value: String },
}

/// Whether a segment is spent exercising or recovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// An exercise interval.
    Work,
    /// A recovery interval between exercises.
    Rest,
}

impl SegmentKind {
    /// Lowercase string form, as used in JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Rest => "rest",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SegmentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Self::Work),
            "rest" => Ok(Self::Rest),
            _ => Err(ValidationError::InvalidSegmentKind {
                value: s.to_string(),
            }),
        }
    }
}

/// Generates a validated string newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new value after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated exercise identifier.
    ///
    /// Exercise IDs must be non-empty. Uniqueness is checked when the
    /// exercise library is loaded.
    ExerciseId, "exercise ID"
);

define_string_id!(
    /// A validated day title (e.g., "Day 1 - Push").
    ///
    /// Titles identify a day within its week and form part of the
    /// completion key, so they must be non-empty.
    DayTitle, "day title"
);
