//! Resolving exercise IDs against the library.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::program::{Exercise, ExerciseLibrary, Week};
use crate::types::{DayTitle, ExerciseId};

/// A day with its exercises looked up and the week's timing attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDay {
    pub title: DayTitle,
    pub exercises: Vec<Exercise>,
    pub work_sec: u32,
    pub rest_sec: u32,
    pub rounds: u32,
}

/// A week whose days have all been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedWeek {
    pub week: u32,
    pub days: Vec<ResolvedDay>,
    pub work_sec: u32,
    pub rest_sec: u32,
    pub rounds: u32,
}

impl ResolvedWeek {
    /// Finds a day by 1-based position or by exact title.
    pub fn day(&self, selector: &DaySelector) -> Option<&ResolvedDay> {
        match selector {
            DaySelector::Index(n) => n.checked_sub(1).and_then(|i| self.days.get(i)),
            DaySelector::Title(title) => self.days.iter().find(|d| d.title.as_str() == title),
        }
    }
}

/// How a user refers to a day on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySelector {
    /// 1-based position within the week.
    Index(usize),
    /// Exact day title.
    Title(String),
}

impl FromStr for DaySelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<usize>()
            .map_or_else(|_| Self::Title(s.to_string()), Self::Index))
    }
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(n) => write!(f, "#{n}"),
            Self::Title(title) => write!(f, "{title:?}"),
        }
    }
}

/// Placeholder for an ID the library does not know about.
fn missing_exercise(id: &ExerciseId) -> Exercise {
    Exercise {
        id: id.clone(),
        name: format!("⚠ Missing exercise: {id}"),
        description: "This exercise ID was not found in the library.".to_string(),
    }
}

/// Looks up each ID, substituting a visible placeholder for unknown ones.
pub fn resolve_exercise_ids(ids: &[ExerciseId], library: &ExerciseLibrary) -> Vec<Exercise> {
    ids.iter()
        .map(|id| {
            library.get(id).cloned().unwrap_or_else(|| {
                tracing::warn!(exercise_id = %id, "exercise not found in library");
                missing_exercise(id)
            })
        })
        .collect()
}

pub fn resolve_week(week: &Week, library: &ExerciseLibrary) -> ResolvedWeek {
    let days = week
        .days
        .iter()
        .map(|day| ResolvedDay {
            title: day.title.clone(),
            exercises: resolve_exercise_ids(&day.exercise_ids, library),
            work_sec: week.work_sec,
            rest_sec: week.rest_sec,
            rounds: week.rounds,
        })
        .collect();

    ResolvedWeek {
        week: week.week,
        days,
        work_sec: week.work_sec,
        rest_sec: week.rest_sec,
        rounds: week.rounds,
    }
}
