//! Program and exercise library definitions.
//!
//! Both documents are static JSON loaded once at startup. Parsing and
//! validation happen together: anything that gets past [`Program::from_json`]
//! or [`ExerciseLibrary::from_json`] satisfies the schema, so later stages
//! never re-check it.
//!
//! A reference to an exercise ID that the library does not contain is *not*
//! a schema violation. It is resolved softly by [`crate::resolve`].

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::types::{DayTitle, ExerciseId, ValidationError};

const BUNDLED_PROGRAM: &str = include_str!("../data/program.json");
const BUNDLED_LIBRARY: &str = include_str!("../data/exercise_library.json");

/// Upper bound on `rounds * exercises` for any single day.
pub const MAX_WORK_SEGMENTS_PER_DAY: u64 = 1_000;

/// Errors raised while loading program or library JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document is not valid JSON or does not match the expected shape.
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but violates a schema constraint.
    #[error("schema violation: {0}")]
    Invalid(#[from] ValidationError),
}

/// A single exercise from the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub description: String,
}

/// The exercise reference library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseLibrary {
    #[serde(rename = "exercise_library")]
    pub exercises: Vec<Exercise>,
}

impl ExerciseLibrary {
    /// Parses and validates a library document.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let library: Self = serde_json::from_str(json)?;
        library.validate()?;
        Ok(library)
    }

    /// The library shipped with the binary.
    pub fn bundled() -> Result<Self, LoadError> {
        Self::from_json(BUNDLED_LIBRARY)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.exercises.is_empty() {
            return Err(ValidationError::Empty {
                field: "exercise_library",
            });
        }
        let mut seen = HashSet::new();
        for exercise in &self.exercises {
            if exercise.name.is_empty() {
                return Err(ValidationError::Empty {
                    field: "exercise name",
                });
            }
            if exercise.description.is_empty() {
                return Err(ValidationError::Empty {
                    field: "exercise description",
                });
            }
            if !seen.insert(exercise.id.as_str()) {
                return Err(ValidationError::DuplicateExercise {
                    id: exercise.id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Looks up an exercise by ID.
    pub fn get(&self, id: &ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// One day of a week: a title and the ordered exercises performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub title: DayTitle,
    pub exercise_ids: Vec<ExerciseId>,
}

/// The days of a week, in the order they appear in the source document.
///
/// The JSON form is an object keyed by day title. Object key order is
/// significant here (it is the order days are presented in), so this
/// type deserializes entries into a list instead of a hash map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Days(Vec<DayPlan>);

impl Days {
    pub fn iter(&self) -> std::slice::Iter<'_, DayPlan> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<DayPlan> for Days {
    fn from_iter<I: IntoIterator<Item = DayPlan>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Days {
    type Item = &'a DayPlan;
    type IntoIter = std::slice::Iter<'a, DayPlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Days {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|d| (&d.title, &d.exercise_ids)))
    }
}

impl<'de> Deserialize<'de> for Days {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DaysVisitor;

        impl<'de> Visitor<'de> for DaysVisitor {
            type Value = Days;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of day titles to exercise ID lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Days, A::Error> {
                let mut days = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((title, exercise_ids)) = map.next_entry()? {
                    days.push(DayPlan {
                        title,
                        exercise_ids,
                    });
                }
                Ok(Days(days))
            }
        }

        deserializer.deserialize_map(DaysVisitor)
    }
}

/// One week of the program. Timing applies uniformly to every day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub week: u32,
    pub work_sec: u32,
    pub rest_sec: u32,
    pub rounds: u32,
    pub days: Days,
}

impl Week {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.week == 0 {
            return Err(ValidationError::NotPositive { field: "week" });
        }
        if self.work_sec == 0 {
            return Err(ValidationError::NotPositive { field: "work_sec" });
        }
        if self.rounds == 0 {
            return Err(ValidationError::NotPositive { field: "rounds" });
        }
        let mut titles = HashSet::new();
        for day in &self.days {
            if !titles.insert(day.title.as_str()) {
                return Err(ValidationError::DuplicateDay {
                    week: self.week,
                    day: day.title.to_string(),
                });
            }
            if day.exercise_ids.is_empty() {
                return Err(ValidationError::EmptyDay {
                    week: self.week,
                    day: day.title.to_string(),
                });
            }
            let segments = u64::from(self.rounds) * day.exercise_ids.len() as u64;
            if segments > MAX_WORK_SEGMENTS_PER_DAY {
                return Err(ValidationError::DayTooLong {
                    week: self.week,
                    day: day.title.to_string(),
                    segments,
                    max: MAX_WORK_SEGMENTS_PER_DAY,
                });
            }
        }
        Ok(())
    }
}

/// A multi-week training program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub program_name: String,
    pub session_notes: String,
    pub rest_days_per_week: u32,
    pub weeks: Vec<Week>,
}

impl Program {
    /// Parses and validates a program document.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let program: Self = serde_json::from_str(json)?;
        program.validate()?;
        Ok(program)
    }

    /// The program shipped with the binary.
    pub fn bundled() -> Result<Self, LoadError> {
        Self::from_json(BUNDLED_PROGRAM)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.program_name.is_empty() {
            return Err(ValidationError::Empty {
                field: "program_name",
            });
        }
        if self.weeks.is_empty() {
            return Err(ValidationError::Empty { field: "weeks" });
        }
        let mut numbers = HashSet::new();
        for week in &self.weeks {
            week.validate()?;
            if !numbers.insert(week.week) {
                return Err(ValidationError::DuplicateWeek { week: week.week });
            }
        }
        Ok(())
    }

    /// Looks up a week by its number (not its position).
    pub fn week(&self, number: u32) -> Option<&Week> {
        self.weeks.iter().find(|w| w.week == number)
    }

    /// The first week in document order.
    pub fn first_week(&self) -> Option<&Week> {
        self.weeks.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRAM: &str = r#"{
        "program_name": "Test Program",
        "session_notes": "Warm up first.",
        "rest_days_per_week": 2,
        "weeks": [
            {
                "week": 1,
                "work_sec": 30,
                "rest_sec": 10,
                "rounds": 2,
                "days": {
                    "Zeta": ["pushup"],
                    "Alpha": ["squat", "plank"]
                }
            }
        ]
    }"#;

    fn program_with_week(week: &str) -> String {
        format!(
            r#"{{"program_name": "P", "session_notes": "", "rest_days_per_week": 0, "weeks": [{week}]}}"#
        )
    }

    #[test]
    fn program_parses_and_preserves_day_order() {
        let program = Program::from_json(PROGRAM).unwrap();
        let week = program.week(1).unwrap();
        let titles: Vec<&str> = week.days.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha"]);
        assert_eq!(week.days.iter().nth(1).unwrap().exercise_ids.len(), 2);
    }

    #[test]
    fn program_serializes_days_as_ordered_map() {
        let program = Program::from_json(PROGRAM).unwrap();
        let json = serde_json::to_string(&program.weeks[0].days).unwrap();
        assert_eq!(json, r#"{"Zeta":["pushup"],"Alpha":["squat","plank"]}"#);
    }

    #[test]
    fn program_rejects_zero_work_sec() {
        let json = program_with_week(
            r#"{"week": 1, "work_sec": 0, "rest_sec": 10, "rounds": 1, "days": {"A": ["x"]}}"#,
        );
        let err = Program::from_json(&json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Invalid(ValidationError::NotPositive { field: "work_sec" })
        ));
    }

    #[test]
    fn program_allows_zero_rest() {
        let json = program_with_week(
            r#"{"week": 1, "work_sec": 20, "rest_sec": 0, "rounds": 1, "days": {"A": ["x"]}}"#,
        );
        assert!(Program::from_json(&json).is_ok());
    }

    #[test]
    fn program_rejects_negative_numbers_at_parse() {
        let json = program_with_week(
            r#"{"week": 1, "work_sec": 20, "rest_sec": -5, "rounds": 1, "days": {"A": ["x"]}}"#,
        );
        assert!(matches!(
            Program::from_json(&json).unwrap_err(),
            LoadError::Parse(_)
        ));
    }

    #[test]
    fn program_rejects_empty_day() {
        let json = program_with_week(
            r#"{"week": 3, "work_sec": 20, "rest_sec": 5, "rounds": 1, "days": {"Rest?": []}}"#,
        );
        let err = Program::from_json(&json).unwrap_err();
        assert_eq!(
            err.to_string(),
            "schema violation: week 3, day \"Rest?\" has no exercises"
        );
    }

    #[test]
    fn program_rejects_duplicate_week_numbers() {
        let week = r#"{"week": 1, "work_sec": 20, "rest_sec": 5, "rounds": 1, "days": {"A": ["x"]}}"#;
        let json = program_with_week(&format!("{week}, {week}"));
        assert!(matches!(
            Program::from_json(&json).unwrap_err(),
            LoadError::Invalid(ValidationError::DuplicateWeek { week: 1 })
        ));
    }

    #[test]
    fn program_rejects_duplicate_day_titles() {
        let json = program_with_week(
            r#"{"week": 1, "work_sec": 20, "rest_sec": 5, "rounds": 1, "days": {"A": ["x"], "A": ["y"]}}"#,
        );
        assert!(matches!(
            Program::from_json(&json).unwrap_err(),
            LoadError::Invalid(ValidationError::DuplicateDay { .. })
        ));
    }

    #[test]
    fn program_rejects_rounds_beyond_day_limit() {
        let json = program_with_week(
            r#"{"week": 2, "work_sec": 20, "rest_sec": 5, "rounds": 4000000000, "days": {"A": ["x", "y"]}}"#,
        );
        let err = Program::from_json(&json).unwrap_err();
        assert_eq!(
            err.to_string(),
            "schema violation: week 2, day \"A\" has 8000000000 work segments (max 1000)"
        );
    }

    #[test]
    fn program_accepts_day_at_limit() {
        let json = program_with_week(
            r#"{"week": 1, "work_sec": 20, "rest_sec": 5, "rounds": 500, "days": {"A": ["x", "y"]}}"#,
        );
        let program = Program::from_json(&json).unwrap();
        assert_eq!(program.weeks[0].rounds, 500);
    }

    #[test]
    fn program_rejects_no_weeks() {
        let json = r#"{"program_name": "P", "session_notes": "", "rest_days_per_week": 0, "weeks": []}"#;
        assert!(matches!(
            Program::from_json(json).unwrap_err(),
            LoadError::Invalid(ValidationError::Empty { field: "weeks" })
        ));
    }

    #[test]
    fn program_rejects_empty_exercise_id() {
        let json = program_with_week(
            r#"{"week": 1, "work_sec": 20, "rest_sec": 5, "rounds": 1, "days": {"A": [""]}}"#,
        );
        assert!(Program::from_json(&json).is_err());
    }

    #[test]
    fn week_lookup_is_by_number() {
        let json = program_with_week(
            r#"{"week": 4, "work_sec": 20, "rest_sec": 5, "rounds": 1, "days": {"A": ["x"]}}"#,
        );
        let program = Program::from_json(&json).unwrap();
        assert!(program.week(1).is_none());
        assert_eq!(program.week(4).unwrap().work_sec, 20);
    }

    #[test]
    fn library_rejects_duplicates_and_blanks() {
        let dup = r#"{"exercise_library": [
            {"id": "a", "name": "A", "description": "d"},
            {"id": "a", "name": "B", "description": "d"}
        ]}"#;
        assert!(matches!(
            ExerciseLibrary::from_json(dup).unwrap_err(),
            LoadError::Invalid(ValidationError::DuplicateExercise { .. })
        ));

        let blank = r#"{"exercise_library": [{"id": "a", "name": "", "description": "d"}]}"#;
        assert!(ExerciseLibrary::from_json(blank).is_err());

        let empty = r#"{"exercise_library": []}"#;
        assert!(ExerciseLibrary::from_json(empty).is_err());
    }

    #[test]
    fn bundled_documents_are_valid_and_consistent() {
        let program = Program::bundled().unwrap();
        let library = ExerciseLibrary::bundled().unwrap();

        for week in &program.weeks {
            for day in &week.days {
                for id in &day.exercise_ids {
                    assert!(
                        library.get(id).is_some(),
                        "bundled program references unknown exercise {id}"
                    );
                }
            }
        }
    }
}
