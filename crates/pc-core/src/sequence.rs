//! Expanding a day into its timed work/rest segments.

use serde::{Deserialize, Serialize};

use crate::resolve::ResolvedDay;
use crate::types::SegmentKind;

/// One timed interval of a session.
///
/// Work segments always carry the exercise they belong to; rest segments
/// never do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_description: Option<String>,
}

impl Segment {
    /// A work interval for the named exercise.
    pub fn work(seconds: u32, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: SegmentKind::Work,
            seconds,
            exercise_name: Some(name.into()),
            exercise_description: Some(description.into()),
        }
    }

    /// A rest interval.
    pub const fn rest(seconds: u32) -> Self {
        Self {
            kind: SegmentKind::Rest,
            seconds,
            exercise_name: None,
            exercise_description: None,
        }
    }

    pub fn is_work(&self) -> bool {
        self.kind == SegmentKind::Work
    }
}

/// Builds the ordered segment list for a day.
///
/// Every exercise of every round gets a work segment followed by a rest
/// segment, except the final work segment, which ends the session. The
/// result is empty when the day has no rounds or no exercises.
pub fn build_sequence(day: &ResolvedDay) -> Vec<Segment> {
    let rounds = day.rounds as usize;
    let per_round = day.exercises.len();
    let mut segments = Vec::with_capacity((rounds * per_round * 2).saturating_sub(1));

    for round in 0..rounds {
        for (i, exercise) in day.exercises.iter().enumerate() {
            segments.push(Segment::work(
                day.work_sec,
                &exercise.name,
                &exercise.description,
            ));
            let is_last = round + 1 == rounds && i + 1 == per_round;
            if !is_last {
                segments.push(Segment::rest(day.rest_sec));
            }
        }
    }

    segments
}

/// Total duration of a sequence in seconds.
pub fn total_seconds(segments: &[Segment]) -> u64 {
    segments.iter().map(|s| u64::from(s.seconds)).sum()
}

/// Seconds contained in the segments before `index`.
pub fn elapsed_before(segments: &[Segment], index: usize) -> u64 {
    total_seconds(&segments[..index.min(segments.len())])
}

/// The next work segment after `index`, used for an "up next" preview.
pub fn next_work(segments: &[Segment], index: usize) -> Option<&Segment> {
    segments.iter().skip(index + 1).find(|s| s.is_work())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Exercise;
    use crate::types::{DayTitle, ExerciseId};

    fn exercise(id: &str) -> Exercise {
        Exercise {
            id: ExerciseId::new(id).unwrap(),
            name: id.to_uppercase(),
            description: format!("do {id}"),
        }
    }

    fn day(rounds: u32, ids: &[&str]) -> ResolvedDay {
        ResolvedDay {
            title: DayTitle::new("Day").unwrap(),
            exercises: ids.iter().map(|id| exercise(id)).collect(),
            work_sec: 30,
            rest_sec: 10,
            rounds,
        }
    }

    #[test]
    fn two_rounds_of_two_exercises() {
        let seq = build_sequence(&day(2, &["a", "b"]));
        assert_eq!(
            seq,
            vec![
                Segment::work(30, "A", "do a"),
                Segment::rest(10),
                Segment::work(30, "B", "do b"),
                Segment::rest(10),
                Segment::work(30, "A", "do a"),
                Segment::rest(10),
                Segment::work(30, "B", "do b"),
            ]
        );
    }

    #[test]
    fn length_and_alternation_hold_for_many_shapes() {
        for rounds in 1..=5 {
            for count in 1..=6 {
                let ids: Vec<String> = (0..count).map(|i| format!("ex{i}")).collect();
                let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                let seq = build_sequence(&day(rounds, &ids));

                assert_eq!(seq.len(), 2 * rounds as usize * count - 1);
                assert!(seq.first().unwrap().is_work());
                assert!(seq.last().unwrap().is_work());
                for (i, segment) in seq.iter().enumerate() {
                    assert_eq!(segment.is_work(), i % 2 == 0);
                    assert_eq!(segment.is_work(), segment.exercise_name.is_some());
                    assert_eq!(segment.is_work(), segment.exercise_description.is_some());
                }
            }
        }
    }

    #[test]
    fn zero_rounds_or_no_exercises_is_empty() {
        assert!(build_sequence(&day(0, &["a", "b"])).is_empty());
        assert!(build_sequence(&day(3, &[])).is_empty());
    }

    #[test]
    fn single_segment_has_no_rest() {
        let seq = build_sequence(&day(1, &["a"]));
        assert_eq!(seq, vec![Segment::work(30, "A", "do a")]);
    }

    #[test]
    fn progress_helpers() {
        let seq = build_sequence(&day(2, &["a", "b"]));
        assert_eq!(total_seconds(&seq), 4 * 30 + 3 * 10);
        assert_eq!(elapsed_before(&seq, 0), 0);
        assert_eq!(elapsed_before(&seq, 3), 30 + 10 + 30);
        assert_eq!(elapsed_before(&seq, 100), total_seconds(&seq));
        assert_eq!(total_seconds(&[]), 0);
    }

    #[test]
    fn next_work_skips_rest() {
        let seq = build_sequence(&day(1, &["a", "b"]));
        assert_eq!(
            next_work(&seq, 1).and_then(|s| s.exercise_name.as_deref()),
            Some("B")
        );
        assert!(next_work(&seq, 2).is_none());
    }
}
