//! Core domain logic for the calisthenics program coach.
//!
//! This crate contains the fundamental types and logic for:
//! - Program and exercise library loading with schema validation
//! - Resolving a week's exercise IDs against the library
//! - Expanding a day into timed work/rest segments
//! - The countdown timer and the driver that steps it through a sequence
//! - Completion records on top of a key-value store

pub mod completion;
pub mod driver;
pub mod program;
pub mod resolve;
pub mod sequence;
pub mod store;
pub mod timer;
mod types;

pub use completion::{CompletionKey, DEFAULT_NAMESPACE, ProgressError, ProgressStore};
pub use driver::{DriverEvent, Progress, SequenceDriver};
pub use program::{
    DayPlan, Days, Exercise, ExerciseLibrary, LoadError, MAX_WORK_SEGMENTS_PER_DAY, Program, Week,
};
pub use resolve::{DaySelector, ResolvedDay, ResolvedWeek, resolve_week};
pub use sequence::{Segment, build_sequence};
pub use store::{KeyValueStore, MemoryStore};
pub use timer::{Tick, Timer, TimerState};
pub use types::{DayTitle, ExerciseId, SegmentKind, ValidationError};
